use std::collections::{HashMap, HashSet};

use anyhow::bail;
use tracing::warn;

use super::modules::ModuleIndex;
use super::types::SourceFilesType;

/// An ancestor implementation carrying a source-files structure.
#[derive(Debug, Clone)]
pub struct InheritanceNode {
    /// Identifier of the declaring ancestor implementation.
    pub specified_by: String,
    /// The structure declared by that ancestor.
    pub source_files: SourceFilesType,
    /// Identifiers of declaring descendants within the same ancestor set.
    /// Non-empty means this node's structure is overridden further down.
    pub overridden_by: Vec<String>,
}

/// Ancestor resolution over the `extends` edges of a model.
///
/// Traversal order is parents-before-descendants, so a structure declared
/// nearer to the requesting implementation is applied later and wins on
/// conflict. There is no conflict detection beyond the `final`
/// short-circuit applied by the merge engine.
#[derive(Debug, Clone, Default)]
pub struct InheritanceGraph {
    extends: HashMap<String, Vec<String>>,
    declared: HashMap<String, SourceFilesType>,
}

impl InheritanceGraph {
    pub fn new(index: &ModuleIndex) -> anyhow::Result<Self> {
        let mut graph = InheritanceGraph::default();
        for imp in index.implementations() {
            graph
                .extends
                .insert(imp.identifier.clone(), imp.extends.clone());
            if let Some(files) = &imp.source_files {
                graph.declared.insert(imp.identifier.clone(), files.clone());
            }
        }
        for identifier in graph.extends.keys() {
            graph.check_cycle(identifier)?;
        }
        Ok(graph)
    }

    fn check_cycle(&self, start: &str) -> anyhow::Result<()> {
        // DFS; `path` tracks the current chain for the error message.
        fn visit(
            graph: &InheritanceGraph,
            id: &str,
            path: &mut Vec<String>,
        ) -> anyhow::Result<()> {
            if path.iter().any(|p| p == id) {
                bail!(
                    "implementation inheritance cycle: {} -> {}",
                    path.join(" -> "),
                    id
                );
            }
            path.push(id.to_string());
            if let Some(parents) = graph.extends.get(id) {
                for parent in parents {
                    visit(graph, parent, path)?;
                }
            }
            path.pop();
            Ok(())
        }
        visit(self, start, &mut Vec::new())
    }

    /// Ancestors of `identifier` (excluding itself), farthest first.
    fn ancestors(&self, identifier: &str) -> Vec<String> {
        let mut ordered = Vec::new();
        let mut seen = HashSet::new();
        self.collect_ancestors(identifier, &mut ordered, &mut seen);
        ordered
    }

    fn collect_ancestors(
        &self,
        identifier: &str,
        ordered: &mut Vec<String>,
        seen: &mut HashSet<String>,
    ) {
        let Some(parents) = self.extends.get(identifier) else {
            warn!(implementation = %identifier, "unresolvable implementation reference");
            return;
        };
        for parent in parents {
            if !seen.insert(parent.clone()) {
                continue;
            }
            self.collect_ancestors(parent, ordered, seen);
            ordered.push(parent.clone());
        }
    }

    /// True if `ancestor` is reachable from `identifier` via `extends`.
    fn is_ancestor_of(&self, ancestor: &str, identifier: &str) -> bool {
        self.ancestors(identifier).iter().any(|a| a == ancestor)
    }

    /// Ancestor nodes of `identifier` that declare a source-files
    /// structure, in traversal order.
    pub fn source_files_nodes(&self, identifier: &str) -> Vec<InheritanceNode> {
        let ancestors = self.ancestors(identifier);
        let declaring: Vec<&String> = ancestors
            .iter()
            .filter(|a| self.declared.contains_key(*a))
            .collect();
        declaring
            .iter()
            .map(|a| {
                let overridden_by = declaring
                    .iter()
                    .filter(|d| *d != a && self.is_ancestor_of(a, d))
                    .map(|d| (*d).clone())
                    .collect();
                InheritanceNode {
                    specified_by: (*a).clone(),
                    #[allow(clippy::unwrap_used)]
                    source_files: self.declared.get(*a).unwrap().clone(),
                    overridden_by,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Implementation, Model, Module};

    fn model_with(implementations: Vec<Implementation>) -> ModuleIndex {
        ModuleIndex::new(&Model {
            modules: vec![Module {
                name: "test".to_string(),
                implementations,
                ..Module::default()
            }],
        })
    }

    fn imp(id: &str, extends: &[&str], declares: bool) -> Implementation {
        Implementation {
            identifier: id.to_string(),
            extends: extends.iter().map(|s| s.to_string()).collect(),
            source_files: declares.then(SourceFilesType::default),
            ..Implementation::default()
        }
    }

    #[test]
    fn test_ancestors_parents_first() {
        let index = model_with(vec![
            imp("a", &[], true),
            imp("b", &["a"], true),
            imp("c", &["b"], false),
        ]);
        let graph = InheritanceGraph::new(&index).unwrap();
        let nodes = graph.source_files_nodes("c");
        let order: Vec<&str> = nodes.iter().map(|n| n.specified_by.as_str()).collect();
        assert_eq!(order, vec!["a", "b"]);
        // "a" is overridden by its declaring descendant "b".
        assert_eq!(nodes[0].overridden_by, vec!["b".to_string()]);
        assert!(nodes[1].overridden_by.is_empty());
    }

    #[test]
    fn test_cycle_detection() {
        let index = model_with(vec![imp("a", &["b"], false), imp("b", &["a"], false)]);
        let err = InheritanceGraph::new(&index).unwrap_err();
        assert!(err.to_string().contains("cycle"));
    }
}
