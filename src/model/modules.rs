use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::warn;

use super::types::{Implementation, Model, Specification};

static QUALIFIED_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*(\.[A-Za-z_$][A-Za-z0-9_$]*)*$").unwrap()
});

/// Validate a fully qualified Java type name.
pub fn qualified_name(class: &str) -> Option<&str> {
    if QUALIFIED_NAME_RE.is_match(class) {
        Some(class)
    } else {
        None
    }
}

/// Simple (unqualified) name of a valid Java type name.
pub fn simple_name(class: &str) -> Option<&str> {
    qualified_name(class).map(|c| c.rsplit('.').next().unwrap_or(c))
}

/// Relative source location of a type: dots become path separators and a
/// `.java` suffix is appended.
pub fn source_location(class: &str) -> Option<String> {
    qualified_name(class).map(|c| format!("{}.java", c.replace('.', "/")))
}

/// Lookup index over a parsed model.
///
/// Built once per processing pass from an immutable snapshot, so that the
/// pass can mutate its working clone of the model while resolving other
/// entities through the index.
#[derive(Debug, Clone, Default)]
pub struct ModuleIndex {
    specifications: HashMap<String, Specification>,
    implementations: HashMap<String, Implementation>,
}

impl ModuleIndex {
    pub fn new(model: &Model) -> Self {
        let mut index = ModuleIndex::default();
        for module in &model.modules {
            for spec in &module.specifications {
                if index
                    .specifications
                    .insert(spec.identifier.clone(), spec.clone())
                    .is_some()
                {
                    warn!(identifier = %spec.identifier, "duplicate specification declaration, later one wins");
                }
            }
            for imp in &module.implementations {
                if index
                    .implementations
                    .insert(imp.identifier.clone(), imp.clone())
                    .is_some()
                {
                    warn!(identifier = %imp.identifier, "duplicate implementation declaration, later one wins");
                }
            }
        }
        index
    }

    pub fn specification(&self, identifier: &str) -> Option<&Specification> {
        self.specifications.get(identifier)
    }

    pub fn implementation(&self, identifier: &str) -> Option<&Implementation> {
        self.implementations.get(identifier)
    }

    pub fn implementations(&self) -> impl Iterator<Item = &Implementation> {
        self.implementations.values()
    }

    /// Specifications realized by an implementation, declaration order
    /// preserved. Unresolvable references are logged and skipped.
    pub fn specifications_of(&self, imp: &Implementation) -> Vec<&Specification> {
        imp.implements
            .iter()
            .filter_map(|id| {
                let spec = self.specifications.get(id);
                if spec.is_none() {
                    warn!(
                        implementation = %imp.identifier,
                        specification = %id,
                        "unresolvable specification reference"
                    );
                }
                spec
            })
            .collect()
    }

    /// Simple names of the types an implementation realizes, in the order
    /// the specifications are declared, with the implementation's own type
    /// name appended when it is not already among them.
    pub fn implemented_type_names(&self, imp: &Implementation) -> Vec<String> {
        let mut names = Vec::new();
        for spec in self.specifications_of(imp) {
            if let Some(name) = spec.class.as_deref().and_then(simple_name) {
                if !names.iter().any(|n| n == name) {
                    names.push(name.to_string());
                }
            }
        }
        if let Some(own) = imp.class.as_deref().and_then(simple_name) {
            if !names.iter().any(|n| n == own) {
                names.push(own.to_string());
            }
        }
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name_validation() {
        assert_eq!(qualified_name("org.example.Foo"), Some("org.example.Foo"));
        assert_eq!(qualified_name("Foo"), Some("Foo"));
        assert_eq!(qualified_name("org..Foo"), None);
        assert_eq!(qualified_name("org.3xample.Foo"), None);
        assert_eq!(qualified_name(""), None);
    }

    #[test]
    fn test_simple_name_and_location() {
        assert_eq!(simple_name("org.example.Foo"), Some("Foo"));
        assert_eq!(simple_name("Foo"), Some("Foo"));
        assert_eq!(
            source_location("org.example.Foo").as_deref(),
            Some("org/example/Foo.java")
        );
        assert_eq!(source_location("not a class"), None);
    }
}
