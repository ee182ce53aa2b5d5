//! # Processor Module
//!
//! The processor module maintains the source-structure trees attached to
//! model entities, so that a template-rendering collaborator can
//! regenerate files while preserving user-edited regions.
//!
//! ## Overview
//!
//! One processing pass over a model runs three stages:
//!
//! 1. **Synthesis** - entities that declare a concrete type but carry no
//!    structure get a canonical default structure built from their
//!    capabilities (implemented specifications, dependencies, properties,
//!    messages).
//! 2. **Merge** - user-declared structures are filled from the defaults
//!    without touching anything explicitly set; inherited structures are
//!    overlaid onto the defaults ancestor by ancestor, later ancestors
//!    winning. A `final` ancestor structure suppresses attachment
//!    entirely.
//! 3. **Defaulting** - remaining unset attributes are filled from the
//!    named-section convention table and the head/tail comment override
//!    chain.
//!
//! The pass is a pure function of the input model: the caller's model is
//! cloned up front and the clone is returned with structures attached.
//! Re-running the pass against its own output changes nothing.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use modelgen::context::ModelContext;
//! use modelgen::processor::SourceFileProcessor;
//!
//! let processor = SourceFileProcessor::new();
//! let processed = processor.process_model(&ModelContext::new(), &model)?;
//! ```

mod defaults;
mod merge;
mod synthesizer;
#[cfg(test)]
mod tests;

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::config::{self, FileConfig};
use crate::context::ModelContext;
use crate::model::{
    simple_name, Implementation, InheritanceGraph, Model, ModuleIndex, Specification,
};

pub use merge::{
    merge_section, merge_sections, merge_source_file, merge_source_files, MergePolicy,
};

/// Identifier of the synthesized default source file.
pub const DEFAULT_SOURCE_FILE: &str = "Default";

pub const LICENSE_SECTION: &str = "License Header";
pub const ANNOTATIONS_SECTION: &str = "Annotations";
pub const DOCUMENTATION_SECTION: &str = "Documentation";
pub const CONSTRUCTORS_SECTION: &str = "Constructors";
pub const DEFAULT_CONSTRUCTOR_SECTION: &str = "Default Constructor";
pub const DEPENDENCIES_SECTION: &str = "Dependencies";
pub const PROPERTIES_SECTION: &str = "Properties";
pub const MESSAGES_SECTION: &str = "Messages";

/// Canonical template names assigned to synthesized structures.
///
/// These are bare stems; the rendering collaborator owns lookup and file
/// extensions. Individual stems can be overridden through the
/// `[templates]` table of `modelgen.toml`.
#[derive(Debug, Clone)]
pub struct TemplateNames {
    pub specification: String,
    pub implementation: String,
    pub license: String,
    pub annotations: String,
    pub documentation: String,
    pub constructors_head: String,
    pub constructors_tail: String,
    pub default_constructor: String,
    pub dependencies: String,
    pub properties: String,
    pub messages: String,
}

impl Default for TemplateNames {
    fn default() -> Self {
        TemplateNames {
            specification: "specification".to_string(),
            implementation: "implementation".to_string(),
            license: "license".to_string(),
            annotations: "annotations".to_string(),
            documentation: "documentation".to_string(),
            constructors_head: "constructors-head".to_string(),
            constructors_tail: "constructors-tail".to_string(),
            default_constructor: "default-constructor".to_string(),
            dependencies: "dependencies".to_string(),
            properties: "properties".to_string(),
            messages: "messages".to_string(),
        }
    }
}

impl TemplateNames {
    fn with_overrides(overrides: &HashMap<String, String>) -> Self {
        let mut names = TemplateNames::default();
        for (role, stem) in overrides {
            match role.as_str() {
                "specification" => names.specification = stem.clone(),
                "implementation" => names.implementation = stem.clone(),
                "license" => names.license = stem.clone(),
                "annotations" => names.annotations = stem.clone(),
                "documentation" => names.documentation = stem.clone(),
                "constructors-head" => names.constructors_head = stem.clone(),
                "constructors-tail" => names.constructors_tail = stem.clone(),
                "default-constructor" => names.default_constructor = stem.clone(),
                "dependencies" => names.dependencies = stem.clone(),
                "properties" => names.properties = stem.clone(),
                "messages" => names.messages = stem.clone(),
                other => {
                    tracing::warn!(role = %other, "unknown template role in config, ignored")
                }
            }
        }
        names
    }
}

/// Which kind of entity a structure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EntityKind {
    Specification,
    Implementation,
}

/// Capability facts about the entity a structure is being defaulted for.
///
/// The convention table needs these to decide optionality of the
/// capability sections and editability of the type-name sections.
#[derive(Debug, Clone)]
pub(crate) struct SectionContext {
    pub kind: EntityKind,
    pub type_name: Option<String>,
    pub implemented: Vec<String>,
    pub has_specifications: bool,
    pub has_dependencies: bool,
    pub has_properties: bool,
    pub has_messages: bool,
}

impl SectionContext {
    pub(crate) fn for_specification(spec: &Specification) -> Self {
        SectionContext {
            kind: EntityKind::Specification,
            type_name: spec
                .class
                .as_deref()
                .and_then(simple_name)
                .map(str::to_string),
            implemented: Vec::new(),
            has_specifications: false,
            has_dependencies: false,
            has_properties: false,
            has_messages: false,
        }
    }

    pub(crate) fn for_implementation(index: &ModuleIndex, imp: &Implementation) -> Self {
        SectionContext {
            kind: EntityKind::Implementation,
            type_name: imp
                .class
                .as_deref()
                .and_then(simple_name)
                .map(str::to_string),
            implemented: index.implemented_type_names(imp),
            has_specifications: !imp.implements.is_empty(),
            has_dependencies: !imp.dependencies.is_empty(),
            has_properties: !imp.properties.is_empty(),
            has_messages: !imp.messages.is_empty(),
        }
    }

    fn is_type_section(&self, name: &str) -> bool {
        self.implemented.iter().any(|n| n == name)
            || self.type_name.as_deref() == Some(name)
    }
}

/// Maintains source-structure trees on specifications and implementations.
#[derive(Debug, Clone, Default)]
pub struct SourceFileProcessor {
    templates: TemplateNames,
    /// Instance-tier default head comment, between per-file values and the
    /// process-wide default.
    head_comment: Option<String>,
    tail_comment: Option<String>,
}

impl SourceFileProcessor {
    pub fn new() -> Self {
        SourceFileProcessor::default()
    }

    /// Build a processor configured from a `modelgen.toml` sidecar.
    pub fn from_file_config(config: &FileConfig) -> Self {
        SourceFileProcessor {
            templates: TemplateNames::with_overrides(&config.templates),
            head_comment: config.head_comment.clone(),
            tail_comment: config.tail_comment.clone(),
        }
    }

    /// Run one processing pass, returning a new model with definitive
    /// source structures attached. The input model is never mutated.
    pub fn process_model(&self, ctx: &ModelContext, model: &Model) -> anyhow::Result<Model> {
        if !config::source_processing_enabled(ctx) {
            debug!("source processing disabled, returning model unchanged");
            return Ok(model.clone());
        }

        let mut processed = model.clone();
        let index = ModuleIndex::new(model);
        let graph = InheritanceGraph::new(&index)?;
        let mut user_declared: HashSet<String> = HashSet::new();

        // Pass 1: synthesize, merge user structures, overlay ancestors.
        for module in &mut processed.modules {
            for spec in &mut module.specifications {
                self.process_specification(ctx, &index, spec);
            }
            for imp in &mut module.implementations {
                self.process_implementation(ctx, &index, &graph, imp, &mut user_declared);
            }
        }

        // Pass 2: mark inherited structures that override an ancestor's.
        for module in &mut processed.modules {
            for imp in &mut module.implementations {
                if user_declared.contains(&imp.identifier) {
                    continue;
                }
                let Some(files) = imp.source_files.as_mut() else {
                    continue;
                };
                let overriding = graph
                    .source_files_nodes(&imp.identifier)
                    .iter()
                    .any(|n| !n.overridden_by.is_empty());
                if overriding {
                    files.override_ = Some(true);
                }
            }
        }

        // Fill remaining defaults on every attached structure.
        for module in &mut processed.modules {
            for spec in &mut module.specifications {
                let scx = SectionContext::for_specification(spec);
                if let Some(files) = spec.source_files.as_mut() {
                    self.apply_defaults(ctx, &scx, files);
                }
                for file in &mut spec.source_file {
                    self.apply_file_defaults(ctx, &scx, file);
                }
            }
            for imp in &mut module.implementations {
                let scx = SectionContext::for_implementation(&index, imp);
                if let Some(files) = imp.source_files.as_mut() {
                    self.apply_defaults(ctx, &scx, files);
                }
                for file in &mut imp.source_file {
                    self.apply_file_defaults(ctx, &scx, file);
                }
            }
        }

        Ok(processed)
    }

    fn process_specification(
        &self,
        ctx: &ModelContext,
        index: &ModuleIndex,
        spec: &mut Specification,
    ) {
        let default = self.synthesize_specification(ctx, index, spec);
        if let Some(user) = spec.source_files.as_mut() {
            merge_source_files(user, &default, MergePolicy::PreserveExisting);
        } else if !spec.source_file.is_empty() {
            if let Some(default_file) = default.file(DEFAULT_SOURCE_FILE) {
                for file in &mut spec.source_file {
                    merge_source_file(file, default_file, MergePolicy::PreserveExisting);
                }
            }
        } else if spec.declares_class() {
            spec.source_files = Some(default);
        }
    }

    fn process_implementation(
        &self,
        ctx: &ModelContext,
        index: &ModuleIndex,
        graph: &InheritanceGraph,
        imp: &mut Implementation,
        user_declared: &mut HashSet<String>,
    ) {
        let default = self.synthesize_implementation(ctx, index, imp);
        if let Some(user) = imp.source_files.as_mut() {
            user_declared.insert(imp.identifier.clone());
            merge_source_files(user, &default, MergePolicy::PreserveExisting);
        } else if !imp.source_file.is_empty() {
            user_declared.insert(imp.identifier.clone());
            if let Some(default_file) = default.file(DEFAULT_SOURCE_FILE) {
                for file in &mut imp.source_file {
                    merge_source_file(file, default_file, MergePolicy::PreserveExisting);
                }
            }
        } else if imp.declares_class() {
            let mut merged = default;
            let mut governed_by_final_ancestor = false;
            for node in graph.source_files_nodes(&imp.identifier) {
                merge_source_files(&mut merged, &node.source_files, MergePolicy::Overwrite);
                if node.source_files.is_final() {
                    governed_by_final_ancestor = true;
                }
            }
            if governed_by_final_ancestor {
                debug!(
                    implementation = %imp.identifier,
                    "final ancestor structure governs this implementation, not attaching"
                );
            } else {
                imp.source_files = Some(merged);
            }
        }
    }
}
