use serde::{Deserialize, Serialize};

/// Root of a parsed model document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Model {
    pub modules: Vec<Module>,
}

/// A named collection of specifications and implementations.
///
/// The structure-attachment slots (`source_file` etc.) are structurally
/// illegal on a module; they are modelled anyway so the validator can
/// report documents that misplace them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Module {
    pub name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub specifications: Vec<Specification>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub implementations: Vec<Implementation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_file: Vec<SourceFileType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_files: Option<SourceFilesType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_section: Vec<SourceSectionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_sections: Option<SourceSectionsType>,
}

/// A named contract realized by zero or more implementations.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Specification {
    pub identifier: String,
    /// Fully qualified type name, when the specification maps to a type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// Whether the specification declares a concrete type of its own.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_declaration: Option<bool>,
    /// Bare (deprecated) source file declarations. At most one is legal.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_file: Vec<SourceFileType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_files: Option<SourceFilesType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_section: Vec<SourceSectionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_sections: Option<SourceSectionsType>,
}

impl Specification {
    pub fn declares_class(&self) -> bool {
        self.class_declaration.unwrap_or(false)
    }
}

/// A named realization of zero or more specifications.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Implementation {
    pub identifier: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_declaration: Option<bool>,
    #[serde(rename = "final", skip_serializing_if = "Option::is_none")]
    pub final_: Option<bool>,
    /// Identifiers of the specifications this implementation realizes,
    /// in declaration order.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub implements: Vec<String>,
    /// Identifiers of ancestor implementations.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<Property>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub messages: Vec<Message>,
    /// Bare (deprecated) source file declarations. At most one is legal.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_file: Vec<SourceFileType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_files: Option<SourceFilesType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_section: Vec<SourceSectionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_sections: Option<SourceSectionsType>,
}

impl Implementation {
    pub fn declares_class(&self) -> bool {
        self.class_declaration.unwrap_or(false)
    }
}

/// A dependency of an implementation on a specification.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Dependency {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_file: Vec<SourceFileType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_files: Option<SourceFilesType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_section: Vec<SourceSectionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_sections: Option<SourceSectionsType>,
}

/// A named property of an implementation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Property {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// A named message template of an implementation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Message {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_file: Vec<SourceFileType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_files: Option<SourceFilesType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub source_section: Vec<SourceSectionType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_sections: Option<SourceSectionsType>,
}

/// Ordered list of source file declarations for one entity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceFilesType {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub file: Vec<SourceFileType>,
    /// No further ancestor merging is allowed past a final structure.
    #[serde(rename = "final", skip_serializing_if = "Option::is_none")]
    pub final_: Option<bool>,
    /// This structure overrides an ancestor's structure.
    #[serde(rename = "override", skip_serializing_if = "Option::is_none")]
    pub override_: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

impl SourceFilesType {
    pub fn is_final(&self) -> bool {
        self.final_.unwrap_or(false)
    }

    pub fn is_override(&self) -> bool {
        self.override_.unwrap_or(false)
    }

    /// Look up a file by its identifier, the merge key within this list.
    pub fn file(&self, identifier: &str) -> Option<&SourceFileType> {
        self.file
            .iter()
            .find(|f| f.identifier.as_deref() == Some(identifier))
    }

    pub fn file_mut(&mut self, identifier: &str) -> Option<&mut SourceFileType> {
        self.file
            .iter_mut()
            .find(|f| f.identifier.as_deref() == Some(identifier))
    }
}

/// One generated source file and its section structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceFileType {
    /// Unique key within the owning `SourceFilesType` list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,
    /// Relative output path of the generated file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Name of the template producing the file skeleton.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail_comment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_sections: Option<SourceSectionsType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub template_parameters: Vec<TemplateParameter>,
}

impl SourceFileType {
    /// Recursive lookup of a section anywhere below this file.
    pub fn section(&self, name: &str) -> Option<&SourceSectionType> {
        self.source_sections.as_ref().and_then(|s| s.find(name))
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut SourceSectionType> {
        self.source_sections.as_mut().and_then(|s| s.find_mut(name))
    }
}

/// Ordered list of sections. Must be non-empty when present; an empty
/// list is a constraint violation reported by the validator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceSectionsType {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub section: Vec<SourceSectionType>,
}

impl SourceSectionsType {
    /// Look up a direct child section by name, the merge key among siblings.
    pub fn section(&self, name: &str) -> Option<&SourceSectionType> {
        self.section.iter().find(|s| s.name == name)
    }

    pub fn section_mut(&mut self, name: &str) -> Option<&mut SourceSectionType> {
        self.section.iter_mut().find(|s| s.name == name)
    }

    /// Recursive lookup through nested section lists.
    pub fn find(&self, name: &str) -> Option<&SourceSectionType> {
        for s in &self.section {
            if s.name == name {
                return Some(s);
            }
            if let Some(nested) = s.source_sections.as_ref().and_then(|n| n.find(name)) {
                return Some(nested);
            }
        }
        None
    }

    pub fn find_mut(&mut self, name: &str) -> Option<&mut SourceSectionType> {
        for s in &mut self.section {
            if s.name == name {
                return Some(s);
            }
            if let Some(nested) = s.source_sections.as_mut().and_then(|n| n.find_mut(name)) {
                return Some(nested);
            }
        }
        None
    }
}

/// A named, possibly nested region of a generated source file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SourceSectionType {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head_template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail_template: Option<String>,
    /// Editable sections preserve user edits across regeneration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editable: Option<bool>,
    /// Optional sections may be absent from an existing file without that
    /// counting as an error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub indentation_level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_sections: Option<SourceSectionsType>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub template_parameters: Vec<TemplateParameter>,
}

impl SourceSectionType {
    pub fn named(name: impl Into<String>) -> Self {
        SourceSectionType {
            name: name.into(),
            ..SourceSectionType::default()
        }
    }

    pub fn is_editable(&self) -> bool {
        self.editable.unwrap_or(false)
    }

    pub fn is_optional(&self) -> bool {
        self.optional.unwrap_or(false)
    }

    pub fn indentation_level(&self) -> u32 {
        self.indentation_level.unwrap_or(0)
    }
}

/// A typed parameter handed to the template rendering collaborator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TemplateParameter {
    pub name: String,
    /// Java type name of the parameter value, e.g. `int` or
    /// `java.lang.Boolean`. Untyped parameters are passed through verbatim.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}
