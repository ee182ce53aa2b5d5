use tracing::warn;

use crate::context::ModelContext;
use crate::model::{
    source_location, Implementation, ModuleIndex, SourceFileType, SourceFilesType,
    SourceSectionType, SourceSectionsType, Specification,
};

use super::{
    SectionContext, SourceFileProcessor, ANNOTATIONS_SECTION, CONSTRUCTORS_SECTION,
    DEFAULT_CONSTRUCTOR_SECTION, DEFAULT_SOURCE_FILE, DEPENDENCIES_SECTION,
    DOCUMENTATION_SECTION, LICENSE_SECTION, MESSAGES_SECTION, PROPERTIES_SECTION,
};

fn type_section(name: &str) -> SourceSectionType {
    let mut section = SourceSectionType::named(name);
    section.editable = Some(true);
    section.indentation_level = Some(1);
    section
}

fn location_for(identifier: &str, class: Option<&str>) -> Option<String> {
    match class {
        Some(class) => {
            let location = source_location(class);
            if location.is_none() {
                warn!(entity = %identifier, class = %class, "cannot derive a source location from type name");
            }
            location
        }
        None => {
            warn!(entity = %identifier, "no type name, source file gets no location");
            None
        }
    }
}

impl SourceFileProcessor {
    /// Build the canonical default structure for a specification: one
    /// `Default` source file with the fixed section sequence License
    /// Header, Annotations, Documentation and an editable section for the
    /// specification's own type name.
    pub fn synthesize_specification(
        &self,
        ctx: &ModelContext,
        _index: &ModuleIndex,
        spec: &Specification,
    ) -> SourceFilesType {
        let scx = SectionContext::for_specification(spec);
        let mut sections = vec![
            SourceSectionType::named(LICENSE_SECTION),
            SourceSectionType::named(ANNOTATIONS_SECTION),
            SourceSectionType::named(DOCUMENTATION_SECTION),
        ];
        if let Some(name) = scx.type_name.clone() {
            sections.push(type_section(&name));
        }

        let mut files = SourceFilesType::default();
        files.file.push(SourceFileType {
            identifier: Some(DEFAULT_SOURCE_FILE.to_string()),
            location: location_for(&spec.identifier, spec.class.as_deref()),
            source_sections: Some(SourceSectionsType { section: sections }),
            ..SourceFileType::default()
        });
        self.apply_defaults(ctx, &scx, &mut files);
        files
    }

    /// Build the canonical default structure for an implementation: one
    /// `Default` source file with the fixed section sequence License
    /// Header, Annotations, Documentation, one editable section per
    /// implemented type name, then Constructors (nesting Default
    /// Constructor), Dependencies, Properties and Messages.
    pub fn synthesize_implementation(
        &self,
        ctx: &ModelContext,
        index: &ModuleIndex,
        imp: &Implementation,
    ) -> SourceFilesType {
        let scx = SectionContext::for_implementation(index, imp);
        let mut sections = vec![
            SourceSectionType::named(LICENSE_SECTION),
            SourceSectionType::named(ANNOTATIONS_SECTION),
            SourceSectionType::named(DOCUMENTATION_SECTION),
        ];
        for name in &scx.implemented {
            sections.push(type_section(name));
        }

        let mut constructors = SourceSectionType::named(CONSTRUCTORS_SECTION);
        constructors.source_sections = Some(SourceSectionsType {
            section: vec![SourceSectionType::named(DEFAULT_CONSTRUCTOR_SECTION)],
        });
        sections.push(constructors);
        sections.push(SourceSectionType::named(DEPENDENCIES_SECTION));
        sections.push(SourceSectionType::named(PROPERTIES_SECTION));
        sections.push(SourceSectionType::named(MESSAGES_SECTION));

        let mut files = SourceFilesType::default();
        files.file.push(SourceFileType {
            identifier: Some(DEFAULT_SOURCE_FILE.to_string()),
            location: location_for(&imp.identifier, imp.class.as_deref()),
            source_sections: Some(SourceSectionsType { section: sections }),
            ..SourceFileType::default()
        });
        self.apply_defaults(ctx, &scx, &mut files);
        files
    }
}
