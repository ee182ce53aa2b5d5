use crate::config;
use crate::context::ModelContext;
use crate::model::{SourceFileType, SourceFilesType, SourceSectionType};

use super::{
    EntityKind, SectionContext, SourceFileProcessor, ANNOTATIONS_SECTION, CONSTRUCTORS_SECTION,
    DEFAULT_CONSTRUCTOR_SECTION, DEPENDENCIES_SECTION, DOCUMENTATION_SECTION, LICENSE_SECTION,
    MESSAGES_SECTION, PROPERTIES_SECTION,
};

fn fill<T>(slot: &mut Option<T>, value: T) {
    if slot.is_none() {
        *slot = Some(value);
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

impl SourceFileProcessor {
    /// Fill still-unset attributes of a structure from the named-section
    /// convention table. Attributes already set, including ones explicitly
    /// set to their own default value, are never touched; running this
    /// twice produces no further change.
    pub(crate) fn apply_defaults(
        &self,
        ctx: &ModelContext,
        scx: &SectionContext,
        files: &mut SourceFilesType,
    ) {
        for file in &mut files.file {
            self.apply_file_defaults(ctx, scx, file);
        }
    }

    pub(crate) fn apply_file_defaults(
        &self,
        ctx: &ModelContext,
        scx: &SectionContext,
        file: &mut SourceFileType,
    ) {
        let template = match scx.kind {
            EntityKind::Specification => &self.templates.specification,
            EntityKind::Implementation => &self.templates.implementation,
        };
        fill(&mut file.template, template.clone());
        if let Some(comment) = self.effective_head_comment(ctx) {
            fill(&mut file.head_comment, comment);
        }
        if let Some(comment) = self.effective_tail_comment(ctx) {
            fill(&mut file.tail_comment, comment);
        }
        if let Some(sections) = file.source_sections.as_mut() {
            for section in &mut sections.section {
                self.apply_section_defaults(scx, section);
            }
        }
    }

    fn apply_section_defaults(&self, scx: &SectionContext, section: &mut SourceSectionType) {
        let t = &self.templates;
        match section.name.as_str() {
            LICENSE_SECTION => {
                fill(&mut section.head_template, t.license.clone());
                fill(&mut section.optional, true);
            }
            ANNOTATIONS_SECTION => {
                fill(&mut section.head_template, t.annotations.clone());
                fill(&mut section.optional, false);
            }
            DOCUMENTATION_SECTION => {
                fill(&mut section.head_template, t.documentation.clone());
                fill(&mut section.optional, true);
            }
            CONSTRUCTORS_SECTION => {
                fill(&mut section.head_template, t.constructors_head.clone());
                fill(&mut section.tail_template, t.constructors_tail.clone());
                fill(&mut section.optional, !scx.has_specifications);
                fill(&mut section.indentation_level, 1);
            }
            DEFAULT_CONSTRUCTOR_SECTION => {
                fill(&mut section.head_template, t.default_constructor.clone());
                fill(&mut section.editable, true);
                fill(&mut section.optional, false);
                fill(&mut section.indentation_level, 2);
            }
            DEPENDENCIES_SECTION => {
                fill(&mut section.head_template, t.dependencies.clone());
                fill(&mut section.optional, !scx.has_dependencies);
                fill(&mut section.indentation_level, 1);
            }
            PROPERTIES_SECTION => {
                fill(&mut section.head_template, t.properties.clone());
                fill(&mut section.optional, !scx.has_properties);
                fill(&mut section.indentation_level, 1);
            }
            MESSAGES_SECTION => {
                fill(&mut section.head_template, t.messages.clone());
                fill(&mut section.optional, !scx.has_messages);
                fill(&mut section.indentation_level, 1);
            }
            name if scx.is_type_section(name) => {
                fill(&mut section.editable, true);
                fill(&mut section.indentation_level, 1);
            }
            _ => {}
        }
        if let Some(nested) = section.source_sections.as_mut() {
            for child in &mut nested.section {
                self.apply_section_defaults(scx, child);
            }
        }
    }

    /// Instance-tier comment, then context attribute, then the cached
    /// process-wide default; empty strings count as unset at every tier.
    fn effective_head_comment(&self, ctx: &ModelContext) -> Option<String> {
        normalize(self.head_comment.as_deref()).or_else(|| config::default_head_comment(ctx))
    }

    fn effective_tail_comment(&self, ctx: &ModelContext) -> Option<String> {
        normalize(self.tail_comment.as_deref()).or_else(|| config::default_tail_comment(ctx))
    }
}
