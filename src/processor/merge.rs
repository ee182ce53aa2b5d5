use crate::model::{
    SourceFileType, SourceFilesType, SourceSectionType, SourceSectionsType, TemplateParameter,
};

/// How conflicting attributes are reconciled when two structures merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergePolicy {
    /// An explicitly set source attribute replaces the target's.
    /// Attributes the source never set leave the target untouched.
    Overwrite,
    /// An attribute already set on the target is never touched; only
    /// unset target attributes are filled from the source.
    PreserveExisting,
}

fn assign<T: Clone>(target: &mut Option<T>, source: &Option<T>, policy: MergePolicy) {
    match policy {
        MergePolicy::Overwrite => {
            if source.is_some() {
                *target = source.clone();
            }
        }
        MergePolicy::PreserveExisting => {
            if target.is_none() {
                *target = source.clone();
            }
        }
    }
}

/// Merge one source-files structure into another.
///
/// Files match by identifier; files present only in the source are
/// appended as clones, never dropped from the target.
pub fn merge_source_files(
    target: &mut SourceFilesType,
    source: &SourceFilesType,
    policy: MergePolicy,
) {
    assign(&mut target.final_, &source.final_, policy);
    assign(&mut target.override_, &source.override_, policy);
    assign(&mut target.model_version, &source.model_version, policy);
    for file in &source.file {
        let matched = file
            .identifier
            .as_deref()
            .and_then(|id| target.file_mut(id));
        match matched {
            Some(existing) => merge_source_file(existing, file, policy),
            None => target.file.push(file.clone()),
        }
    }
}

/// Merge the attributes and section tree of one source file into another.
pub fn merge_source_file(target: &mut SourceFileType, source: &SourceFileType, policy: MergePolicy) {
    assign(&mut target.identifier, &source.identifier, policy);
    assign(&mut target.location, &source.location, policy);
    assign(&mut target.template, &source.template, policy);
    assign(&mut target.head_comment, &source.head_comment, policy);
    assign(&mut target.tail_comment, &source.tail_comment, policy);
    match (&mut target.source_sections, &source.source_sections) {
        (Some(t), Some(s)) => merge_sections(t, s, policy),
        (None, Some(s)) => target.source_sections = Some(s.clone()),
        _ => {}
    }
    merge_template_parameters(&mut target.template_parameters, &source.template_parameters, policy);
}

/// Merge two section lists, matching sections by name among siblings.
/// Source-only sections are appended as clones.
pub fn merge_sections(
    target: &mut SourceSectionsType,
    source: &SourceSectionsType,
    policy: MergePolicy,
) {
    for section in &source.section {
        match target.section_mut(&section.name) {
            Some(existing) => merge_section(existing, section, policy),
            None => target.section.push(section.clone()),
        }
    }
}

/// Merge one section's attributes and nested sections into another.
pub fn merge_section(
    target: &mut SourceSectionType,
    source: &SourceSectionType,
    policy: MergePolicy,
) {
    assign(&mut target.head_template, &source.head_template, policy);
    assign(&mut target.tail_template, &source.tail_template, policy);
    assign(&mut target.editable, &source.editable, policy);
    assign(&mut target.optional, &source.optional, policy);
    assign(
        &mut target.indentation_level,
        &source.indentation_level,
        policy,
    );
    match (&mut target.source_sections, &source.source_sections) {
        (Some(t), Some(s)) => merge_sections(t, s, policy),
        (None, Some(s)) => target.source_sections = Some(s.clone()),
        _ => {}
    }
    merge_template_parameters(&mut target.template_parameters, &source.template_parameters, policy);
}

fn merge_template_parameters(
    target: &mut Vec<TemplateParameter>,
    source: &[TemplateParameter],
    policy: MergePolicy,
) {
    for param in source {
        match target.iter_mut().find(|p| p.name == param.name) {
            Some(existing) => {
                assign(&mut existing.kind, &param.kind, policy);
                assign(&mut existing.value, &param.value, policy);
            }
            None => target.push(param.clone()),
        }
    }
}
