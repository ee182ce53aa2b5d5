//! Unit tests for structural validation

use super::*;
use crate::model::{SourceSectionsType, TemplateParameter};

fn implementation(identifier: &str) -> Implementation {
    Implementation {
        identifier: identifier.to_string(),
        ..Implementation::default()
    }
}

fn model_with_implementation(imp: Implementation) -> Model {
    Model {
        modules: vec![Module {
            name: "test".to_string(),
            implementations: vec![imp],
            ..Module::default()
        }],
    }
}

fn details_with<'a>(report: &'a ValidationReport, identifier: &str) -> Vec<&'a Detail> {
    report
        .details
        .iter()
        .filter(|d| d.identifier == identifier)
        .collect()
}

#[test]
fn test_single_bare_source_file_is_informational() {
    let mut imp = implementation("org.example.Foo");
    imp.source_file = vec![SourceFileType::default()];
    let report = validate_model(&ModelContext::new(), &model_with_implementation(imp));

    let infos = details_with(&report, IMPLEMENTATION_SOURCE_FILE_INFORMATION);
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].severity, Severity::Info);
    assert!(report.is_structurally_valid());
}

#[test]
fn test_multiple_bare_source_files_is_severe() {
    let mut imp = implementation("org.example.Foo");
    imp.source_file = vec![SourceFileType::default(), SourceFileType::default()];
    let report = validate_model(&ModelContext::new(), &model_with_implementation(imp));

    let severe = details_with(&report, IMPLEMENTATION_SOURCE_FILE_MULTIPLICITY_CONSTRAINT);
    assert_eq!(severe.len(), 1);
    assert_eq!(severe[0].severity, Severity::Severe);
    assert!(!report.is_structurally_valid());
}

#[test]
fn test_empty_section_list_is_severe() {
    let mut imp = implementation("org.example.Foo");
    imp.source_files = Some(SourceFilesType {
        file: vec![SourceFileType {
            identifier: Some("Default".to_string()),
            source_sections: Some(SourceSectionsType::default()),
            ..SourceFileType::default()
        }],
        ..SourceFilesType::default()
    });
    let report = validate_model(&ModelContext::new(), &model_with_implementation(imp));

    let severe = details_with(&report, IMPLEMENTATION_SOURCE_SECTIONS_CONSTRAINT);
    assert_eq!(severe.len(), 1);
    assert!(severe[0].element.contains("file:Default"));
}

#[test]
fn test_empty_nested_section_list_references_the_section() {
    let mut imp = implementation("org.example.Foo");
    let mut section = crate::model::SourceSectionType::named("Constructors");
    section.source_sections = Some(SourceSectionsType::default());
    imp.source_files = Some(SourceFilesType {
        file: vec![SourceFileType {
            identifier: Some("Default".to_string()),
            source_sections: Some(SourceSectionsType {
                section: vec![section],
            }),
            ..SourceFileType::default()
        }],
        ..SourceFilesType::default()
    });
    let report = validate_model(&ModelContext::new(), &model_with_implementation(imp));

    let severe = details_with(&report, IMPLEMENTATION_SOURCE_SECTIONS_CONSTRAINT);
    assert_eq!(severe.len(), 1);
    assert!(severe[0].element.ends_with("section:Constructors"));
}

#[test]
fn test_structures_on_module_are_severe() {
    let model = Model {
        modules: vec![Module {
            name: "broken".to_string(),
            source_files: Some(SourceFilesType::default()),
            source_section: vec![crate::model::SourceSectionType::named("Floating")],
            ..Module::default()
        }],
    };
    let report = validate_model(&ModelContext::new(), &model);
    assert_eq!(details_with(&report, MODULE_SOURCE_FILES_CONSTRAINT).len(), 1);
    assert_eq!(details_with(&report, MODULE_SOURCE_SECTION_CONSTRAINT).len(), 1);
}

#[test]
fn test_structures_on_dependency_and_message_are_severe() {
    let mut imp = implementation("org.example.Foo");
    imp.dependencies = vec![Dependency {
        name: "logger".to_string(),
        source_files: Some(SourceFilesType::default()),
        ..Dependency::default()
    }];
    imp.messages = vec![Message {
        name: "greeting".to_string(),
        source_section: vec![crate::model::SourceSectionType::named("Floating")],
        ..Message::default()
    }];
    let report = validate_model(&ModelContext::new(), &model_with_implementation(imp));
    assert_eq!(details_with(&report, DEPENDENCY_SOURCE_FILES_CONSTRAINT).len(), 1);
    assert_eq!(details_with(&report, MESSAGE_SOURCE_SECTION_CONSTRAINT).len(), 1);
}

#[test]
fn test_unresolvable_template_parameter_is_severe_with_cause() {
    let mut imp = implementation("org.example.Foo");
    imp.source_files = Some(SourceFilesType {
        file: vec![SourceFileType {
            identifier: Some("Default".to_string()),
            template_parameters: vec![TemplateParameter {
                name: "retries".to_string(),
                kind: Some("int".to_string()),
                value: Some("many".to_string()),
            }],
            ..SourceFileType::default()
        }],
        ..SourceFilesType::default()
    });
    let report = validate_model(&ModelContext::new(), &model_with_implementation(imp));

    let severe = details_with(
        &report,
        IMPLEMENTATION_TEMPLATE_PARAMETER_JAVA_VALUE_CONSTRAINT,
    );
    assert_eq!(severe.len(), 1);
    // The nested resolution failure is appended to the message.
    assert!(severe[0].message.contains("retries"));
    assert!(severe[0].message.contains("int"));
}

#[test]
fn test_parameter_validation_can_be_disabled() {
    use crate::config::ATTR_VALIDATE_PARAMETERS;
    use crate::context::AttributeValue;

    let mut imp = implementation("org.example.Foo");
    imp.source_files = Some(SourceFilesType {
        file: vec![SourceFileType {
            template_parameters: vec![TemplateParameter {
                name: "retries".to_string(),
                kind: Some("int".to_string()),
                value: Some("many".to_string()),
            }],
            ..SourceFileType::default()
        }],
        ..SourceFilesType::default()
    });
    let mut ctx = ModelContext::new();
    ctx.set_attribute(ATTR_VALIDATE_PARAMETERS, AttributeValue::Bool(false));
    let report = validate_model(&ctx, &model_with_implementation(imp));
    assert!(report.is_structurally_valid());
}

#[test]
fn test_untyped_parameters_are_not_resolved() {
    let mut imp = implementation("org.example.Foo");
    imp.source_files = Some(SourceFilesType {
        file: vec![SourceFileType {
            template_parameters: vec![TemplateParameter {
                name: "banner".to_string(),
                kind: None,
                value: Some("anything".to_string()),
            }],
            ..SourceFileType::default()
        }],
        ..SourceFilesType::default()
    });
    let report = validate_model(&ModelContext::new(), &model_with_implementation(imp));
    assert!(report.details.is_empty());
}

#[test]
fn test_valid_processed_model_reports_nothing_severe() {
    use crate::processor::SourceFileProcessor;

    let imp = Implementation {
        identifier: "org.example.Foo".to_string(),
        class: Some("org.example.Foo".to_string()),
        class_declaration: Some(true),
        ..Implementation::default()
    };
    let ctx = ModelContext::new();
    let processed = SourceFileProcessor::new()
        .process_model(&ctx, &model_with_implementation(imp))
        .unwrap();
    let report = validate_model(&ctx, &processed);
    assert!(report.is_structurally_valid());
}
