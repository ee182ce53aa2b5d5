use std::collections::HashSet;

use crate::config::ATTR_SOURCE_PROCESSING;
use crate::context::{AttributeValue, ModelContext};
use crate::model::{
    Dependency, Implementation, Model, Module, ModuleIndex, SourceFileType, SourceFilesType,
    SourceSectionType, SourceSectionsType, Specification,
};
use crate::processor::{
    merge_source_files, MergePolicy, SourceFileProcessor, ANNOTATIONS_SECTION,
    CONSTRUCTORS_SECTION, DEFAULT_CONSTRUCTOR_SECTION, DEFAULT_SOURCE_FILE,
    DEPENDENCIES_SECTION, DOCUMENTATION_SECTION, LICENSE_SECTION, MESSAGES_SECTION,
    PROPERTIES_SECTION,
};

fn specification(identifier: &str, class: &str) -> Specification {
    Specification {
        identifier: identifier.to_string(),
        class: Some(class.to_string()),
        class_declaration: Some(true),
        ..Specification::default()
    }
}

fn implementation(identifier: &str, class: &str, implements: &[&str]) -> Implementation {
    Implementation {
        identifier: identifier.to_string(),
        class: Some(class.to_string()),
        class_declaration: Some(true),
        implements: implements.iter().map(|s| s.to_string()).collect(),
        ..Implementation::default()
    }
}

fn model(specifications: Vec<Specification>, implementations: Vec<Implementation>) -> Model {
    Model {
        modules: vec![Module {
            name: "test".to_string(),
            specifications,
            implementations,
            ..Module::default()
        }],
    }
}

fn section_names(files: &SourceFilesType) -> Vec<String> {
    files.file[0]
        .source_sections
        .as_ref()
        .map(|s| s.section.iter().map(|x| x.name.clone()).collect())
        .unwrap_or_default()
}

#[test]
fn test_synthesize_specification_structure() {
    let spec = specification("org.example.Bar", "org.example.Bar");
    let index = ModuleIndex::new(&model(vec![spec.clone()], vec![]));
    let processor = SourceFileProcessor::new();
    let files = processor.synthesize_specification(&ModelContext::new(), &index, &spec);

    assert_eq!(files.file.len(), 1);
    let file = &files.file[0];
    assert_eq!(file.identifier.as_deref(), Some(DEFAULT_SOURCE_FILE));
    assert_eq!(file.location.as_deref(), Some("org/example/Bar.java"));
    assert_eq!(file.template.as_deref(), Some("specification"));
    assert_eq!(file.head_comment.as_deref(), Some("//"));
    assert_eq!(
        section_names(&files),
        vec![LICENSE_SECTION, ANNOTATIONS_SECTION, DOCUMENTATION_SECTION, "Bar"]
    );
    let bar = file.section("Bar").unwrap();
    assert!(bar.is_editable());
    assert_eq!(bar.indentation_level(), 1);
}

#[test]
fn test_synthesize_implementation_section_order() {
    let spec = specification("org.example.Bar", "org.example.Bar");
    let imp = implementation("org.example.Foo", "org.example.Foo", &["org.example.Bar"]);
    let index = ModuleIndex::new(&model(vec![spec], vec![imp.clone()]));
    let processor = SourceFileProcessor::new();
    let files = processor.synthesize_implementation(&ModelContext::new(), &index, &imp);

    assert_eq!(
        section_names(&files),
        vec![
            LICENSE_SECTION,
            ANNOTATIONS_SECTION,
            DOCUMENTATION_SECTION,
            "Bar",
            "Foo",
            CONSTRUCTORS_SECTION,
            DEPENDENCIES_SECTION,
            PROPERTIES_SECTION,
            MESSAGES_SECTION,
        ]
    );
    let file = &files.file[0];
    assert!(file.section(LICENSE_SECTION).unwrap().is_optional());
    assert!(!file.section(ANNOTATIONS_SECTION).unwrap().is_optional());
    let constructors = file.section(CONSTRUCTORS_SECTION).unwrap();
    assert_eq!(constructors.indentation_level(), 1);
    let default_ctor = file.section(DEFAULT_CONSTRUCTOR_SECTION).unwrap();
    assert_eq!(default_ctor.indentation_level(), 2);
    assert!(default_ctor.is_editable());
    // Constructors is optional exactly when no specifications are declared.
    assert!(!constructors.is_optional());
}

#[test]
fn test_synthesize_own_type_not_duplicated() {
    // The implementation class matches the realized specification class,
    // so only one type section appears.
    let spec = specification("org.example.Bar", "org.example.Bar");
    let imp = implementation("org.example.BarImpl", "org.example.Bar", &["org.example.Bar"]);
    let index = ModuleIndex::new(&model(vec![spec], vec![imp.clone()]));
    let files = SourceFileProcessor::new().synthesize_implementation(
        &ModelContext::new(),
        &index,
        &imp,
    );
    let names = section_names(&files);
    assert_eq!(names.iter().filter(|n| *n == "Bar").count(), 1);
}

#[test]
fn test_synthesize_unresolvable_class_has_no_location() {
    let mut imp = implementation("org.example.Foo", "org.example.Foo", &[]);
    imp.class = Some("not a class name".to_string());
    let index = ModuleIndex::new(&model(vec![], vec![imp.clone()]));
    let files = SourceFileProcessor::new().synthesize_implementation(
        &ModelContext::new(),
        &index,
        &imp,
    );
    assert_eq!(files.file[0].location, None);
    // No type section, the other sections are still synthesized.
    assert!(section_names(&files).contains(&CONSTRUCTORS_SECTION.to_string()));
}

#[test]
fn test_convention_defaulting_dependencies_optionality() {
    let mut imp = implementation("org.example.Foo", "org.example.Foo", &[]);
    let index = ModuleIndex::new(&model(vec![], vec![imp.clone()]));
    let ctx = ModelContext::new();
    let processor = SourceFileProcessor::new();

    let files = processor.synthesize_implementation(&ctx, &index, &imp);
    assert!(files.file[0].section(DEPENDENCIES_SECTION).unwrap().is_optional());

    imp.dependencies.push(Dependency {
        name: "logger".to_string(),
        ..Dependency::default()
    });
    let index = ModuleIndex::new(&model(vec![], vec![imp.clone()]));
    let files = processor.synthesize_implementation(&ctx, &index, &imp);
    assert!(!files.file[0].section(DEPENDENCIES_SECTION).unwrap().is_optional());
}

#[test]
fn test_merge_preserve_existing_keeps_explicit_values() {
    let mut target = SourceFilesType {
        file: vec![SourceFileType {
            identifier: Some(DEFAULT_SOURCE_FILE.to_string()),
            head_comment: Some("/* X */".to_string()),
            ..SourceFileType::default()
        }],
        ..SourceFilesType::default()
    };
    let source = SourceFilesType {
        file: vec![SourceFileType {
            identifier: Some(DEFAULT_SOURCE_FILE.to_string()),
            head_comment: Some("//".to_string()),
            template: Some("implementation".to_string()),
            ..SourceFileType::default()
        }],
        ..SourceFilesType::default()
    };
    merge_source_files(&mut target, &source, MergePolicy::PreserveExisting);
    assert_eq!(target.file[0].head_comment.as_deref(), Some("/* X */"));
    assert_eq!(target.file[0].template.as_deref(), Some("implementation"));
}

#[test]
fn test_merge_preserve_existing_keeps_explicit_false() {
    // An explicitly-false flag is not the same as an unset flag.
    let mut target_section = SourceSectionType::named(LICENSE_SECTION);
    target_section.optional = Some(false);
    let mut source_section = SourceSectionType::named(LICENSE_SECTION);
    source_section.optional = Some(true);
    source_section.editable = Some(true);

    let mut target = SourceSectionsType {
        section: vec![target_section],
    };
    let source = SourceSectionsType {
        section: vec![source_section],
    };
    super::merge_sections(&mut target, &source, MergePolicy::PreserveExisting);
    assert_eq!(target.section[0].optional, Some(false));
    assert_eq!(target.section[0].editable, Some(true));
}

#[test]
fn test_merge_overwrite_replaces_only_explicit_source_attributes() {
    let mut target_section = SourceSectionType::named("Bar");
    target_section.editable = Some(true);
    target_section.indentation_level = Some(1);
    let mut source_section = SourceSectionType::named("Bar");
    source_section.indentation_level = Some(3);

    super::merge_section(&mut target_section, &source_section, MergePolicy::Overwrite);
    assert_eq!(target_section.indentation_level, Some(3));
    // The source never set editable, so the target keeps it.
    assert_eq!(target_section.editable, Some(true));
}

#[test]
fn test_merge_appends_source_only_sections() {
    let mut target = SourceSectionsType {
        section: vec![SourceSectionType::named("Bar")],
    };
    let source = SourceSectionsType {
        section: vec![
            SourceSectionType::named("Bar"),
            SourceSectionType::named(MESSAGES_SECTION),
        ],
    };
    super::merge_sections(&mut target, &source, MergePolicy::Overwrite);
    assert_eq!(target.section.len(), 2);
    assert_eq!(target.section[1].name, MESSAGES_SECTION);
}

#[test]
fn test_apply_defaults_is_idempotent() {
    let imp = implementation("org.example.Foo", "org.example.Foo", &[]);
    let index = ModuleIndex::new(&model(vec![], vec![imp.clone()]));
    let ctx = ModelContext::new();
    let processor = SourceFileProcessor::new();
    let scx = super::SectionContext::for_implementation(&index, &imp);

    let mut files = processor.synthesize_implementation(&ctx, &index, &imp);
    let before = files.clone();
    processor.apply_defaults(&ctx, &scx, &mut files);
    assert_eq!(before, files);
}

#[test]
fn test_process_model_attaches_structure_to_declaring_entities() {
    let spec = specification("org.example.Bar", "org.example.Bar");
    let imp = implementation("org.example.Foo", "org.example.Foo", &["org.example.Bar"]);
    let input = model(vec![spec], vec![imp]);
    let processed = SourceFileProcessor::new()
        .process_model(&ModelContext::new(), &input)
        .unwrap();

    // The input model is not mutated.
    assert!(input.modules[0].implementations[0].source_files.is_none());
    let imp = &processed.modules[0].implementations[0];
    let files = imp.source_files.as_ref().unwrap();
    assert_eq!(files.file.len(), 1);
    let spec = &processed.modules[0].specifications[0];
    assert!(spec.source_files.is_some());
}

#[test]
fn test_process_model_skips_non_declaring_entities() {
    let mut imp = implementation("org.example.Foo", "org.example.Foo", &[]);
    imp.class_declaration = Some(false);
    let processed = SourceFileProcessor::new()
        .process_model(&ModelContext::new(), &model(vec![], vec![imp]))
        .unwrap();
    assert!(processed.modules[0].implementations[0].source_files.is_none());
}

#[test]
fn test_process_model_disabled_returns_input_unchanged() {
    let imp = implementation("org.example.Foo", "org.example.Foo", &[]);
    let input = model(vec![], vec![imp]);
    let mut ctx = ModelContext::new();
    ctx.set_attribute(ATTR_SOURCE_PROCESSING, AttributeValue::Bool(false));
    let processed = SourceFileProcessor::new().process_model(&ctx, &input).unwrap();
    assert_eq!(processed, input);
}

#[test]
fn test_process_model_is_idempotent() {
    let spec = specification("org.example.Bar", "org.example.Bar");
    let imp = implementation("org.example.Foo", "org.example.Foo", &["org.example.Bar"]);
    let input = model(vec![spec], vec![imp]);
    let processor = SourceFileProcessor::new();
    let ctx = ModelContext::new();
    let once = processor.process_model(&ctx, &input).unwrap();
    let twice = processor.process_model(&ctx, &once).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_ancestor_overwrite_last_ancestor_wins() {
    let mut grandparent = implementation("org.example.A", "org.example.A", &[]);
    grandparent.source_files = Some(SourceFilesType {
        file: vec![SourceFileType {
            identifier: Some(DEFAULT_SOURCE_FILE.to_string()),
            template: Some("from-a".to_string()),
            head_comment: Some("/* a */".to_string()),
            ..SourceFileType::default()
        }],
        ..SourceFilesType::default()
    });
    let mut parent = implementation("org.example.B", "org.example.B", &[]);
    parent.extends = vec!["org.example.A".to_string()];
    parent.source_files = Some(SourceFilesType {
        file: vec![SourceFileType {
            identifier: Some(DEFAULT_SOURCE_FILE.to_string()),
            template: Some("from-b".to_string()),
            ..SourceFileType::default()
        }],
        ..SourceFilesType::default()
    });
    let mut child = implementation("org.example.C", "org.example.C", &[]);
    child.extends = vec!["org.example.B".to_string()];

    let processed = SourceFileProcessor::new()
        .process_model(
            &ModelContext::new(),
            &model(vec![], vec![grandparent, parent, child]),
        )
        .unwrap();
    let child = processed.modules[0]
        .implementations
        .iter()
        .find(|i| i.identifier == "org.example.C")
        .unwrap();
    let file = &child.source_files.as_ref().unwrap().file[0];
    // Nearest declaring ancestor was applied last and wins.
    assert_eq!(file.template.as_deref(), Some("from-b"));
    // Attributes only the farther ancestor set still propagate.
    assert_eq!(file.head_comment.as_deref(), Some("/* a */"));
}

#[test]
fn test_final_ancestor_suppresses_attachment() {
    let mut parent = implementation("org.example.A", "org.example.A", &[]);
    parent.source_files = Some(SourceFilesType {
        final_: Some(true),
        ..SourceFilesType::default()
    });
    let mut child = implementation("org.example.B", "org.example.B", &[]);
    child.extends = vec!["org.example.A".to_string()];

    let processed = SourceFileProcessor::new()
        .process_model(&ModelContext::new(), &model(vec![], vec![parent, child]))
        .unwrap();
    let child = processed.modules[0]
        .implementations
        .iter()
        .find(|i| i.identifier == "org.example.B")
        .unwrap();
    assert!(child.source_files.is_none());
}

#[test]
fn test_pass_two_marks_override() {
    let mut grandparent = implementation("org.example.A", "org.example.A", &[]);
    grandparent.source_files = Some(SourceFilesType::default());
    let mut parent = implementation("org.example.B", "org.example.B", &[]);
    parent.extends = vec!["org.example.A".to_string()];
    parent.source_files = Some(SourceFilesType::default());
    let mut child = implementation("org.example.C", "org.example.C", &[]);
    child.extends = vec!["org.example.B".to_string()];

    let processed = SourceFileProcessor::new()
        .process_model(
            &ModelContext::new(),
            &model(vec![], vec![grandparent, parent, child]),
        )
        .unwrap();
    let by_id = |id: &str| {
        processed.modules[0]
            .implementations
            .iter()
            .find(|i| i.identifier == id)
            .unwrap()
            .clone()
    };
    // The child inherits a structure whose nearer ancestor overrides the
    // farther one.
    assert!(by_id("org.example.C").source_files.unwrap().is_override());
    // User-declared structures are left alone by pass two.
    assert!(!by_id("org.example.B").source_files.unwrap().is_override());
}

#[test]
fn test_bare_source_file_is_filled_not_replaced() {
    let mut imp = implementation("org.example.Foo", "org.example.Foo", &[]);
    imp.source_file = vec![SourceFileType {
        identifier: Some("Custom".to_string()),
        head_comment: Some("/* custom */".to_string()),
        ..SourceFileType::default()
    }];
    let processed = SourceFileProcessor::new()
        .process_model(&ModelContext::new(), &model(vec![], vec![imp]))
        .unwrap();
    let imp = &processed.modules[0].implementations[0];
    // A bare declaration counts as a user structure: no SourceFilesType is
    // synthesized next to it.
    assert!(imp.source_files.is_none());
    let file = &imp.source_file[0];
    assert_eq!(file.identifier.as_deref(), Some("Custom"));
    assert_eq!(file.head_comment.as_deref(), Some("/* custom */"));
    assert_eq!(file.template.as_deref(), Some("implementation"));
    assert_eq!(file.location.as_deref(), Some("org/example/Foo.java"));
}

#[test]
fn test_user_declared_set_tracked_per_identifier() {
    let mut declared = implementation("org.example.A", "org.example.A", &[]);
    declared.source_files = Some(SourceFilesType::default());
    let synthesized = implementation("org.example.B", "org.example.B", &[]);

    let index = ModuleIndex::new(&model(vec![], vec![declared.clone(), synthesized.clone()]));
    let graph = crate::model::InheritanceGraph::new(&index).unwrap();
    let processor = SourceFileProcessor::new();
    let ctx = ModelContext::new();
    let mut user_declared = HashSet::new();
    let mut declared = declared;
    let mut synthesized = synthesized;
    processor.process_implementation(&ctx, &index, &graph, &mut declared, &mut user_declared);
    processor.process_implementation(&ctx, &index, &graph, &mut synthesized, &mut user_declared);
    assert!(user_declared.contains("org.example.A"));
    assert!(!user_declared.contains("org.example.B"));
}
