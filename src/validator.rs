//! # Validator Module
//!
//! Structural validation of source-structure declarations in a model.
//!
//! ## Checks Performed
//!
//! 1. **Multiplicity** - at most one bare source file declaration per
//!    specification/implementation; exactly one is reported at INFO for
//!    traceability, more than one is SEVERE
//! 2. **Placement** - source structures attached to modules, dependencies
//!    or messages, and bare sections outside a container, are SEVERE
//! 3. **Non-empty section lists** - an empty `sourceSections` list is
//!    SEVERE, referencing the offending container
//! 4. **Template parameter values** - Java-typed parameter values must
//!    resolve through the context's value resolver; failures are SEVERE
//!    with the nested resolution error appended
//!
//! Validation is advisory: it produces a report of details and never
//! fails by itself. Whether SEVERE details abort a surrounding build is
//! the caller's decision (see [`fail_if_severe`]).
//!
//! ## Usage
//!
//! ```rust,ignore
//! use modelgen::context::ModelContext;
//! use modelgen::validator::validate_model;
//!
//! let report = validate_model(&ModelContext::new(), &model);
//! for detail in &report.details {
//!     eprintln!("[{}] {}: {}", detail.identifier, detail.element, detail.message);
//! }
//! ```

use crate::config;
use crate::context::ModelContext;
use crate::model::{
    Dependency, Implementation, Message, Model, Module, SourceFileType, SourceFilesType,
    SourceSectionType, Specification,
};

#[cfg(test)]
mod tests;

pub const SPECIFICATION_SOURCE_FILE_INFORMATION: &str = "SPECIFICATION_SOURCE_FILE_INFORMATION";
pub const SPECIFICATION_SOURCE_FILE_MULTIPLICITY_CONSTRAINT: &str =
    "SPECIFICATION_SOURCE_FILE_MULTIPLICITY_CONSTRAINT";
pub const SPECIFICATION_SOURCE_SECTION_CONSTRAINT: &str =
    "SPECIFICATION_SOURCE_SECTION_CONSTRAINT";
pub const SPECIFICATION_SOURCE_SECTIONS_CONSTRAINT: &str =
    "SPECIFICATION_SOURCE_SECTIONS_CONSTRAINT";
pub const SPECIFICATION_TEMPLATE_PARAMETER_JAVA_VALUE_CONSTRAINT: &str =
    "SPECIFICATION_TEMPLATE_PARAMETER_JAVA_VALUE_CONSTRAINT";

pub const IMPLEMENTATION_SOURCE_FILE_INFORMATION: &str = "IMPLEMENTATION_SOURCE_FILE_INFORMATION";
pub const IMPLEMENTATION_SOURCE_FILE_MULTIPLICITY_CONSTRAINT: &str =
    "IMPLEMENTATION_SOURCE_FILE_MULTIPLICITY_CONSTRAINT";
pub const IMPLEMENTATION_SOURCE_SECTION_CONSTRAINT: &str =
    "IMPLEMENTATION_SOURCE_SECTION_CONSTRAINT";
pub const IMPLEMENTATION_SOURCE_SECTIONS_CONSTRAINT: &str =
    "IMPLEMENTATION_SOURCE_SECTIONS_CONSTRAINT";
pub const IMPLEMENTATION_TEMPLATE_PARAMETER_JAVA_VALUE_CONSTRAINT: &str =
    "IMPLEMENTATION_TEMPLATE_PARAMETER_JAVA_VALUE_CONSTRAINT";

pub const MODULE_SOURCE_FILE_CONSTRAINT: &str = "MODULE_SOURCE_FILE_CONSTRAINT";
pub const MODULE_SOURCE_FILES_CONSTRAINT: &str = "MODULE_SOURCE_FILES_CONSTRAINT";
pub const MODULE_SOURCE_SECTION_CONSTRAINT: &str = "MODULE_SOURCE_SECTION_CONSTRAINT";
pub const MODULE_SOURCE_SECTIONS_CONSTRAINT: &str = "MODULE_SOURCE_SECTIONS_CONSTRAINT";

pub const DEPENDENCY_SOURCE_FILE_CONSTRAINT: &str = "DEPENDENCY_SOURCE_FILE_CONSTRAINT";
pub const DEPENDENCY_SOURCE_FILES_CONSTRAINT: &str = "DEPENDENCY_SOURCE_FILES_CONSTRAINT";
pub const DEPENDENCY_SOURCE_SECTION_CONSTRAINT: &str = "DEPENDENCY_SOURCE_SECTION_CONSTRAINT";
pub const DEPENDENCY_SOURCE_SECTIONS_CONSTRAINT: &str = "DEPENDENCY_SOURCE_SECTIONS_CONSTRAINT";

pub const MESSAGE_SOURCE_FILE_CONSTRAINT: &str = "MESSAGE_SOURCE_FILE_CONSTRAINT";
pub const MESSAGE_SOURCE_FILES_CONSTRAINT: &str = "MESSAGE_SOURCE_FILES_CONSTRAINT";
pub const MESSAGE_SOURCE_SECTION_CONSTRAINT: &str = "MESSAGE_SOURCE_SECTION_CONSTRAINT";
pub const MESSAGE_SOURCE_SECTIONS_CONSTRAINT: &str = "MESSAGE_SOURCE_SECTIONS_CONSTRAINT";

/// Severity of a validation detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Informational, recorded for traceability
    Info,
    /// Suspicious but not structurally invalid
    Warning,
    /// Structurally invalid; callers typically treat this as a failure
    Severe,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Info => write!(f, "INFO"),
            Severity::Warning => write!(f, "WARNING"),
            Severity::Severe => write!(f, "SEVERE"),
        }
    }
}

/// One validation finding.
#[derive(Debug, Clone)]
pub struct Detail {
    /// Stable constraint identifier (e.g.
    /// `IMPLEMENTATION_SOURCE_FILE_MULTIPLICITY_CONSTRAINT`)
    pub identifier: String,
    pub severity: Severity,
    /// Human-readable description of the finding
    pub message: String,
    /// Path-like reference to the offending element
    /// (e.g. `implementation:org.example.Foo/sourceFiles/file:Default`)
    pub element: String,
}

impl Detail {
    pub fn new(
        identifier: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        element: impl Into<String>,
    ) -> Self {
        Detail {
            identifier: identifier.into(),
            severity,
            message: message.into(),
            element: element.into(),
        }
    }
}

/// Ordered collection of validation details for one model.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub details: Vec<Detail>,
}

impl ValidationReport {
    pub fn severe(&self) -> impl Iterator<Item = &Detail> {
        self.details
            .iter()
            .filter(|d| d.severity == Severity::Severe)
    }

    /// True when no SEVERE detail was recorded.
    pub fn is_structurally_valid(&self) -> bool {
        self.severe().next().is_none()
    }
}

/// Validate the source-structure declarations of a model.
pub fn validate_model(ctx: &ModelContext, model: &Model) -> ValidationReport {
    let mut report = ValidationReport::default();
    let validate_parameters = config::validate_parameters_enabled(ctx);
    for module in &model.modules {
        validate_module(ctx, &mut report, module, validate_parameters);
    }
    report
}

fn validate_module(
    ctx: &ModelContext,
    report: &mut ValidationReport,
    module: &Module,
    validate_parameters: bool,
) {
    let element = format!("module:{}", module.name);
    // Any structure attached to a module itself is misplaced.
    for file in &module.source_file {
        report.details.push(Detail::new(
            MODULE_SOURCE_FILE_CONSTRAINT,
            Severity::Severe,
            format!(
                "Module '{}' declares a source file '{}'; source files are not supported on modules.",
                module.name,
                file.identifier.as_deref().unwrap_or("<unnamed>")
            ),
            &element,
        ));
    }
    if module.source_files.is_some() {
        report.details.push(Detail::new(
            MODULE_SOURCE_FILES_CONSTRAINT,
            Severity::Severe,
            format!(
                "Module '{}' declares source files; source files are not supported on modules.",
                module.name
            ),
            &element,
        ));
    }
    for section in &module.source_section {
        report.details.push(Detail::new(
            MODULE_SOURCE_SECTION_CONSTRAINT,
            Severity::Severe,
            format!(
                "Module '{}' declares a source section '{}'; source sections are not supported on modules.",
                module.name, section.name
            ),
            &element,
        ));
    }
    if module.source_sections.is_some() {
        report.details.push(Detail::new(
            MODULE_SOURCE_SECTIONS_CONSTRAINT,
            Severity::Severe,
            format!(
                "Module '{}' declares source sections; source sections are not supported on modules.",
                module.name
            ),
            &element,
        ));
    }

    for spec in &module.specifications {
        validate_specification(ctx, report, spec, validate_parameters);
    }
    for imp in &module.implementations {
        validate_implementation(ctx, report, imp, validate_parameters);
    }
}

fn validate_specification(
    ctx: &ModelContext,
    report: &mut ValidationReport,
    spec: &Specification,
    validate_parameters: bool,
) {
    let element = format!("specification:{}", spec.identifier);
    validate_bare_files(
        report,
        &spec.source_file,
        &element,
        SPECIFICATION_SOURCE_FILE_INFORMATION,
        SPECIFICATION_SOURCE_FILE_MULTIPLICITY_CONSTRAINT,
    );
    for section in &spec.source_section {
        report.details.push(Detail::new(
            SPECIFICATION_SOURCE_SECTION_CONSTRAINT,
            Severity::Severe,
            format!(
                "Specification '{}' declares a bare source section '{}' outside a section list.",
                spec.identifier, section.name
            ),
            &element,
        ));
    }
    if spec.source_sections.is_some() {
        report.details.push(Detail::new(
            SPECIFICATION_SOURCE_SECTIONS_CONSTRAINT,
            Severity::Severe,
            format!(
                "Specification '{}' declares source sections outside a source file.",
                spec.identifier
            ),
            &element,
        ));
    }
    if let Some(files) = &spec.source_files {
        validate_source_files(
            ctx,
            report,
            files,
            &element,
            SPECIFICATION_SOURCE_SECTIONS_CONSTRAINT,
            SPECIFICATION_TEMPLATE_PARAMETER_JAVA_VALUE_CONSTRAINT,
            validate_parameters,
        );
    }
    for file in &spec.source_file {
        validate_source_file(
            ctx,
            report,
            file,
            &format!("{}/sourceFile", element),
            SPECIFICATION_SOURCE_SECTIONS_CONSTRAINT,
            SPECIFICATION_TEMPLATE_PARAMETER_JAVA_VALUE_CONSTRAINT,
            validate_parameters,
        );
    }
}

fn validate_implementation(
    ctx: &ModelContext,
    report: &mut ValidationReport,
    imp: &Implementation,
    validate_parameters: bool,
) {
    let element = format!("implementation:{}", imp.identifier);
    validate_bare_files(
        report,
        &imp.source_file,
        &element,
        IMPLEMENTATION_SOURCE_FILE_INFORMATION,
        IMPLEMENTATION_SOURCE_FILE_MULTIPLICITY_CONSTRAINT,
    );
    for section in &imp.source_section {
        report.details.push(Detail::new(
            IMPLEMENTATION_SOURCE_SECTION_CONSTRAINT,
            Severity::Severe,
            format!(
                "Implementation '{}' declares a bare source section '{}' outside a section list.",
                imp.identifier, section.name
            ),
            &element,
        ));
    }
    if imp.source_sections.is_some() {
        report.details.push(Detail::new(
            IMPLEMENTATION_SOURCE_SECTIONS_CONSTRAINT,
            Severity::Severe,
            format!(
                "Implementation '{}' declares source sections outside a source file.",
                imp.identifier
            ),
            &element,
        ));
    }
    if let Some(files) = &imp.source_files {
        validate_source_files(
            ctx,
            report,
            files,
            &element,
            IMPLEMENTATION_SOURCE_SECTIONS_CONSTRAINT,
            IMPLEMENTATION_TEMPLATE_PARAMETER_JAVA_VALUE_CONSTRAINT,
            validate_parameters,
        );
    }
    for file in &imp.source_file {
        validate_source_file(
            ctx,
            report,
            file,
            &format!("{}/sourceFile", element),
            IMPLEMENTATION_SOURCE_SECTIONS_CONSTRAINT,
            IMPLEMENTATION_TEMPLATE_PARAMETER_JAVA_VALUE_CONSTRAINT,
            validate_parameters,
        );
    }
    for dependency in &imp.dependencies {
        validate_dependency(report, imp, dependency);
    }
    for message in &imp.messages {
        validate_message(report, imp, message);
    }
}

fn validate_bare_files(
    report: &mut ValidationReport,
    files: &[SourceFileType],
    element: &str,
    information_identifier: &str,
    multiplicity_identifier: &str,
) {
    match files.len() {
        0 => {}
        1 => report.details.push(Detail::new(
            information_identifier,
            Severity::Info,
            format!(
                "Source file '{}' declared at {}.",
                files[0].identifier.as_deref().unwrap_or("<unnamed>"),
                element
            ),
            element,
        )),
        n => report.details.push(Detail::new(
            multiplicity_identifier,
            Severity::Severe,
            format!(
                "{} bare source files declared at {}; at most one is supported.",
                n, element
            ),
            element,
        )),
    }
}

fn validate_dependency(
    report: &mut ValidationReport,
    imp: &Implementation,
    dependency: &Dependency,
) {
    let element = format!(
        "implementation:{}/dependency:{}",
        imp.identifier, dependency.name
    );
    if !dependency.source_file.is_empty() {
        report.details.push(Detail::new(
            DEPENDENCY_SOURCE_FILE_CONSTRAINT,
            Severity::Severe,
            format!(
                "Dependency '{}' declares a source file; source files are not supported on dependencies.",
                dependency.name
            ),
            &element,
        ));
    }
    if dependency.source_files.is_some() {
        report.details.push(Detail::new(
            DEPENDENCY_SOURCE_FILES_CONSTRAINT,
            Severity::Severe,
            format!(
                "Dependency '{}' declares source files; source files are not supported on dependencies.",
                dependency.name
            ),
            &element,
        ));
    }
    if !dependency.source_section.is_empty() {
        report.details.push(Detail::new(
            DEPENDENCY_SOURCE_SECTION_CONSTRAINT,
            Severity::Severe,
            format!(
                "Dependency '{}' declares a source section; source sections are not supported on dependencies.",
                dependency.name
            ),
            &element,
        ));
    }
    if dependency.source_sections.is_some() {
        report.details.push(Detail::new(
            DEPENDENCY_SOURCE_SECTIONS_CONSTRAINT,
            Severity::Severe,
            format!(
                "Dependency '{}' declares source sections; source sections are not supported on dependencies.",
                dependency.name
            ),
            &element,
        ));
    }
}

fn validate_message(report: &mut ValidationReport, imp: &Implementation, message: &Message) {
    let element = format!("implementation:{}/message:{}", imp.identifier, message.name);
    if !message.source_file.is_empty() {
        report.details.push(Detail::new(
            MESSAGE_SOURCE_FILE_CONSTRAINT,
            Severity::Severe,
            format!(
                "Message '{}' declares a source file; source files are not supported on messages.",
                message.name
            ),
            &element,
        ));
    }
    if message.source_files.is_some() {
        report.details.push(Detail::new(
            MESSAGE_SOURCE_FILES_CONSTRAINT,
            Severity::Severe,
            format!(
                "Message '{}' declares source files; source files are not supported on messages.",
                message.name
            ),
            &element,
        ));
    }
    if !message.source_section.is_empty() {
        report.details.push(Detail::new(
            MESSAGE_SOURCE_SECTION_CONSTRAINT,
            Severity::Severe,
            format!(
                "Message '{}' declares a source section; source sections are not supported on messages.",
                message.name
            ),
            &element,
        ));
    }
    if message.source_sections.is_some() {
        report.details.push(Detail::new(
            MESSAGE_SOURCE_SECTIONS_CONSTRAINT,
            Severity::Severe,
            format!(
                "Message '{}' declares source sections; source sections are not supported on messages.",
                message.name
            ),
            &element,
        ));
    }
}

fn validate_source_files(
    ctx: &ModelContext,
    report: &mut ValidationReport,
    files: &SourceFilesType,
    element: &str,
    sections_identifier: &str,
    parameter_identifier: &str,
    validate_parameters: bool,
) {
    for file in &files.file {
        let file_element = format!(
            "{}/sourceFiles/file:{}",
            element,
            file.identifier.as_deref().unwrap_or("<unnamed>")
        );
        validate_source_file(
            ctx,
            report,
            file,
            &file_element,
            sections_identifier,
            parameter_identifier,
            validate_parameters,
        );
    }
}

fn validate_source_file(
    ctx: &ModelContext,
    report: &mut ValidationReport,
    file: &SourceFileType,
    element: &str,
    sections_identifier: &str,
    parameter_identifier: &str,
    validate_parameters: bool,
) {
    if validate_parameters {
        validate_template_parameters(
            ctx,
            report,
            &file.template_parameters,
            element,
            parameter_identifier,
        );
    }
    let Some(sections) = &file.source_sections else {
        return;
    };
    if sections.section.is_empty() {
        report.details.push(Detail::new(
            sections_identifier,
            Severity::Severe,
            "Empty section list; a section list must declare at least one section.",
            element,
        ));
        return;
    }
    for section in &sections.section {
        validate_section(
            ctx,
            report,
            section,
            element,
            sections_identifier,
            parameter_identifier,
            validate_parameters,
        );
    }
}

fn validate_section(
    ctx: &ModelContext,
    report: &mut ValidationReport,
    section: &SourceSectionType,
    parent_element: &str,
    sections_identifier: &str,
    parameter_identifier: &str,
    validate_parameters: bool,
) {
    let element = format!("{}/section:{}", parent_element, section.name);
    if validate_parameters {
        validate_template_parameters(
            ctx,
            report,
            &section.template_parameters,
            &element,
            parameter_identifier,
        );
    }
    let Some(nested) = &section.source_sections else {
        return;
    };
    if nested.section.is_empty() {
        report.details.push(Detail::new(
            sections_identifier,
            Severity::Severe,
            "Empty section list; a section list must declare at least one section.",
            &element,
        ));
        return;
    }
    for child in &nested.section {
        validate_section(
            ctx,
            report,
            child,
            &element,
            sections_identifier,
            parameter_identifier,
            validate_parameters,
        );
    }
}

fn validate_template_parameters(
    ctx: &ModelContext,
    report: &mut ValidationReport,
    parameters: &[crate::model::TemplateParameter],
    element: &str,
    parameter_identifier: &str,
) {
    for parameter in parameters {
        let Some(kind) = parameter.kind.as_deref() else {
            continue;
        };
        if let Err(e) = ctx.resolve_value(kind, parameter.value.as_deref()) {
            report.details.push(Detail::new(
                parameter_identifier,
                Severity::Severe,
                format!(
                    "Template parameter '{}' of type '{}' did not resolve: {}",
                    parameter.name, kind, e
                ),
                element,
            ));
        }
    }
}

/// Print a report grouped by severity.
pub fn print_report(report: &ValidationReport) {
    if report.details.is_empty() {
        println!("✅ No structure findings.");
        return;
    }

    let severe: Vec<_> = report.severe().collect();
    let warnings: Vec<_> = report
        .details
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .collect();
    let infos: Vec<_> = report
        .details
        .iter()
        .filter(|d| d.severity == Severity::Info)
        .collect();

    println!("\n📋 Validation Results:");
    println!(
        "   {} severe, {} warning(s), {} info(s)\n",
        severe.len(),
        warnings.len(),
        infos.len()
    );

    if !severe.is_empty() {
        println!("❌ Severe (must fix):");
        for detail in &severe {
            println!("   [{}] {}", detail.identifier, detail.element);
            println!("      {}", detail.message);
        }
        println!();
    }

    if !warnings.is_empty() {
        println!("⚠️  Warnings:");
        for detail in &warnings {
            println!("   [{}] {}", detail.identifier, detail.element);
            println!("      {}", detail.message);
        }
        println!();
    }

    if !infos.is_empty() {
        println!("ℹ️  Info:");
        for detail in &infos {
            println!("   [{}] {}", detail.identifier, detail.element);
            println!("      {}", detail.message);
        }
        println!();
    }
}

/// Exit with an error code when the report carries SEVERE details.
pub fn fail_if_severe(report: &ValidationReport) {
    if !report.is_structurally_valid() {
        print_report(report);
        std::process::exit(1);
    }
}
