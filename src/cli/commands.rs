use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::{debug, info};

use crate::config::{self, FileConfig, ATTR_SOURCE_PROCESSING};
use crate::context::{AttributeValue, ModelContext};
use crate::model::{load_model, load_models, write_model, Model};
use crate::processor::SourceFileProcessor;
use crate::validator;

/// Command-line interface for modelgen
///
/// Provides commands for processing, validating and inspecting model
/// documents.
#[derive(Parser)]
#[command(name = "modelgen")]
#[command(about = "modelgen CLI", long_about = None)]
pub struct Cli {
    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands for modelgen
#[derive(Subcommand)]
pub enum Commands {
    /// Attach definitive source structures to a model document
    Process {
        /// Path to the model document (YAML or JSON)
        #[arg(short, long)]
        model: PathBuf,

        /// Output file; format keyed on extension (default: stdout as YAML)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Additional model documents merged in before processing
        #[arg(short, long, num_args = 1..)]
        document: Vec<PathBuf>,

        /// Path to a modelgen.toml configuration file
        /// If not provided, will auto-detect alongside the model document
        #[arg(long)]
        config: Option<PathBuf>,

        /// Load and write the model without attaching structures
        #[arg(long, default_value_t = false)]
        no_source_processing: bool,
    },
    /// Validate the structure declarations of a model document
    ///
    /// Checks the model for constraint violations:
    /// - At most one bare source file per entity
    /// - Structures misplaced on modules, dependencies or messages
    /// - Empty section lists
    /// - Unresolvable Java-typed template parameter values
    Validate {
        /// Path to the model document (YAML or JSON)
        #[arg(short, long)]
        model: PathBuf,

        /// Exit with an error code if any SEVERE details are found
        #[arg(long, default_value_t = false)]
        fail_on_severe: bool,

        /// Show only SEVERE details (hide warnings and info)
        #[arg(long, default_value_t = false)]
        severe_only: bool,
    },
    /// List the entities of a model and their attached structures
    Inspect {
        /// Path to the model document (YAML or JSON)
        #[arg(short, long)]
        model: PathBuf,
    },
}

/// Execute the CLI command provided by the user
///
/// # Errors
///
/// Returns an error if:
/// - A model document cannot be loaded or parsed
/// - The configuration file is invalid
/// - The inheritance graph of the model contains a cycle
/// - The output file cannot be written
pub fn run_cli() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Process {
            model,
            output,
            document,
            config,
            no_source_processing,
        } => {
            let mut ctx = ModelContext::new();
            if *no_source_processing {
                ctx.set_attribute(ATTR_SOURCE_PROCESSING, AttributeValue::Bool(false));
            }

            let loaded = load_documents(&ctx, model, document)?;

            let config_path = config
                .clone()
                .or_else(|| FileConfig::auto_detect(model.as_path()));
            let processor = match config_path {
                Some(path) => {
                    debug!(config = %path.display(), "loading configuration");
                    SourceFileProcessor::from_file_config(&FileConfig::load(&path)?)
                }
                None => SourceFileProcessor::new(),
            };

            let processed = processor.process_model(&ctx, &loaded)?;
            match output {
                Some(path) => {
                    write_model(path.as_path(), &processed)?;
                    info!(output = %path.display(), "wrote processed model");
                }
                None => print!("{}", serde_yaml::to_string(&processed)?),
            }
            Ok(())
        }
        Commands::Validate {
            model,
            fail_on_severe,
            severe_only,
        } => {
            let ctx = ModelContext::new();
            let loaded = load_model(model.as_path())?;
            let report = validator::validate_model(&ctx, &loaded);

            if *severe_only {
                let severe = validator::ValidationReport {
                    details: report.severe().cloned().collect(),
                };
                validator::print_report(&severe);
                if *fail_on_severe {
                    validator::fail_if_severe(&severe);
                }
            } else {
                validator::print_report(&report);
                if *fail_on_severe {
                    validator::fail_if_severe(&report);
                }
            }

            Ok(())
        }
        Commands::Inspect { model } => {
            let loaded = load_model(model.as_path())?;
            print_inspection(&loaded);
            Ok(())
        }
    }
}

/// Load the main model document plus any explicitly listed documents,
/// plus sibling module documents when model search is enabled.
fn load_documents(
    ctx: &ModelContext,
    model: &Path,
    documents: &[PathBuf],
) -> anyhow::Result<Model> {
    let mut paths: Vec<PathBuf> = vec![model.to_path_buf()];
    paths.extend(documents.iter().cloned());
    if config::model_search_enabled(ctx) {
        for sibling in sibling_module_documents(model)? {
            if !paths.contains(&sibling) {
                debug!(document = %sibling.display(), "picked up sibling module document");
                paths.push(sibling);
            }
        }
    }
    load_models(&paths)
}

/// Module documents next to the main document, recognized by a
/// `-module.{yaml,yml,json}` suffix. Sorted by name for deterministic
/// merge order.
fn sibling_module_documents(model: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let Some(parent) = model.parent().filter(|p| p.is_dir()) else {
        return Ok(Vec::new());
    };
    let mut found = Vec::new();
    for entry in std::fs::read_dir(parent)? {
        let path = entry?.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.ends_with("-module.yaml")
            || name.ends_with("-module.yml")
            || name.ends_with("-module.json")
        {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

fn print_inspection(model: &Model) {
    for module in &model.modules {
        println!("📦 module {}", module.name);
        for spec in &module.specifications {
            println!("   📄 specification {}", spec.identifier);
            if let Some(class) = &spec.class {
                println!("      class: {}", class);
            }
            print_structures(spec.source_files.as_ref(), spec.source_file.len());
        }
        for imp in &module.implementations {
            println!("   🔧 implementation {}", imp.identifier);
            if let Some(class) = &imp.class {
                println!("      class: {}", class);
            }
            if !imp.implements.is_empty() {
                println!("      implements: {}", imp.implements.join(", "));
            }
            if !imp.extends.is_empty() {
                println!("      extends: {}", imp.extends.join(", "));
            }
            print_structures(imp.source_files.as_ref(), imp.source_file.len());
        }
    }
}

fn print_structures(files: Option<&crate::model::SourceFilesType>, bare: usize) {
    if let Some(files) = files {
        for file in &files.file {
            println!(
                "      🗎 source file {} -> {}",
                file.identifier.as_deref().unwrap_or("<unnamed>"),
                file.location.as_deref().unwrap_or("<no location>")
            );
            if let Some(sections) = &file.source_sections {
                for section in &sections.section {
                    print_section(section, 9);
                }
            }
        }
    }
    if bare > 0 {
        println!("      🗎 {} bare source file(s)", bare);
    }
}

fn print_section(section: &crate::model::SourceSectionType, indent: usize) {
    let mut flags = Vec::new();
    if section.is_editable() {
        flags.push("editable");
    }
    if section.is_optional() {
        flags.push("optional");
    }
    let suffix = if flags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", flags.join(", "))
    };
    println!("{:indent$}§ {}{}", "", section.name, suffix, indent = indent);
    if let Some(nested) = &section.source_sections {
        for child in &nested.section {
            print_section(child, indent + 3);
        }
    }
}
