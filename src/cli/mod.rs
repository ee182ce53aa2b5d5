//! # CLI Module
//!
//! The CLI module provides command-line interface functionality for the
//! modelgen source-structure processor.
//!
//! ## Overview
//!
//! The CLI supports:
//! - **Processing** - Attach definitive source structures to a model
//! - **Validation** - Check a model's structure declarations for constraint violations
//! - **Introspection** - Inspect the entities and structures of a model
//!
//! ## Commands
//!
//! ### `process`
//!
//! Run one processing pass over a model document and write the updated
//! model back out:
//!
//! ```bash
//! modelgen process --model model.yaml --output processed.yaml
//! ```
//!
//! Options:
//! - `--model <FILE>` - Path to the model document (required, YAML or JSON)
//! - `--output <FILE>` - Output file; format keyed on extension (default: stdout as YAML)
//! - `--document <FILE>` - Additional model documents merged in before processing (repeatable)
//! - `--config <FILE>` - Path to a `modelgen.toml`; auto-detected next to the model otherwise
//! - `--no-source-processing` - Load and write without attaching structures
//!
//! ### `validate`
//!
//! Validate the structure declarations of a model document:
//!
//! ```bash
//! modelgen validate --model model.yaml --fail-on-severe
//! ```
//!
//! ### `inspect`
//!
//! List modules, specifications and implementations and their attached
//! structures:
//!
//! ```bash
//! modelgen inspect --model model.yaml
//! ```
//!
//! ## Usage from Code
//!
//! ```rust,ignore
//! use modelgen::cli::run_cli;
//!
//! run_cli()?;
//! ```
//!
//! ## Examples
//!
//! ```bash
//! # Process a model and print the result
//! modelgen process --model model.yaml
//!
//! # Merge in a second document before processing
//! modelgen process --model model.yaml --document library-module.yaml
//!
//! # Validate before handing the model to a renderer
//! modelgen validate --model model.yaml --fail-on-severe
//! ```

mod commands;


pub use commands::{run_cli, Cli, Commands};
