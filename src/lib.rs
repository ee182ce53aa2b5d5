//! # modelgen
//!
//! **modelgen** maintains the source-code structure declarations of a
//! modular object model, so that a template-driven renderer can generate
//! and regenerate source files while preserving user-edited regions.
//!
//! ## Overview
//!
//! A model document describes modules of *specifications* (contracts) and
//! *implementations* (realizations). Each specification or implementation
//! that maps to a concrete type may carry a tree of source files and named,
//! possibly nested sections. modelgen's job is to make those trees
//! definitive before rendering:
//!
//! - Entities with no declared structure get a canonical default structure
//!   synthesized from their capabilities (implemented specifications,
//!   dependencies, properties, messages).
//! - User-declared structures are completed from the defaults without
//!   overwriting anything explicitly set, including explicit `false`.
//! - Implementations without their own structure inherit from ancestor
//!   implementations, later ancestors winning, with `final` and `override`
//!   flags honored.
//! - Well-known section names ("License Header", "Constructors",
//!   "Dependencies", ...) receive conventional template, editability,
//!   optionality and indentation defaults.
//!
//! A separate validator checks structure declarations for constraint
//! violations (misplaced structures, bad multiplicity, empty section
//! lists, unresolvable template parameter values) and reports them without
//! failing by itself.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`model`]** - Model document types, loading/merging, name helpers
//!   and the inheritance graph
//! - **[`processor`]** - Structure synthesis, merge policies and
//!   convention defaulting
//! - **[`validator`]** - Structural constraint validation and reporting
//! - **[`context`]** - Per-call attributes and typed value resolution
//! - **[`config`]** - Environment and `modelgen.toml` configuration
//! - **[`cli`]** - `process`, `validate` and `inspect` commands
//!
//! ### Processing Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant User
//!     participant CLI as CLI<br/>(modelgen)
//!     participant Load as model::load_models
//!     participant Proc as SourceFileProcessor
//!     participant Graph as InheritanceGraph
//!     participant Val as validator
//!
//!     User->>CLI: modelgen process --model model.yaml
//!     CLI->>Load: load_models(documents)
//!     Load->>Load: Parse YAML/JSON,<br/>merge modules by name
//!     Load-->>CLI: Model
//!
//!     CLI->>Proc: process_model(ctx, model)
//!     Proc->>Proc: Clone input model
//!     Proc->>Graph: Build inheritance graph<br/>(cycle check)
//!     Proc->>Proc: Synthesize default structures
//!     Proc->>Proc: Merge user structures<br/>(preserve existing)
//!     Proc->>Proc: Overlay ancestor structures<br/>(later wins, final stops)
//!     Proc->>Proc: Mark overriding structures
//!     Proc->>Proc: Fill convention defaults
//!     Proc-->>CLI: Processed model
//!
//!     CLI->>Val: validate_model(ctx, model)
//!     Val-->>CLI: ValidationReport
//!     CLI-->>User: Updated model document
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use modelgen::context::ModelContext;
//! use modelgen::model::load_model;
//! use modelgen::processor::SourceFileProcessor;
//! use modelgen::validator::validate_model;
//! use std::path::Path;
//!
//! let model = load_model(Path::new("model.yaml"))?;
//! let ctx = ModelContext::new();
//!
//! let processed = SourceFileProcessor::new().process_model(&ctx, &model)?;
//!
//! let report = validate_model(&ctx, &processed);
//! assert!(report.is_structurally_valid());
//! ```
//!
//! ## Key Properties
//!
//! - **Pure passes**: `process_model` clones its input and returns the
//!   clone with structures attached; the caller's model is never mutated.
//! - **Idempotent**: processing a processed model changes nothing.
//! - **Tri-state attributes**: `Option<T>` distinguishes "explicitly set"
//!   from "never assigned"; explicit `false` and `""` survive merging.
//! - **Advisory validation**: the validator collects details instead of
//!   failing; SEVERE handling is the caller's decision.
//!
//! ## Configuration
//!
//! Behavior is configured through environment variables
//! (`MODELGEN_SOURCE_PROCESSING`, `MODELGEN_VALIDATE_PARAMETERS`,
//! `MODELGEN_MODEL_SEARCH`, `MODELGEN_HEAD_COMMENT`,
//! `MODELGEN_TAIL_COMMENT`), per-call context attributes with the same
//! names (`modelgen.*`), and an optional `modelgen.toml` sidecar next to
//! the model document. See the [`config`] module for details.
//!
//! ## Binary
//!
//! The CLI is available as the `modelgen` binary:
//!
//! ```bash
//! modelgen process --model model.yaml --output processed.yaml
//! modelgen validate --model model.yaml --fail-on-severe
//! modelgen inspect --model model.yaml
//! ```

pub mod cli;
pub mod config;
pub mod context;
pub mod model;
pub mod processor;
pub mod validator;

pub use context::{AttributeValue, ModelContext, ResolvedValue, ValueResolver};
pub use model::{load_model, load_models, write_model, Model};
pub use processor::{MergePolicy, SourceFileProcessor};
pub use validator::{validate_model, Detail, Severity, ValidationReport};
