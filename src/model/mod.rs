//! # Model Module
//!
//! Declarative module-model parsing and loading for modelgen.
//!
//! ## Overview
//!
//! A model document describes modules, their specifications and
//! implementations, and the source-structure trees (`sourceFiles` /
//! `sourceSections`) attached to them. This module provides:
//!
//! - **[`types`]** - The model entities and the source-structure tree types
//! - **[`load`]** - YAML/JSON document loading, multi-document merging and
//!   model writing
//! - **[`modules`]** - Lookup index over a parsed model plus Java type-name
//!   helpers
//! - **[`inheritance`]** - Ancestor resolution for implementation
//!   inheritance (`extends` edges)
//!
//! ## Tri-state attributes
//!
//! Optional attributes on the structure types are `Option<T>` and are
//! serialized only when present. `None` means "never explicitly assigned",
//! which is distinct from an attribute explicitly set to its default value
//! (for example `optional: false`). The merge engine relies on this
//! distinction to avoid re-overwriting user intent on every regeneration
//! pass. Effective values with schema defaults applied are available
//! through the `is_*()` / `*_level()` accessors.

mod inheritance;
mod load;
mod modules;
mod types;

pub use inheritance::{InheritanceGraph, InheritanceNode};
pub use load::{load_model, load_models, write_model};
pub use modules::{qualified_name, simple_name, source_location, ModuleIndex};
pub use types::*;
