//! # Configuration Module
//!
//! Process-wide configuration for modelgen's processing behavior.
//!
//! ## Overview
//!
//! Configuration comes from three places, checked in this order:
//!
//! 1. Per-call context attributes on a [`crate::context::ModelContext`]
//! 2. The cached process-wide defaults seeded from environment variables
//! 3. Built-in defaults
//!
//! The environment is read once and cached; later environment changes are
//! not observed. Callers must not mutate context attributes concurrently
//! with active processing.
//!
//! ## Environment Variables
//!
//! ### `MODELGEN_SOURCE_PROCESSING`
//!
//! Enables or disables source structure processing entirely
//! (default: enabled). When disabled, `process_model` returns its input
//! unchanged.
//!
//! ### `MODELGEN_VALIDATE_PARAMETERS`
//!
//! Enables or disables resolution of Java-typed template parameter values
//! during validation (default: enabled).
//!
//! ### `MODELGEN_MODEL_SEARCH`
//!
//! Enables or disables picking up sibling model documents next to the main
//! document (default: enabled).
//!
//! ### `MODELGEN_HEAD_COMMENT` / `MODELGEN_TAIL_COMMENT`
//!
//! Default head/tail comment strings for generated source files
//! (defaults: `//` and empty). An empty string means "unset".

use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

use anyhow::Context;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::context::ModelContext;

/// Context attribute enabling/disabling source structure processing.
pub const ATTR_SOURCE_PROCESSING: &str = "modelgen.source_processing";
/// Context attribute enabling/disabling template parameter value checks.
pub const ATTR_VALIDATE_PARAMETERS: &str = "modelgen.validate_parameters";
/// Context attribute enabling/disabling sibling model document search.
pub const ATTR_MODEL_SEARCH: &str = "modelgen.model_search";
/// Context attribute overriding the default head comment string.
pub const ATTR_HEAD_COMMENT: &str = "modelgen.head_comment";
/// Context attribute overriding the default tail comment string.
pub const ATTR_TAIL_COMMENT: &str = "modelgen.tail_comment";

/// File name of the optional tool configuration sidecar.
pub const CONFIG_FILE_NAME: &str = "modelgen.toml";

/// Process-wide defaults loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ToolsConfig {
    pub source_processing: bool,
    pub validate_parameters: bool,
    pub model_search: bool,
    pub default_head_comment: String,
    pub default_tail_comment: String,
}

static GLOBAL: Lazy<ToolsConfig> = Lazy::new(ToolsConfig::from_env);

pub(crate) fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_bool(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .as_deref()
        .and_then(parse_bool)
        .unwrap_or(default)
}

impl ToolsConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        ToolsConfig {
            source_processing: env_bool("MODELGEN_SOURCE_PROCESSING", true),
            validate_parameters: env_bool("MODELGEN_VALIDATE_PARAMETERS", true),
            model_search: env_bool("MODELGEN_MODEL_SEARCH", true),
            default_head_comment: env::var("MODELGEN_HEAD_COMMENT")
                .unwrap_or_else(|_| "//".to_string()),
            default_tail_comment: env::var("MODELGEN_TAIL_COMMENT").unwrap_or_default(),
        }
    }

    /// The cached process-wide configuration, read once from the
    /// environment.
    pub fn global() -> &'static ToolsConfig {
        &GLOBAL
    }
}

/// Effective source-processing switch: context attribute, then cached env.
pub fn source_processing_enabled(ctx: &ModelContext) -> bool {
    ctx.bool_attribute(ATTR_SOURCE_PROCESSING)
        .unwrap_or(ToolsConfig::global().source_processing)
}

/// Effective parameter-validation switch.
pub fn validate_parameters_enabled(ctx: &ModelContext) -> bool {
    ctx.bool_attribute(ATTR_VALIDATE_PARAMETERS)
        .unwrap_or(ToolsConfig::global().validate_parameters)
}

/// Effective sibling-document search switch.
pub fn model_search_enabled(ctx: &ModelContext) -> bool {
    ctx.bool_attribute(ATTR_MODEL_SEARCH)
        .unwrap_or(ToolsConfig::global().model_search)
}

fn normalize(value: Option<&str>) -> Option<String> {
    value.filter(|s| !s.is_empty()).map(str::to_string)
}

/// Process-wide default head comment, empty normalized to `None`.
pub fn default_head_comment(ctx: &ModelContext) -> Option<String> {
    normalize(ctx.str_attribute(ATTR_HEAD_COMMENT))
        .or_else(|| normalize(Some(&ToolsConfig::global().default_head_comment)))
}

/// Process-wide default tail comment, empty normalized to `None`.
pub fn default_tail_comment(ctx: &ModelContext) -> Option<String> {
    normalize(ctx.str_attribute(ATTR_TAIL_COMMENT))
        .or_else(|| normalize(Some(&ToolsConfig::global().default_tail_comment)))
}

/// Tool configuration loaded from a `modelgen.toml` sidecar file.
///
/// Sits alongside the model document and configures the processor
/// instance: comment strings and canonical template-name overrides.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Instance-level default head comment for generated files.
    pub head_comment: Option<String>,
    /// Instance-level default tail comment for generated files.
    pub tail_comment: Option<String>,
    /// Canonical template-name overrides, keyed by template role
    /// (e.g. `license`, `constructors-head`, `implementation`).
    pub templates: HashMap<String, String>,
}

impl FileConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {:?}", path))?;
        let config: FileConfig = toml::from_str(&content)
            .with_context(|| format!("invalid config file {:?}", path))?;
        Ok(config)
    }

    /// Look for a `modelgen.toml` next to the model document.
    pub fn auto_detect(model_path: &Path) -> Option<PathBuf> {
        let candidate = model_path.parent()?.join(CONFIG_FILE_NAME);
        candidate.exists().then_some(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("ON"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_context_attribute_overrides_global() {
        use crate::context::AttributeValue;
        let mut ctx = ModelContext::new();
        ctx.set_attribute(ATTR_SOURCE_PROCESSING, AttributeValue::Bool(false));
        assert!(!source_processing_enabled(&ctx));
        ctx.set_attribute(ATTR_HEAD_COMMENT, AttributeValue::Str("#".to_string()));
        assert_eq!(default_head_comment(&ctx).as_deref(), Some("#"));
        // Empty string normalizes to unset at the attribute tier, which
        // falls through to the process-wide default.
        ctx.set_attribute(ATTR_HEAD_COMMENT, AttributeValue::Str(String::new()));
        assert_eq!(
            default_head_comment(&ctx),
            Some(ToolsConfig::global().default_head_comment.clone())
                .filter(|s| !s.is_empty())
        );
    }

    #[test]
    fn test_file_config_parse() {
        let config: FileConfig = toml::from_str(
            r#"
head_comment = "/*"
[templates]
license = "corporate-license"
"#,
        )
        .unwrap();
        assert_eq!(config.head_comment.as_deref(), Some("/*"));
        assert_eq!(
            config.templates.get("license").map(String::as_str),
            Some("corporate-license")
        );
        assert_eq!(config.tail_comment, None);
    }
}
