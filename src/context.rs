//! # Context Module
//!
//! Per-call processing context handed to the processor and validator.
//!
//! ## Overview
//!
//! A [`ModelContext`] carries two things:
//!
//! - **Attributes** - a per-call override map checked before the cached
//!   process-wide configuration (see [`crate::config`]). Attribute names
//!   are the `modelgen.*` constants exported by the config module.
//! - **Value resolution** - a [`ValueResolver`] used by the validator to
//!   resolve Java-typed template parameter values. Resolution failures are
//!   non-fatal and surface as report details.

use std::collections::HashMap;

use anyhow::bail;

/// Value of a per-call context attribute.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeValue {
    Bool(bool),
    Str(String),
}

/// A resolved template parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    Boolean(bool),
    Character(char),
    Byte(i8),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Text(String),
}

/// Resolves the runtime value of a typed template parameter.
///
/// The default implementation understands the Java primitive type names,
/// their `java.lang` wrappers and `java.lang.String`. Anything else is a
/// resolution failure.
pub trait ValueResolver {
    fn resolve(&self, kind: &str, value: Option<&str>) -> anyhow::Result<ResolvedValue>;
}

/// Built-in resolver for Java-typed parameter values.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaValueResolver;

impl ValueResolver for JavaValueResolver {
    fn resolve(&self, kind: &str, value: Option<&str>) -> anyhow::Result<ResolvedValue> {
        if kind == "java.lang.String" || kind == "String" {
            return Ok(ResolvedValue::Text(value.unwrap_or_default().to_string()));
        }
        let Some(value) = value else {
            bail!("no value to resolve for type '{}'", kind);
        };
        let resolved = match kind {
            "boolean" | "java.lang.Boolean" => ResolvedValue::Boolean(value.parse()?),
            "char" | "java.lang.Character" => {
                let mut chars = value.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => ResolvedValue::Character(c),
                    _ => bail!("'{}' is not a single character", value),
                }
            }
            "byte" | "java.lang.Byte" => ResolvedValue::Byte(value.parse()?),
            "short" | "java.lang.Short" => ResolvedValue::Short(value.parse()?),
            "int" | "java.lang.Integer" => ResolvedValue::Int(value.parse()?),
            "long" | "java.lang.Long" => ResolvedValue::Long(value.parse()?),
            "float" | "java.lang.Float" => ResolvedValue::Float(value.parse()?),
            "double" | "java.lang.Double" => ResolvedValue::Double(value.parse()?),
            _ => bail!("unsupported template parameter type '{}'", kind),
        };
        Ok(resolved)
    }
}

/// Per-call processing context.
pub struct ModelContext {
    attributes: HashMap<String, AttributeValue>,
    resolver: Box<dyn ValueResolver + Send + Sync>,
}

impl std::fmt::Debug for ModelContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelContext")
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}

impl Default for ModelContext {
    fn default() -> Self {
        ModelContext::new()
    }
}

impl ModelContext {
    pub fn new() -> Self {
        ModelContext {
            attributes: HashMap::new(),
            resolver: Box::new(JavaValueResolver),
        }
    }

    /// Replace the built-in resolver, e.g. with one backed by a custom
    /// type table.
    pub fn with_resolver(resolver: Box<dyn ValueResolver + Send + Sync>) -> Self {
        ModelContext {
            attributes: HashMap::new(),
            resolver,
        }
    }

    pub fn set_attribute(&mut self, name: impl Into<String>, value: AttributeValue) {
        self.attributes.insert(name.into(), value);
    }

    pub fn attribute(&self, name: &str) -> Option<&AttributeValue> {
        self.attributes.get(name)
    }

    pub fn bool_attribute(&self, name: &str) -> Option<bool> {
        match self.attributes.get(name) {
            Some(AttributeValue::Bool(b)) => Some(*b),
            _ => None,
        }
    }

    pub fn str_attribute(&self, name: &str) -> Option<&str> {
        match self.attributes.get(name) {
            Some(AttributeValue::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn resolve_value(
        &self,
        kind: &str,
        value: Option<&str>,
    ) -> anyhow::Result<ResolvedValue> {
        self.resolver.resolve(kind, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolver_primitive_kinds() {
        let r = JavaValueResolver;
        assert_eq!(
            r.resolve("int", Some("42")).unwrap(),
            ResolvedValue::Int(42)
        );
        assert_eq!(
            r.resolve("java.lang.Boolean", Some("true")).unwrap(),
            ResolvedValue::Boolean(true)
        );
        assert_eq!(
            r.resolve("char", Some("x")).unwrap(),
            ResolvedValue::Character('x')
        );
        assert_eq!(
            r.resolve("java.lang.String", None).unwrap(),
            ResolvedValue::Text(String::new())
        );
    }

    #[test]
    fn test_resolver_failures() {
        let r = JavaValueResolver;
        assert!(r.resolve("int", Some("forty-two")).is_err());
        assert!(r.resolve("int", None).is_err());
        assert!(r.resolve("char", Some("xy")).is_err());
        assert!(r
            .resolve("com.example.Custom", Some("v"))
            .unwrap_err()
            .to_string()
            .contains("unsupported"));
    }

    #[test]
    fn test_attribute_lookup() {
        let mut ctx = ModelContext::new();
        ctx.set_attribute("modelgen.source_processing", AttributeValue::Bool(false));
        assert_eq!(ctx.bool_attribute("modelgen.source_processing"), Some(false));
        assert_eq!(ctx.bool_attribute("modelgen.other"), None);
        assert_eq!(ctx.str_attribute("modelgen.source_processing"), None);
    }
}
