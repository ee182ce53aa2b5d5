use std::path::Path;

use anyhow::Context;

use super::types::Model;

fn is_yaml(path: &Path) -> bool {
    path.extension()
        .map(|s| s == "yaml" || s == "yml")
        .unwrap_or(false)
}

/// Load a model document from a YAML or JSON file, keyed on extension.
pub fn load_model(path: &Path) -> anyhow::Result<Model> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read model document {:?}", path))?;
    let model: Model = if is_yaml(path) {
        serde_yaml::from_str(&content)
            .with_context(|| format!("invalid YAML model document {:?}", path))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("invalid JSON model document {:?}", path))?
    };
    Ok(model)
}

/// Load and merge several model documents into one model.
///
/// Modules sharing a name are merged entity-by-entity in document order;
/// distinct modules are appended. This is how additional documents (for
/// example per-library module descriptors) contribute to one processing
/// pass.
pub fn load_models(paths: &[impl AsRef<Path>]) -> anyhow::Result<Model> {
    let mut merged = Model::default();
    for path in paths {
        let model = load_model(path.as_ref())?;
        merge_into(&mut merged, model);
    }
    Ok(merged)
}

fn merge_into(target: &mut Model, source: Model) {
    for module in source.modules {
        if let Some(existing) = target.modules.iter_mut().find(|m| m.name == module.name) {
            existing.specifications.extend(module.specifications);
            existing.implementations.extend(module.implementations);
        } else {
            target.modules.push(module);
        }
    }
}

/// Write a processed model back out, YAML unless the target has a `.json`
/// extension.
pub fn write_model(path: &Path, model: &Model) -> anyhow::Result<()> {
    let content = if path.extension().map(|s| s == "json").unwrap_or(false) {
        serde_json::to_string_pretty(model)?
    } else {
        serde_yaml::to_string(model)?
    };
    std::fs::write(path, content)
        .with_context(|| format!("failed to write model document {:?}", path))?;
    Ok(())
}
