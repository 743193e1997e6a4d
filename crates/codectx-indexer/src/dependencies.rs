//! Declared external dependencies from package manifests

use anyhow::{Context, Result};
use codectx_core::{Dependency, DependencyKind};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, warn};

pub const PACKAGE_JSON: &str = "package.json";
pub const REQUIREMENTS_TXT: &str = "requirements.txt";

/// The parts of `package.json` we read. Map order follows the file.
///
/// Only built from a JSON object: a derived struct deserializer would also
/// read an array positionally.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PackageManifest {
    #[serde(default)]
    dependencies: Map<String, Value>,
    #[serde(default)]
    dev_dependencies: Map<String, Value>,
}

fn version_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse `package.json` content: runtime dependencies first, then
/// development dependencies, each in declaration order.
pub fn parse_package_json(content: &str) -> Result<Vec<Dependency>> {
    let object: Map<String, Value> =
        serde_json::from_str(content).context("package.json is not a JSON object")?;
    let manifest = PackageManifest::deserialize(Value::Object(object))?;

    let runtime = manifest
        .dependencies
        .iter()
        .map(|(name, version)| Dependency::new(name, version_text(version), DependencyKind::Dependency));
    let dev = manifest
        .dev_dependencies
        .iter()
        .map(|(name, version)| Dependency::new(name, version_text(version), DependencyKind::DevDependency));

    Ok(runtime.chain(dev).collect())
}

/// Parse `requirements.txt` content. Only `==` pins are understood; any
/// other requirement line is kept whole with version `latest`.
pub fn parse_requirements(content: &str) -> Vec<Dependency> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(|line| match line.split_once("==") {
            Some((name, version)) => {
                Dependency::new(name.trim(), version.trim(), DependencyKind::Dependency)
            }
            None => Dependency::unpinned(line),
        })
        .collect()
}

fn read_manifest(path: &Path) -> Result<Option<String>> {
    if !path.is_file() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(Some(content))
}

/// Load one manifest; a missing file is not an error, a broken one is
/// logged and contributes nothing.
fn load<F>(root: &Path, file_name: &str, parse: F) -> Vec<Dependency>
where
    F: FnOnce(&str) -> Result<Vec<Dependency>>,
{
    let path = root.join(file_name);
    let parsed = read_manifest(&path).and_then(|content| content.as_deref().map(parse).transpose());

    match parsed {
        Ok(Some(deps)) => {
            debug!("{}: {} dependencies", file_name, deps.len());
            deps
        }
        Ok(None) => Vec::new(),
        Err(e) => {
            warn!("Error reading {}: {:#}", file_name, e);
            Vec::new()
        }
    }
}

/// Collect dependencies declared at the repository root.
pub fn extract_dependencies(root: &Path) -> Vec<Dependency> {
    let mut dependencies = load(root, PACKAGE_JSON, parse_package_json);
    dependencies.extend(load(root, REQUIREMENTS_TXT, |content| Ok(parse_requirements(content))));
    dependencies
}
