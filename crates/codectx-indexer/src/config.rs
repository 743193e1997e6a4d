//! Scan configuration, optionally loaded from a TOML file

use codectx_core::{Language, ScanError, ScanResult};
use serde::Deserialize;
use std::path::Path;

/// Raw TOML shape. Languages are plain names so typos can be reported.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    languages: Option<Vec<String>>,
    include_dependencies: Option<bool>,
}

/// What a scan covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Families to sweep, in sweep order.
    pub languages: Vec<Language>,
    /// Whether manifests are read after the sweeps.
    pub include_dependencies: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            languages: Language::ALL.to_vec(),
            include_dependencies: true,
        }
    }
}

impl ScanConfig {
    /// Parse TOML such as:
    ///
    /// ```toml
    /// languages = ["Python", "TypeScript"]
    /// include_dependencies = false
    /// ```
    pub fn from_toml_str(content: &str) -> ScanResult<Self> {
        let raw: RawConfig =
            toml::from_str(content).map_err(|e| ScanError::Config(e.to_string()))?;
        let mut config = ScanConfig::default();

        if let Some(names) = raw.languages {
            let mut languages = Vec::with_capacity(names.len());
            for name in &names {
                let language = Language::parse(name)
                    .ok_or_else(|| ScanError::Config(format!("unknown language: {}", name)))?;
                if !languages.contains(&language) {
                    languages.push(language);
                }
            }
            config.languages = languages;
        }
        if let Some(include) = raw.include_dependencies {
            config.include_dependencies = include;
        }

        Ok(config)
    }

    pub fn load(path: &Path) -> ScanResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}
