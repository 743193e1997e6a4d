//! Language extractors for the supported language families

pub mod javascript;
pub mod python;
pub mod typescript;

use crate::classifier;
use anyhow::Result;
use codectx_core::{Language, Module};
use std::path::Path;

/// Trait for language-specific symbol extractors.
///
/// Extractors are stateless: the result depends only on the path and the
/// content passed in.
pub trait LanguageExtractor {
    /// The family this extractor handles; drives sweeps and counters.
    fn language(&self) -> Language;

    /// Whether a repository-relative path may be handed to [`extract`].
    ///
    /// [`extract`]: LanguageExtractor::extract
    fn accepts(&self, rel_path: &Path) -> bool {
        !classifier::should_skip(rel_path)
    }

    /// Extract the module summary for one file.
    ///
    /// `Ok(None)` means the file produced nothing worth recording; it is
    /// neither stored nor counted. `Err` is a file-level failure.
    fn extract(&self, rel_path: &str, content: &[u8]) -> Result<Option<Module>>;
}

/// Get the extractor for a language family
pub fn get_extractor(language: Language) -> Box<dyn LanguageExtractor> {
    match language {
        Language::Python => Box::new(python::PythonExtractor::new()),
        Language::JavaScript => Box::new(javascript::JavaScriptExtractor),
        Language::TypeScript => Box::new(typescript::TypeScriptExtractor),
    }
}

/// Get the appropriate extractor for a file based on its extension
pub fn extractor_for_path(path: &Path) -> Option<Box<dyn LanguageExtractor>> {
    Language::from_path(path).map(get_extractor)
}

/// Extractors for the requested families, in the given order.
pub fn registry(languages: &[Language]) -> Vec<Box<dyn LanguageExtractor>> {
    languages.iter().copied().map(get_extractor).collect()
}
