//! JavaScript language extractor using text patterns

use super::LanguageExtractor;
use crate::patterns::{ComponentMerge, PatternRule, ScriptPatterns};
use anyhow::Result;
use codectx_core::{Language, Module};
use std::sync::LazyLock;

pub(crate) const IMPORT_PATTERN: &str = r#"import\s+(?:.*?\s+from\s+)?['"]([^'"]+)['"]"#;
pub(crate) const EXPORT_PATTERN: &str =
    r"export\s+(?:default\s+)?(?:class|function|const|let|var|interface|type)\s+(\w+)";
pub(crate) const CLASS_PATTERN: &str = r"(?:export\s+)?class\s+(\w+)";
/// `const Name = (...) => {`, on one line.
pub(crate) const ARROW_COMPONENT_PATTERN: &str = r"(?:export\s+)?(?:const|function)\s+(\w+)\s*[:=].*?=>\s*\{";

static JAVASCRIPT_PATTERNS: LazyLock<ScriptPatterns> = LazyLock::new(|| ScriptPatterns {
    language: Language::JavaScript,
    imports: PatternRule::new("import", IMPORT_PATTERN),
    exports: PatternRule::new("export", EXPORT_PATTERN),
    functions: PatternRule::new("function", r"(?:export\s+)?(?:async\s+)?function\s+(\w+)\s*\("),
    arrow_functions: PatternRule::new(
        "arrow function",
        r"(?:export\s+)?(?:const|let|var)\s+(\w+)\s*=\s*(?:async\s+)?\([^)]*\)\s*=>",
    ),
    classes: PatternRule::new("class", CLASS_PATTERN),
    components: vec![PatternRule::new("arrow component", ARROW_COMPONENT_PATTERN)],
    component_merge: ComponentMerge::Concat,
});

/// Pattern-based extractor for `.js` and `.jsx` files.
#[derive(Debug, Default)]
pub struct JavaScriptExtractor;

impl LanguageExtractor for JavaScriptExtractor {
    fn language(&self) -> Language {
        Language::JavaScript
    }

    fn extract(&self, rel_path: &str, content: &[u8]) -> Result<Option<Module>> {
        let source_code = std::str::from_utf8(content)?;
        Ok(JAVASCRIPT_PATTERNS.extract(rel_path, source_code))
    }
}
