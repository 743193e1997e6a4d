//! Text-pattern rules for the pattern-based extractors
//!
//! No grammar is involved: each rule is a regex whose first capture group
//! is the interesting name or specifier. Rules are matched independently
//! against the raw file text, so one declaration can satisfy several rules
//! (an uppercase arrow component is both a function and a component).

use codectx_core::{Language, Module, Node, NodeKind, module_id};
use regex::Regex;

/// One named structural pattern.
#[derive(Debug)]
pub struct PatternRule {
    pub name: &'static str,
    regex: Regex,
}

impl PatternRule {
    pub fn new(name: &'static str, pattern: &str) -> Self {
        PatternRule {
            name,
            regex: Regex::new(pattern).unwrap_or_else(|e| panic!("invalid {} pattern: {}", name, e)),
        }
    }

    /// First capture group of every non-overlapping match, in text order.
    pub fn captures(&self, text: &str) -> Vec<String> {
        self.regex
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

/// How component candidates from several rules are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentMerge {
    /// Concatenate candidates, duplicates included.
    Concat,
    /// Union candidates by name, keeping first-seen order.
    Union,
}

/// The rule set of one script dialect.
#[derive(Debug)]
pub struct ScriptPatterns {
    pub language: Language,
    pub imports: PatternRule,
    pub exports: PatternRule,
    pub functions: PatternRule,
    pub arrow_functions: PatternRule,
    pub classes: PatternRule,
    pub components: Vec<PatternRule>,
    pub component_merge: ComponentMerge,
}

/// Components are recognised by naming convention only.
fn looks_like_component(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

impl ScriptPatterns {
    fn component_candidates(&self, text: &str) -> Vec<String> {
        let mut candidates: Vec<String> = Vec::new();
        for rule in &self.components {
            for name in rule.captures(text) {
                if self.component_merge == ComponentMerge::Union && candidates.contains(&name) {
                    continue;
                }
                candidates.push(name);
            }
        }
        candidates
    }

    /// Apply every rule to `text`.
    ///
    /// Returns `None` when no function, class or component was found, even
    /// if the file has imports or exports.
    pub fn extract(&self, rel_path: &str, text: &str) -> Option<Module> {
        let id = module_id(rel_path, self.language);
        let mut module = Module::new(id.clone(), rel_path, Some(self.language));

        module.imports = self.imports.captures(text);
        module.exports = self.exports.captures(text);

        module.functions = self
            .functions
            .captures(text)
            .into_iter()
            .chain(self.arrow_functions.captures(text))
            .map(|name| Node::new(NodeKind::Function, name, &id))
            .collect();

        module.classes = self
            .classes
            .captures(text)
            .into_iter()
            .map(|name| Node::new(NodeKind::Class, name, &id))
            .collect();

        module.components = self
            .component_candidates(text)
            .into_iter()
            .filter(|name| looks_like_component(name))
            .map(|name| Node::new(NodeKind::Component, name, &id))
            .collect();

        if module.has_no_symbols() {
            return None;
        }
        Some(module)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_captures_in_order_with_duplicates() {
        let rule = PatternRule::new("word", r"let\s+(\w+)");
        assert_eq!(rule.captures("let a; let b; let a;"), vec!["a", "b", "a"]);
    }

    #[test]
    fn test_rule_without_match() {
        let rule = PatternRule::new("word", r"let\s+(\w+)");
        assert!(rule.captures("const x = 1;").is_empty());
    }

    #[test]
    fn test_component_naming_convention() {
        assert!(looks_like_component("Button"));
        assert!(looks_like_component("Ärger"));
        assert!(!looks_like_component("button"));
        assert!(!looks_like_component("_Button"));
        assert!(!looks_like_component(""));
    }
}
