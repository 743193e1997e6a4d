//! Python language extractor using tree-sitter

use super::LanguageExtractor;
use crate::parser::{self, Grammar};
use anyhow::{Result, bail};
use codectx_core::{Language, Module, Node, NodeKind, module_id};
use std::collections::VecDeque;
use tree_sitter::Node as SyntaxNode;

/// Statements that tree-sitter still accepts but Python 3 rejects.
const PYTHON2_STATEMENTS: &[&str] = &["print_statement", "exec_statement"];

/// One node of the walk, positioned at its depth in Python's own AST.
#[derive(Debug, Clone, Copy)]
enum Step<'t> {
    Node(SyntaxNode<'t>),
    /// An `elif` clause together with the clauses after it: the nested
    /// `if` stored in the enclosing statement's `orelse`.
    Elif(SyntaxNode<'t>),
}

/// Full-grammar extractor. Every parseable file becomes a module, even one
/// without a single class or function.
#[derive(Debug, Default)]
pub struct PythonExtractor;

impl PythonExtractor {
    pub fn new() -> Self {
        PythonExtractor
    }

    fn declared_name<'a>(node: SyntaxNode<'_>, source: &'a [u8]) -> Option<&'a str> {
        node.child_by_field_name("name")?.utf8_text(source).ok()
    }

    /// `async def` is a different statement from `def` and is not recorded.
    fn is_async(node: SyntaxNode<'_>) -> bool {
        node.child(0).is_some_and(|first| first.kind() == "async")
    }

    fn has_python2_statements(root: SyntaxNode<'_>) -> bool {
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if PYTHON2_STATEMENTS.contains(&node.kind()) {
                return true;
            }
            let mut cursor = node.walk();
            stack.extend(node.named_children(&mut cursor));
        }
        false
    }

    /// Push `node`, dissolving tree-sitter wrappers that have no node of
    /// their own in the AST: blocks, `else`/`finally` clauses and the
    /// decorator wrapper around a definition.
    fn push_flattened<'t>(node: SyntaxNode<'t>, out: &mut Vec<Step<'t>>) {
        match node.kind() {
            "block" | "else_clause" | "finally_clause" => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    Self::push_flattened(child, out);
                }
            }
            "decorated_definition" => {
                if let Some(definition) = node.child_by_field_name("definition") {
                    out.push(Step::Node(definition));
                }
            }
            _ => out.push(Step::Node(node)),
        }
    }

    /// The `orelse` part of an `if`: a further `elif` nests one level down,
    /// an `else` body belongs to the statement itself.
    fn push_orelse<'t>(clause: Option<SyntaxNode<'t>>, out: &mut Vec<Step<'t>>) {
        match clause {
            Some(clause) if clause.kind() == "elif_clause" => out.push(Step::Elif(clause)),
            Some(clause) => Self::push_flattened(clause, out),
            None => {}
        }
    }

    fn next_clause(node: SyntaxNode<'_>) -> Option<SyntaxNode<'_>> {
        let mut sibling = node.next_named_sibling();
        while let Some(candidate) = sibling {
            if matches!(candidate.kind(), "elif_clause" | "else_clause") {
                return Some(candidate);
            }
            sibling = candidate.next_named_sibling();
        }
        None
    }

    fn children<'t>(step: Step<'t>) -> Vec<Step<'t>> {
        let mut out = Vec::new();
        match step {
            Step::Node(node) if node.kind() == "if_statement" => {
                let mut first_clause = None;
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    match child.kind() {
                        "elif_clause" | "else_clause" => {
                            first_clause = first_clause.or(Some(child));
                        }
                        _ => Self::push_flattened(child, &mut out),
                    }
                }
                Self::push_orelse(first_clause, &mut out);
            }
            Step::Node(node) => {
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    Self::push_flattened(child, &mut out);
                }
            }
            Step::Elif(clause) => {
                let mut cursor = clause.walk();
                for child in clause.named_children(&mut cursor) {
                    Self::push_flattened(child, &mut out);
                }
                Self::push_orelse(Self::next_clause(clause), &mut out);
            }
        }
        out
    }

    fn extract_imports(node: SyntaxNode<'_>, source: &[u8]) -> Vec<String> {
        let mut imports = Vec::new();

        if node.kind() == "import_statement" {
            let mut cursor = node.walk();
            for child in node.children_by_field_name("name", &mut cursor) {
                let target = match child.kind() {
                    "aliased_import" => child.child_by_field_name("name"),
                    _ => Some(child),
                };
                if let Some(Ok(module)) = target.map(|t| t.utf8_text(source)) {
                    imports.push(module.to_string());
                }
            }
        } else if node.kind() == "import_from_statement" {
            if let Some(module_node) = node.child_by_field_name("module_name") {
                if let Ok(module) = module_node.utf8_text(source) {
                    imports.push(module.to_string());
                }
            }
        }

        imports
    }
}

impl LanguageExtractor for PythonExtractor {
    fn language(&self) -> Language {
        Language::Python
    }

    fn extract(&self, rel_path: &str, content: &[u8]) -> Result<Option<Module>> {
        let source_code = std::str::from_utf8(content)?;
        let parsed = parser::parse(Grammar::Python, source_code.to_string())?;
        if parsed.has_syntax_errors() {
            bail!("invalid Python syntax");
        }
        let root = parsed.tree.root_node();
        if Self::has_python2_statements(root) {
            bail!("invalid Python syntax: Python 2 statement");
        }

        let id = module_id(rel_path, Language::Python);
        let mut module = Module::new(id.clone(), rel_path, None);
        let source = parsed.source();

        // Breadth-first in AST order: nesting depth is irrelevant, a method
        // or inner function is recorded like a top-level one, but siblings
        // keep their relative order whatever wrappers tree-sitter adds.
        let mut queue = VecDeque::from([Step::Node(root)]);
        while let Some(step) = queue.pop_front() {
            if let Step::Node(node) = step {
                match node.kind() {
                    "class_definition" => {
                        if let Some(name) = Self::declared_name(node, source) {
                            module.classes.push(Node::new(NodeKind::Class, name, &id));
                        }
                    }
                    "function_definition" if !Self::is_async(node) => {
                        if let Some(name) = Self::declared_name(node, source) {
                            module.functions.push(Node::new(NodeKind::Function, name, &id));
                        }
                    }
                    _ => module.imports.extend(Self::extract_imports(node, source)),
                }
            }
            queue.extend(Self::children(step));
        }

        Ok(Some(module))
    }
}
