//! Core data structures for the code context graph

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Discriminates what kind of declaration a node represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Class,
    Function,
    /// UI-construction function, recognised by naming convention and shape.
    Component,
}

/// One declared symbol.
///
/// `id` is `"<module_id>.<name>"` and is not unique: nested or redefined
/// declarations with the same name share it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
    /// Owning module id (lookup only).
    pub module: String,
}

impl Node {
    pub fn new(kind: NodeKind, name: impl Into<String>, module_id: &str) -> Self {
        let name = name.into();
        Node {
            id: format!("{}.{}", module_id, name),
            kind,
            name,
            module: module_id.to_string(),
        }
    }
}

/// Language families the scanner understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    JavaScript,
    TypeScript,
}

impl Language {
    /// All families, in sweep order.
    pub const ALL: [Language; 3] = [Language::Python, Language::JavaScript, Language::TypeScript];

    /// Detect language family from file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("py") => Some(Language::Python),
            Some("js") | Some("jsx") => Some(Language::JavaScript),
            Some("ts") | Some("tsx") => Some(Language::TypeScript),
            _ => None,
        }
    }

    /// Key used in `language_stats`.
    pub fn label(&self) -> &'static str {
        match self {
            Language::Python => "Python",
            Language::JavaScript => "JavaScript",
            Language::TypeScript => "TypeScript",
        }
    }

    /// File extensions owned by this family; each one gets its own sweep.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            Language::Python => &["py"],
            Language::JavaScript => &["js", "jsx"],
            Language::TypeScript => &["ts", "tsx"],
        }
    }

    /// Parse a label or lowercase tag (`"Python"`, `"typescript"`, ...).
    pub fn parse(name: &str) -> Option<Self> {
        Language::ALL
            .into_iter()
            .find(|lang| lang.label().eq_ignore_ascii_case(name.trim()))
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Structural summary of one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: String,
    /// Repository-relative, `/`-separated.
    pub path: String,
    /// Absent for Python modules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    pub classes: Vec<Node>,
    pub functions: Vec<Node>,
    pub components: Vec<Node>,
    pub imports: Vec<String>,
    pub exports: Vec<String>,
}

impl Module {
    pub fn new(id: impl Into<String>, path: impl Into<String>, language: Option<Language>) -> Self {
        Module {
            id: id.into(),
            path: path.into(),
            language,
            classes: Vec::new(),
            functions: Vec::new(),
            components: Vec::new(),
            imports: Vec::new(),
            exports: Vec::new(),
        }
    }

    /// True when no class, function or component was recognised.
    pub fn has_no_symbols(&self) -> bool {
        self.classes.is_empty() && self.functions.is_empty() && self.components.is_empty()
    }

    pub fn symbol_count(&self) -> usize {
        self.classes.len() + self.functions.len() + self.components.len()
    }

    /// Nodes in graph order: classes, then functions, then components.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.classes
            .iter()
            .chain(self.functions.iter())
            .chain(self.components.iter())
    }
}

/// Derive a module id from a repository-relative, `/`-separated path.
///
/// Separators become `_` and every occurrence of the family's dotted
/// extensions is removed, in `extensions()` order. Removal is textual, so
/// `App.jsx` yields `Appx` once `.js` is gone.
pub fn module_id(rel_path: &str, language: Language) -> String {
    let mut id = rel_path.replace('/', "_");
    for extension in language.extensions() {
        id = id.replace(&format!(".{}", extension), "");
    }
    id
}

/// Whether a dependency is needed at runtime or only for development.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DependencyKind {
    Dependency,
    DevDependency,
}

/// One externally declared package reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    /// Literal version as declared, or `"latest"`.
    pub version: String,
    #[serde(rename = "type")]
    pub kind: DependencyKind,
}

/// Version recorded when a manifest does not pin one.
pub const LATEST_VERSION: &str = "latest";

impl Dependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>, kind: DependencyKind) -> Self {
        Dependency {
            name: name.into(),
            version: version.into(),
            kind,
        }
    }

    pub fn unpinned(name: impl Into<String>) -> Self {
        Dependency::new(name, LATEST_VERSION, DependencyKind::Dependency)
    }
}

/// Reserved relationship record. No extractor produces edges yet, so the
/// graph's `edges` list is always empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// The aggregate structural inventory of a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeContextGraph {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
    pub modules: BTreeMap<String, Module>,
    pub language_stats: BTreeMap<String, usize>,
    pub dependencies: Vec<Dependency>,
}

impl CodeContextGraph {
    pub fn module(&self, id: &str) -> Option<&Module> {
        self.modules.get(id)
    }

    /// Number of counted files for a language family.
    pub fn files_for(&self, language: Language) -> usize {
        self.language_stats.get(language.label()).copied().unwrap_or(0)
    }

    pub fn nodes_of_kind(&self, kind: NodeKind) -> impl Iterator<Item = &Node> {
        self.nodes.iter().filter(move |n| n.kind == kind)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
