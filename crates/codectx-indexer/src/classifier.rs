//! File classification: which files are scanned and by which extractor

use codectx_core::Language;
use std::path::Path;

/// Path fragments that mark dependency caches, virtual environments, build
/// output and bytecode caches. Matched as plain substrings of the
/// normalized path.
const SKIP_FRAGMENTS: &[&str] = &[
    "__pycache__",
    "node_modules",
    "/venv/",
    "/.venv/",
    "/dist/",
    "/build/",
];

/// Version-control directory. Must be separator bounded so names such as
/// `.gitignore` or `.github/` are not caught.
const VCS_DIR: &str = ".git";

/// Normalize a path for matching: `/` separators and a leading `/`, so a
/// top-level `build/` directory matches the same fragment as a nested one.
fn normalize(path: &Path) -> String {
    let raw = path.to_string_lossy().replace('\\', "/");
    if raw.starts_with('/') {
        raw
    } else {
        format!("/{}", raw)
    }
}

/// Whether a path must be excluded from scanning.
pub fn should_skip(path: &Path) -> bool {
    let normalized = normalize(path);

    let vcs_segment = format!("/{}/", VCS_DIR);
    let vcs_suffix = format!("/{}", VCS_DIR);
    if normalized.contains(&vcs_segment) || normalized.ends_with(&vcs_suffix) {
        return true;
    }

    SKIP_FRAGMENTS
        .iter()
        .any(|fragment| normalized.contains(fragment))
}

/// TypeScript declaration files carry no implementations.
///
/// A file is a declaration file when its dotted suffixes are exactly
/// `.d.ts`: `index.d.ts` is one, `jquery.min.d.ts` is not. Leading dots of
/// hidden names do not start a suffix.
pub fn is_declaration_file(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.ends_with('.') {
        return false;
    }
    let mut suffixes = name.trim_start_matches('.').split('.').skip(1);
    suffixes.next() == Some("d") && suffixes.next() == Some("ts") && suffixes.next().is_none()
}

/// Decide which language family handles a file, if any.
pub fn classify(path: &Path) -> Option<Language> {
    if should_skip(path) {
        return None;
    }
    let language = Language::from_path(path)?;
    if language == Language::TypeScript && is_declaration_file(path) {
        return None;
    }
    Some(language)
}
