//! Drives the per-language sweeps and assembles the Code Context Graph

use crate::classifier;
use crate::config::ScanConfig;
use crate::dependencies::extract_dependencies;
use crate::languages::{self, LanguageExtractor};
use anyhow::Context;
use codectx_core::{CodeContextGraph, Module, ScanAccumulator, ScanError, ScanResult};
use ignore::{DirEntry, WalkBuilder};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Repository-relative path with `/` separators.
fn rel_path_string(rel: &Path) -> String {
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Builds a [`CodeContextGraph`] for one repository root.
///
/// Every extension of every configured language family gets its own full
/// walk of the tree, in configuration order. Files are visited in file-name
/// order so repeated scans produce identical graphs.
pub struct GraphAssembler {
    root: PathBuf,
    config: ScanConfig,
    extractors: Vec<Box<dyn LanguageExtractor>>,
}

impl GraphAssembler {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::with_config(root, ScanConfig::default())
    }

    pub fn with_config(root: impl AsRef<Path>, config: ScanConfig) -> Self {
        let extractors = languages::registry(&config.languages);
        GraphAssembler {
            root: root.as_ref().to_path_buf(),
            config,
            extractors,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run every sweep, then read dependency manifests.
    ///
    /// Only a missing or unreadable root aborts the scan; individual files
    /// and manifests that fail are logged and skipped.
    pub fn run(&self) -> ScanResult<CodeContextGraph> {
        self.check_root()?;
        info!("Scanning repository: {}", self.root.display());

        let mut acc = ScanAccumulator::new();
        for extractor in &self.extractors {
            for extension in extractor.language().extensions() {
                self.sweep(extractor.as_ref(), extension, &mut acc)?;
            }
        }

        if self.config.include_dependencies {
            acc.set_dependencies(extract_dependencies(&self.root));
        }

        let graph = acc.finish();
        info!(
            "Scanned {} modules, {} nodes, {} dependencies",
            graph.modules.len(),
            graph.nodes.len(),
            graph.dependencies.len()
        );
        Ok(graph)
    }

    fn check_root(&self) -> ScanResult<()> {
        let metadata = std::fs::metadata(&self.root).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ScanError::RootNotFound(self.root.clone()),
            _ => ScanError::Io(e),
        })?;
        if !metadata.is_dir() {
            return Err(ScanError::RootNotDirectory(self.root.clone()));
        }
        std::fs::read_dir(&self.root)?;
        Ok(())
    }

    fn walker(&self) -> ignore::Walk {
        let root = self.root.clone();
        let mut builder = WalkBuilder::new(&self.root);
        builder
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(|a, b| a.cmp(b))
            // Pruning a skipped directory drops exactly the files that
            // `should_skip` would reject one by one.
            .filter_entry(move |entry: &DirEntry| {
                if entry.depth() == 0 || !entry.file_type().is_some_and(|t| t.is_dir()) {
                    return true;
                }
                let rel = entry.path().strip_prefix(&root).unwrap_or(entry.path());
                let dir = format!("{}/", rel_path_string(rel));
                !classifier::should_skip(Path::new(&dir))
            });
        builder.build()
    }

    /// One recursive walk for one extension.
    fn sweep(
        &self,
        extractor: &dyn LanguageExtractor,
        extension: &str,
        acc: &mut ScanAccumulator,
    ) -> ScanResult<()> {
        let language = extractor.language();
        debug!("Sweeping *.{} for {}", extension, language);

        for entry in self.walker() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) if e.depth() == Some(0) => {
                    return Err(ScanError::Walk {
                        path: self.root.clone(),
                        message: e.to_string(),
                    });
                }
                Err(e) => {
                    warn!("Cannot read entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(extension) || !path.is_file() {
                continue;
            }

            let rel = path.strip_prefix(&self.root).unwrap_or(path);
            if !extractor.accepts(rel) {
                continue;
            }

            let rel_path = rel_path_string(rel);
            match Self::extract_file(extractor, path, &rel_path) {
                Ok(Some(module)) => {
                    debug!("{}: {} symbols", rel_path, module.symbol_count());
                    acc.record_module(language, module);
                }
                Ok(None) => debug!("{}: no declarations", rel_path),
                Err(e) => warn!("Error parsing {}: {:#}", rel_path, e),
            }
        }

        Ok(())
    }

    fn extract_file(
        extractor: &dyn LanguageExtractor,
        path: &Path,
        rel_path: &str,
    ) -> anyhow::Result<Option<Module>> {
        let content =
            std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        extractor.extract(rel_path, &content)
    }
}

/// Scan `root` with the default configuration.
pub fn build_code_context_graph(root: impl AsRef<Path>) -> ScanResult<CodeContextGraph> {
    GraphAssembler::new(root).run()
}
