//! Mutable accumulator that builds a `CodeContextGraph` during one scan

use crate::model::*;
use tracing::debug;

/// Running state of a single scan. Owned by the caller and consumed by
/// [`ScanAccumulator::finish`]; nothing survives between scans.
#[derive(Debug, Default)]
pub struct ScanAccumulator {
    graph: CodeContextGraph,
}

impl ScanAccumulator {
    pub fn new() -> Self {
        ScanAccumulator {
            graph: CodeContextGraph::default(),
        }
    }

    /// Merge one extracted module.
    ///
    /// The module replaces any earlier module with the same id, its symbols
    /// are appended to the flat node list (classes, functions, components)
    /// and the family's file counter goes up by one.
    pub fn record_module(&mut self, language: Language, module: Module) {
        self.graph.nodes.extend(module.nodes().cloned());
        *self
            .graph
            .language_stats
            .entry(language.label().to_string())
            .or_insert(0) += 1;

        if let Some(previous) = self.graph.modules.insert(module.id.clone(), module) {
            debug!("Module id {} overwritten (was {})", previous.id, previous.path);
        }
    }

    pub fn set_dependencies(&mut self, dependencies: Vec<Dependency>) {
        self.graph.dependencies = dependencies;
    }

    pub fn module_count(&self) -> usize {
        self.graph.modules.len()
    }

    pub fn node_count(&self) -> usize {
        self.graph.nodes.len()
    }

    pub fn files_for(&self, language: Language) -> usize {
        self.graph.files_for(language)
    }

    pub fn finish(self) -> CodeContextGraph {
        self.graph
    }
}
