//! CLI command implementations

use anyhow::Context;
use codectx_core::CodeContextGraph;
use codectx_indexer::{GraphAssembler, ScanConfig};
use std::io::Write;
use std::path::PathBuf;

pub fn scan(
    root: PathBuf,
    output: Option<PathBuf>,
    compact: bool,
    config: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = match config {
        Some(path) => ScanConfig::load(&path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => ScanConfig::default(),
    };

    let graph = GraphAssembler::with_config(&root, config).run()?;
    for (language, count) in &graph.language_stats {
        tracing::info!("{}: {} files", language, count);
    }

    let json = render(&graph, compact)?;
    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Code graph saved to {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }

    Ok(())
}

fn render(graph: &CodeContextGraph, compact: bool) -> serde_json::Result<String> {
    if compact {
        graph.to_json()
    } else {
        graph.to_json_pretty()
    }
}
