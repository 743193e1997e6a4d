//! File classification, symbol extraction and graph assembly

pub mod assembler;
pub mod classifier;
pub mod config;
pub mod dependencies;
pub mod languages;
pub mod parser;
pub mod patterns;


pub use assembler::{GraphAssembler, build_code_context_graph};
pub use classifier::{classify, is_declaration_file, should_skip};
pub use config::ScanConfig;
pub use dependencies::extract_dependencies;
pub use languages::{LanguageExtractor, extractor_for_path, get_extractor};
