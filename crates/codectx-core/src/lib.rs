//! codectx core: Code Context Graph data model and scan accumulator

pub mod error;
pub mod graph;
pub mod model;


pub use error::{ScanError, ScanResult};
pub use graph::ScanAccumulator;
pub use model::{
    module_id, CodeContextGraph, Dependency, DependencyKind, Edge, Language, Module, Node,
    NodeKind, LATEST_VERSION,
};
