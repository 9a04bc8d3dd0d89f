pub mod analysis;
pub mod config;
pub mod graph;
pub mod model;
pub mod output;

pub use analysis::{
    ArchitecturalContext, ArchitecturalPattern, LayerType, PatternAnalyzer, analyze,
    coupling_intensity, detect_layer, detect_pattern, detect_type_pattern, instability,
    is_bidirectional,
};
pub use config::{Config, ConfigError, Thresholds};
pub use graph::{DependencyGraph, GraphError};
pub use model::{
    AnalysisReport, DependencyEdge, DependencyKind, Issue, IssueKind, IssueSeverity,
    SourceLocation, TypeKind, TypeNode,
};
