mod edge;
mod issue;
mod metrics;
mod node;

pub use edge::{DependencyEdge, DependencyKind};
pub use issue::{Issue, IssueKind, IssueSeverity};
pub use metrics::{FanInOutEntry, GraphMetrics};
pub use node::{
    SourceLocation, SymbolId, TypeKind, TypeNode, namespace_of, simple_name_of, top_namespace_of,
};

use crate::analysis::ArchitecturalContext;
use serde::Serialize;

/// Everything one analysis pass produces over a finished graph.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub metrics: GraphMetrics,
    pub issues: Vec<Issue>,
    pub context: ArchitecturalContext,
}
