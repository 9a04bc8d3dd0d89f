use serde::{Deserialize, Serialize};

/// Aggregate snapshot of a graph, computed on demand by
/// `DependencyGraph::calculate_metrics`. Never kept in sync with mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphMetrics {
    pub total_types: usize,
    pub total_dependencies: usize,
    pub max_fan_in: usize,
    pub max_fan_out: usize,
    pub stable_types: usize,
    pub unstable_types: usize,
}

/// Per-type row of `DependencyGraph::fan_in_out_analysis`.
///
/// `fan_out_ratio` is efferent/(afferent+efferent), 0 when the type is
/// isolated; it equals the instability metric for the same type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FanInOutEntry {
    pub name: String,
    pub fan_in: usize,
    pub fan_out: usize,
    pub fan_in_ratio: f64,
    pub fan_out_ratio: f64,
    pub is_stable: bool,
    pub is_unstable: bool,
}
