mod context;
mod coupling;
mod patterns;

pub use context::{ArchitecturalContext, TypeContext};
pub use coupling::{coupling_intensity, instability, is_bidirectional};
pub use patterns::{
    ArchitecturalPattern, LayerType, PatternAnalyzer, detect_layer, detect_pattern,
    detect_type_pattern,
};

use crate::config::Config;
use crate::graph::DependencyGraph;
use crate::model::{AnalysisReport, Issue, SourceLocation};
use std::collections::HashSet;

/// Run every detector over a finished graph and aggregate the result.
pub fn analyze(graph: &DependencyGraph, config: &Config) -> AnalysisReport {
    let mut issues = Vec::new();

    issues.extend(detect_circular_dependencies(graph));
    issues.extend(detect_high_fan_in(graph, config));
    issues.extend(detect_high_fan_out(graph, config));
    issues.extend(detect_bidirectional_dependencies(graph));

    let context = PatternAnalyzer::new().build_context(graph);

    AnalysisReport {
        metrics: graph.calculate_metrics(),
        issues,
        context,
    }
}

pub fn detect_circular_dependencies(graph: &DependencyGraph) -> Vec<Issue> {
    graph
        .find_circular_dependencies()
        .into_iter()
        .map(|cycle| {
            let locations = locations_of(graph, &cycle);
            Issue::circular_dependency(cycle, locations)
        })
        .collect()
}

pub fn detect_high_fan_in(graph: &DependencyGraph, config: &Config) -> Vec<Issue> {
    graph
        .high_fan_in_types(config.thresholds.high_fan_in)
        .into_iter()
        .map(|node| {
            Issue::high_fan_in(node.name.clone(), graph.fan_in(&node.name), node.location.clone())
        })
        .collect()
}

pub fn detect_high_fan_out(graph: &DependencyGraph, config: &Config) -> Vec<Issue> {
    graph
        .high_fan_out_types(config.thresholds.high_fan_out)
        .into_iter()
        .map(|node| {
            Issue::high_fan_out(node.name.clone(), graph.fan_out(&node.name), node.location.clone())
        })
        .collect()
}

/// Report every pair of types that depend on each other, once per
/// unordered pair regardless of how many edges run in each direction.
pub fn detect_bidirectional_dependencies(graph: &DependencyGraph) -> Vec<Issue> {
    let mut reported: HashSet<(String, String)> = HashSet::new();
    let mut issues = Vec::new();

    for edge in graph.edges() {
        if edge.source == edge.target || !is_bidirectional(edge, graph) {
            continue;
        }

        let pair = if edge.source < edge.target {
            (edge.source.clone(), edge.target.clone())
        } else {
            (edge.target.clone(), edge.source.clone())
        };
        if !reported.insert(pair.clone()) {
            continue;
        }

        let locations = locations_of(graph, &[pair.0.clone(), pair.1.clone()]);
        issues.push(Issue::bidirectional_dependency(pair.0, pair.1, locations));
    }

    issues
}

fn locations_of(graph: &DependencyGraph, names: &[String]) -> Vec<SourceLocation> {
    names
        .iter()
        .filter_map(|name| graph.node(name).map(|n| n.location.clone()))
        .collect()
}
