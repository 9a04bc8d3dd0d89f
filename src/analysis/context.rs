use crate::analysis::patterns::{
    ArchitecturalPattern, LayerType, PatternAnalyzer, detect_layer, detect_type_pattern,
};
use crate::graph::DependencyGraph;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Everything the context records about one type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeContext {
    /// Incoming dependency count.
    pub afferent_coupling: usize,
    /// Outgoing dependency count.
    pub efferent_coupling: usize,
    /// Whether the type participates in at least one dependency cycle.
    pub is_cyclic: bool,
    /// Placeholder for real version-control history: a fixed per-pattern
    /// constant, not measured change data.
    pub change_frequency: f64,
    pub pattern: ArchitecturalPattern,
    pub layer: LayerType,
}

/// Derived per-type view of a finished graph.
///
/// Built once per analysis pass; any structural change to the graph
/// invalidates the whole context and requires a rebuild.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArchitecturalContext {
    types: HashMap<String, TypeContext>,
}

impl ArchitecturalContext {
    pub fn get(&self, name: &str) -> Option<&TypeContext> {
        self.types.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &TypeContext)> {
        self.types.iter()
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn afferent_coupling(&self, name: &str) -> usize {
        self.get(name).map_or(0, |t| t.afferent_coupling)
    }

    pub fn efferent_coupling(&self, name: &str) -> usize {
        self.get(name).map_or(0, |t| t.efferent_coupling)
    }

    pub fn is_cyclic(&self, name: &str) -> bool {
        self.get(name).is_some_and(|t| t.is_cyclic)
    }
}

/// Estimated change frequency for a pattern, standing in for history data
/// the engine does not have. Domain types are assumed calm, test code
/// churns the most.
fn change_frequency_for(pattern: ArchitecturalPattern) -> f64 {
    match pattern {
        ArchitecturalPattern::DomainCore => 0.1,
        ArchitecturalPattern::Infrastructure => 0.3,
        ArchitecturalPattern::ApplicationService => 0.2,
        ArchitecturalPattern::Testing => 0.5,
        ArchitecturalPattern::Configuration => 0.4,
        _ => 0.2,
    }
}

impl PatternAnalyzer {
    /// Build the per-type context for a finished graph: coupling counts
    /// from the edge lists, cycle membership from DFS, pattern and layer
    /// from the single-type classifier.
    ///
    /// Classification fans out across nodes; the analyzer's caches are
    /// filled sequentially afterwards so entries stay populate-once.
    pub fn build_context(&mut self, graph: &DependencyGraph) -> ArchitecturalContext {
        let cyclic = graph.cyclic_types();

        let nodes: Vec<_> = graph.nodes().collect();
        let classified: Vec<(String, ArchitecturalPattern, LayerType)> = nodes
            .par_iter()
            .map(|node| (node.name.clone(), detect_type_pattern(node), detect_layer(node)))
            .collect();

        let mut types = HashMap::with_capacity(classified.len());
        for (name, pattern, layer) in classified {
            self.cache_type(&name, pattern, layer);
            types.insert(
                name.clone(),
                TypeContext {
                    afferent_coupling: graph.fan_in(&name),
                    efferent_coupling: graph.fan_out(&name),
                    is_cyclic: cyclic.contains(&name),
                    change_frequency: change_frequency_for(pattern),
                    pattern,
                    layer,
                },
            );
        }

        debug!(types = types.len(), cyclic = cyclic.len(), "built architectural context");

        ArchitecturalContext { types }
    }
}
