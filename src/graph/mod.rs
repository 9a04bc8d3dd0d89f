mod circular;
mod index;
mod report;
mod traversal;

pub use index::BiDirectionalIndex;

use crate::model::{DependencyEdge, FanInOutEntry, GraphMetrics, TypeNode};
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet, VecDeque};
use thiserror::Error;

pub type NodeId = usize;
pub type EdgeId = usize;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("Type already registered: {0}")]
    DuplicateNode(String),
    #[error("Dependency references unregistered type: {0}")]
    UnknownEndpoint(String),
}

#[derive(Debug)]
struct NodeEntry {
    node: TypeNode,
    /// Outgoing edge ids, in insertion order.
    dependencies: Vec<EdgeId>,
    /// Incoming edge ids, in insertion order.
    dependents: Vec<EdgeId>,
}

/// Bidirectional dependency graph over a codebase's types.
///
/// Nodes live in an arena keyed by qualified name; edges are index pairs
/// into that arena, so the naturally cyclic structure never owns itself.
/// Construction is single-writer (`add_node` / `add_dependency`); once the
/// extractor is done the graph is frozen and every query takes `&self`, so
/// a finished graph can be shared freely across reader threads.
#[derive(Debug)]
pub struct DependencyGraph {
    entries: Vec<NodeEntry>,
    ids: HashMap<String, NodeId>,
    edges: Vec<DependencyEdge>,
    /// Resolved (source, target) node ids, parallel to `edges`.
    endpoints: Vec<(NodeId, NodeId)>,
    index: Option<BiDirectionalIndex>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            ids: HashMap::new(),
            edges: Vec::new(),
            endpoints: Vec::new(),
            index: None,
        }
    }

    /// Register a type. Registering the same qualified name twice is
    /// rejected and leaves the graph untouched.
    pub fn add_node(&mut self, node: TypeNode) -> Result<NodeId, GraphError> {
        if self.ids.contains_key(&node.name) {
            return Err(GraphError::DuplicateNode(node.name));
        }

        let id = self.entries.len();
        self.ids.insert(node.name.clone(), id);
        self.entries.push(NodeEntry {
            node,
            dependencies: Vec::new(),
            dependents: Vec::new(),
        });
        self.index = None;
        Ok(id)
    }

    /// Record a dependency between two already-registered types. The edge
    /// is appended to the global list and to both endpoints' edge lists;
    /// parallel edges with different kinds or members are allowed.
    pub fn add_dependency(&mut self, edge: DependencyEdge) -> Result<EdgeId, GraphError> {
        let source = *self
            .ids
            .get(&edge.source)
            .ok_or_else(|| GraphError::UnknownEndpoint(edge.source.clone()))?;
        let target = *self
            .ids
            .get(&edge.target)
            .ok_or_else(|| GraphError::UnknownEndpoint(edge.target.clone()))?;

        let id = self.edges.len();
        self.edges.push(edge);
        self.endpoints.push((source, target));
        self.entries[source].dependencies.push(id);
        self.entries[target].dependents.push(id);
        self.index = None;
        Ok(id)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.ids.contains_key(name)
    }

    pub fn node(&self, name: &str) -> Option<&TypeNode> {
        self.ids.get(name).map(|&id| &self.entries[id].node)
    }

    /// All registered types, in registration order.
    pub fn nodes(&self) -> impl Iterator<Item = &TypeNode> {
        self.entries.iter().map(|e| &e.node)
    }

    /// The global edge list, in insertion order.
    pub fn edges(&self) -> &[DependencyEdge] {
        &self.edges
    }

    pub fn type_count(&self) -> usize {
        self.entries.len()
    }

    pub fn dependency_count(&self) -> usize {
        self.edges.len()
    }

    /// Outgoing edges of a type, in insertion order. Empty for unknown names.
    pub fn dependencies_of(&self, name: &str) -> Vec<&DependencyEdge> {
        match self.ids.get(name) {
            Some(&id) => self.entries[id]
                .dependencies
                .iter()
                .map(|&e| &self.edges[e])
                .collect(),
            None => Vec::new(),
        }
    }

    /// Incoming edges of a type, in insertion order. Empty for unknown names.
    pub fn dependents_of(&self, name: &str) -> Vec<&DependencyEdge> {
        match self.ids.get(name) {
            Some(&id) => self.entries[id]
                .dependents
                .iter()
                .map(|&e| &self.edges[e])
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn fan_in(&self, name: &str) -> usize {
        self.ids
            .get(name)
            .map(|&id| self.entries[id].dependents.len())
            .unwrap_or(0)
    }

    pub fn fan_out(&self, name: &str) -> usize {
        self.ids
            .get(name)
            .map(|&id| self.entries[id].dependencies.len())
            .unwrap_or(0)
    }

    /// Types whose fan-in is at least `threshold`.
    pub fn high_fan_in_types(&self, threshold: usize) -> Vec<&TypeNode> {
        self.entries
            .iter()
            .filter(|e| e.dependents.len() >= threshold)
            .map(|e| &e.node)
            .collect()
    }

    /// Types whose fan-out is at least `threshold`.
    pub fn high_fan_out_types(&self, threshold: usize) -> Vec<&TypeNode> {
        self.entries
            .iter()
            .filter(|e| e.dependencies.len() >= threshold)
            .map(|e| &e.node)
            .collect()
    }

    /// Average fan-in, which equals average fan-out: every edge contributes
    /// exactly one of each across the whole graph.
    fn average_degree(&self) -> f64 {
        if self.entries.is_empty() {
            0.0
        } else {
            self.edges.len() as f64 / self.entries.len() as f64
        }
    }

    fn is_stable(&self, entry: &NodeEntry, avg: f64) -> bool {
        (entry.dependents.len() as f64) > avg && (entry.dependencies.len() as f64) < avg
    }

    fn is_unstable(&self, entry: &NodeEntry, avg: f64) -> bool {
        (entry.dependencies.len() as f64) > avg && (entry.dependents.len() as f64) < avg
    }

    /// Types that are depended upon more than average while depending on
    /// less than average (both strict).
    pub fn stable_types(&self) -> Vec<&TypeNode> {
        let avg = self.average_degree();
        self.entries
            .iter()
            .filter(|e| self.is_stable(e, avg))
            .map(|e| &e.node)
            .collect()
    }

    /// The mirror image of `stable_types`: more outgoing than average,
    /// fewer incoming than average (both strict).
    pub fn unstable_types(&self) -> Vec<&TypeNode> {
        let avg = self.average_degree();
        self.entries
            .iter()
            .filter(|e| self.is_unstable(e, avg))
            .map(|e| &e.node)
            .collect()
    }

    /// Aggregate snapshot, computed on demand.
    pub fn calculate_metrics(&self) -> GraphMetrics {
        let avg = self.average_degree();
        let mut metrics = GraphMetrics {
            total_types: self.entries.len(),
            total_dependencies: self.edges.len(),
            max_fan_in: 0,
            max_fan_out: 0,
            stable_types: 0,
            unstable_types: 0,
        };

        for entry in &self.entries {
            metrics.max_fan_in = metrics.max_fan_in.max(entry.dependents.len());
            metrics.max_fan_out = metrics.max_fan_out.max(entry.dependencies.len());
            if self.is_stable(entry, avg) {
                metrics.stable_types += 1;
            }
            if self.is_unstable(entry, avg) {
                metrics.unstable_types += 1;
            }
        }

        metrics
    }

    /// Per-type fan-in/fan-out breakdown, in registration order.
    ///
    /// `fan_out_ratio` is 0 for isolated types, and always agrees with
    /// `analysis::instability` for the same name.
    pub fn fan_in_out_analysis(&self) -> Vec<FanInOutEntry> {
        let avg = self.average_degree();
        self.entries
            .iter()
            .map(|entry| {
                let fan_in = entry.dependents.len();
                let fan_out = entry.dependencies.len();
                let total = fan_in + fan_out;
                let fan_out_ratio = if total == 0 {
                    0.0
                } else {
                    fan_out as f64 / total as f64
                };

                FanInOutEntry {
                    name: entry.node.name.clone(),
                    fan_in,
                    fan_out,
                    fan_in_ratio: 1.0 - fan_out_ratio,
                    fan_out_ratio,
                    is_stable: self.is_stable(entry, avg),
                    is_unstable: self.is_unstable(entry, avg),
                }
            })
            .collect()
    }

    fn node_id(&self, name: &str) -> Option<NodeId> {
        self.ids.get(name).copied()
    }

    fn entry(&self, id: NodeId) -> &NodeEntry {
        &self.entries[id]
    }

    fn edge_target(&self, edge: EdgeId) -> NodeId {
        self.endpoints[edge].1
    }

    fn edge_source(&self, edge: EdgeId) -> NodeId {
        self.endpoints[edge].0
    }

    /// Petgraph view of the node arena, one `()` edge per dependency edge.
    fn petgraph_view(&self) -> (DiGraph<NodeId, ()>, Vec<NodeIndex>) {
        let mut graph = DiGraph::new();
        let indices: Vec<NodeIndex> = (0..self.entries.len()).map(|id| graph.add_node(id)).collect();

        for &(source, target) in &self.endpoints {
            graph.add_edge(indices[source], indices[target], ());
        }

        (graph, indices)
    }

    /// Types in topological order: every type precedes the types it
    /// depends on. Returns None if the graph has cycles.
    pub fn topological_order(&self) -> Option<Vec<String>> {
        let (graph, _) = self.petgraph_view();
        toposort(&graph, None).ok().map(|sorted| {
            sorted
                .into_iter()
                .map(|idx| self.entries[graph[idx]].node.name.clone())
                .collect()
        })
    }

    /// Topological order that tolerates cycles: cycle members are appended
    /// at their earliest valid position.
    pub fn topological_order_with_cycles(&self) -> Vec<String> {
        match self.topological_order() {
            Some(order) => order,
            None => self.kahn_with_cycle_handling(),
        }
    }

    /// Kahn's algorithm variant that handles cycles
    fn kahn_with_cycle_handling(&self) -> Vec<String> {
        let (graph, _) = self.petgraph_view();
        let mut in_degree: HashMap<NodeIndex, usize> = HashMap::new();
        let mut result = Vec::new();
        let mut queue = VecDeque::new();
        let mut visited = HashSet::new();

        for idx in graph.node_indices() {
            let degree = graph
                .neighbors_directed(idx, petgraph::Direction::Incoming)
                .count();
            in_degree.insert(idx, degree);
            if degree == 0 {
                queue.push_back(idx);
            }
        }

        while let Some(idx) = queue.pop_front() {
            if visited.contains(&idx) {
                continue;
            }
            visited.insert(idx);
            result.push(self.entries[graph[idx]].node.name.clone());

            for neighbor in graph.neighbors_directed(idx, petgraph::Direction::Outgoing) {
                if let Some(degree) = in_degree.get_mut(&neighbor) {
                    *degree = degree.saturating_sub(1);
                    if *degree == 0 && !visited.contains(&neighbor) {
                        queue.push_back(neighbor);
                    }
                }
            }
        }

        // Whatever is left sits on a cycle
        for idx in graph.node_indices() {
            if !visited.contains(&idx) {
                result.push(self.entries[graph[idx]].node.name.clone());
            }
        }

        result
    }
}

impl Default for DependencyGraph {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::{edge, node};
    use super::*;
    use crate::model::DependencyKind;
    use pretty_assertions::assert_eq;

    fn sample_graph() -> DependencyGraph {
        // Controller → Service → {Repository, Model}, Repository → Model
        let mut graph = DependencyGraph::new();
        for name in ["Controller", "Service", "Repository", "Model"] {
            graph.add_node(node(name)).unwrap();
        }
        graph
            .add_dependency(edge("Controller", "Service", DependencyKind::Constructor))
            .unwrap();
        graph
            .add_dependency(edge("Service", "Repository", DependencyKind::Constructor))
            .unwrap();
        graph
            .add_dependency(edge("Service", "Model", DependencyKind::Property))
            .unwrap();
        graph
            .add_dependency(edge("Repository", "Model", DependencyKind::Field))
            .unwrap();
        graph
    }

    #[test]
    fn test_duplicate_node_rejected() {
        let mut graph = DependencyGraph::new();
        graph.add_node(node("A")).unwrap();

        let err = graph.add_node(node("A")).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateNode(name) if name == "A"));
        assert_eq!(graph.type_count(), 1);
    }

    #[test]
    fn test_unknown_endpoint_rejected() {
        let mut graph = DependencyGraph::new();
        graph.add_node(node("A")).unwrap();

        let err = graph
            .add_dependency(edge("A", "Missing", DependencyKind::Method))
            .unwrap_err();
        assert!(matches!(err, GraphError::UnknownEndpoint(name) if name == "Missing"));
        assert_eq!(graph.dependency_count(), 0);
        assert!(graph.dependencies_of("A").is_empty());
    }

    #[test]
    fn test_fan_in_fan_out() {
        let graph = sample_graph();

        assert_eq!(graph.fan_in("Model"), 2);
        assert_eq!(graph.fan_out("Model"), 0);
        assert_eq!(graph.fan_in("Service"), 1);
        assert_eq!(graph.fan_out("Service"), 2);
        assert_eq!(graph.fan_in("Nope"), 0);
        assert_eq!(graph.fan_out("Nope"), 0);
    }

    #[test]
    fn test_parallel_edges_allowed() {
        let mut graph = DependencyGraph::new();
        graph.add_node(node("A")).unwrap();
        graph.add_node(node("B")).unwrap();
        graph
            .add_dependency(edge("A", "B", DependencyKind::Method).with_member("Load"))
            .unwrap();
        graph
            .add_dependency(edge("A", "B", DependencyKind::Property).with_member("Cache"))
            .unwrap();

        assert_eq!(graph.fan_out("A"), 2);
        assert_eq!(graph.fan_in("B"), 2);
    }

    #[test]
    fn test_unknown_name_queries_are_empty() {
        let graph = sample_graph();

        assert!(graph.dependencies_of("Ghost").is_empty());
        assert!(graph.dependents_of("Ghost").is_empty());
        assert!(!graph.contains("Ghost"));
    }

    #[test]
    fn test_stable_and_unstable_types() {
        let graph = sample_graph();

        // avg fan-in == avg fan-out == 4 edges / 4 nodes == 1.0
        let stable: Vec<_> = graph.stable_types().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(stable, vec!["Model"]);
        assert!(graph.unstable_types().is_empty());
    }

    #[test]
    fn test_high_fan_in_threshold_is_inclusive() {
        let graph = sample_graph();

        let names: Vec<_> = graph
            .high_fan_in_types(2)
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, vec!["Model"]);

        let names: Vec<_> = graph
            .high_fan_out_types(2)
            .iter()
            .map(|n| n.name.as_str())
            .collect();
        assert_eq!(names, vec!["Service"]);
    }

    #[test]
    fn test_calculate_metrics() {
        let graph = sample_graph();
        let metrics = graph.calculate_metrics();

        assert_eq!(
            metrics,
            GraphMetrics {
                total_types: 4,
                total_dependencies: 4,
                max_fan_in: 2,
                max_fan_out: 2,
                stable_types: 1,
                unstable_types: 0,
            }
        );
    }

    #[test]
    fn test_fan_in_out_analysis_ratios() {
        let graph = sample_graph();
        let analysis = graph.fan_in_out_analysis();

        let service = analysis.iter().find(|e| e.name == "Service").unwrap();
        assert!((service.fan_out_ratio - 2.0 / 3.0).abs() < 1e-9);
        assert!((service.fan_in_ratio - 1.0 / 3.0).abs() < 1e-9);

        let model = analysis.iter().find(|e| e.name == "Model").unwrap();
        assert_eq!(model.fan_out_ratio, 0.0);
        assert_eq!(model.fan_in_ratio, 1.0);
        assert!(model.is_stable);
        assert!(!model.is_unstable);
    }

    #[test]
    fn test_topological_order() {
        let graph = sample_graph();
        let order = graph.topological_order().unwrap();

        let pos = |name: &str| order.iter().position(|n| n == name).unwrap();
        assert!(pos("Controller") < pos("Service"));
        assert!(pos("Service") < pos("Repository"));
        assert!(pos("Repository") < pos("Model"));
    }

    #[test]
    fn test_topological_order_with_cycles() {
        let mut graph = DependencyGraph::new();
        for name in ["A", "B", "C"] {
            graph.add_node(node(name)).unwrap();
        }
        graph
            .add_dependency(edge("A", "B", DependencyKind::Method))
            .unwrap();
        graph
            .add_dependency(edge("B", "A", DependencyKind::Method))
            .unwrap();
        graph
            .add_dependency(edge("C", "A", DependencyKind::Method))
            .unwrap();

        assert!(graph.topological_order().is_none());

        let order = graph.topological_order_with_cycles();
        assert_eq!(order.len(), 3);
        assert_eq!(order[0], "C");
    }
}
