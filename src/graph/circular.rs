use crate::graph::{DependencyGraph, NodeId};
use std::collections::HashSet;
use tracing::debug;

impl DependencyGraph {
    /// All elementary cycles reachable by depth-first search.
    ///
    /// The search tracks the in-progress traversal stack; reaching a node
    /// already on the stack reports the stack segment from that node to the
    /// current one as a cycle. Identical cycles discovered through parallel
    /// edges are reported once.
    pub fn find_circular_dependencies(&self) -> Vec<Vec<String>> {
        let count = self.type_count();
        let mut visited = vec![false; count];
        let mut on_stack = vec![false; count];
        let mut stack: Vec<NodeId> = Vec::new();
        let mut seen: HashSet<Vec<NodeId>> = HashSet::new();
        let mut cycles: Vec<Vec<String>> = Vec::new();

        for root in 0..count {
            if !visited[root] {
                self.dfs_cycles(
                    root,
                    &mut visited,
                    &mut on_stack,
                    &mut stack,
                    &mut seen,
                    &mut cycles,
                );
            }
        }

        if !cycles.is_empty() {
            debug!(cycles = cycles.len(), "detected circular dependencies");
        }

        cycles
    }

    /// Every type participating in at least one reported cycle.
    pub fn cyclic_types(&self) -> HashSet<String> {
        self.find_circular_dependencies()
            .into_iter()
            .flatten()
            .collect()
    }

    fn dfs_cycles(
        &self,
        id: NodeId,
        visited: &mut [bool],
        on_stack: &mut [bool],
        stack: &mut Vec<NodeId>,
        seen: &mut HashSet<Vec<NodeId>>,
        cycles: &mut Vec<Vec<String>>,
    ) {
        visited[id] = true;
        on_stack[id] = true;
        stack.push(id);

        for &e in &self.entry(id).dependencies {
            let next = self.edge_target(e);
            if on_stack[next] {
                if let Some(pos) = stack.iter().position(|&n| n == next) {
                    let segment: Vec<NodeId> = stack[pos..].to_vec();
                    if seen.insert(segment.clone()) {
                        cycles.push(
                            segment
                                .into_iter()
                                .map(|n| self.entry(n).node.name.clone())
                                .collect(),
                        );
                    }
                }
            } else if !visited[next] {
                self.dfs_cycles(next, visited, on_stack, stack, seen, cycles);
            }
        }

        stack.pop();
        on_stack[id] = false;
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::DependencyGraph;
    use crate::graph::test_support::{edge, node};
    use crate::model::DependencyKind;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_two_node_cycle() {
        let mut graph = DependencyGraph::new();
        graph.add_node(node("A")).unwrap();
        graph.add_node(node("B")).unwrap();
        graph
            .add_dependency(edge("A", "B", DependencyKind::Method))
            .unwrap();
        graph
            .add_dependency(edge("B", "A", DependencyKind::Method))
            .unwrap();

        let cycles = graph.find_circular_dependencies();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0], vec!["A".to_string(), "B".to_string()]);

        let cyclic = graph.cyclic_types();
        assert!(cyclic.contains("A") && cyclic.contains("B"));
    }

    #[test]
    fn test_self_loop() {
        let mut graph = DependencyGraph::new();
        graph.add_node(node("A")).unwrap();
        graph
            .add_dependency(edge("A", "A", DependencyKind::Field))
            .unwrap();

        let cycles = graph.find_circular_dependencies();
        assert_eq!(cycles, vec![vec!["A".to_string()]]);
    }

    #[test]
    fn test_acyclic_diamond_reports_nothing() {
        let mut graph = DependencyGraph::new();
        for name in ["A", "B", "C", "D"] {
            graph.add_node(node(name)).unwrap();
        }
        graph
            .add_dependency(edge("A", "B", DependencyKind::Method))
            .unwrap();
        graph
            .add_dependency(edge("A", "C", DependencyKind::Method))
            .unwrap();
        graph
            .add_dependency(edge("B", "D", DependencyKind::Method))
            .unwrap();
        graph
            .add_dependency(edge("C", "D", DependencyKind::Method))
            .unwrap();

        assert!(graph.find_circular_dependencies().is_empty());
        assert!(graph.cyclic_types().is_empty());
    }

    #[test]
    fn test_three_node_cycle_inside_larger_graph() {
        let mut graph = DependencyGraph::new();
        for name in ["Entry", "A", "B", "C", "Leaf"] {
            graph.add_node(node(name)).unwrap();
        }
        graph
            .add_dependency(edge("Entry", "A", DependencyKind::Constructor))
            .unwrap();
        graph
            .add_dependency(edge("A", "B", DependencyKind::Method))
            .unwrap();
        graph
            .add_dependency(edge("B", "C", DependencyKind::Method))
            .unwrap();
        graph
            .add_dependency(edge("C", "A", DependencyKind::Method))
            .unwrap();
        graph
            .add_dependency(edge("C", "Leaf", DependencyKind::Property))
            .unwrap();

        let cycles = graph.find_circular_dependencies();
        assert_eq!(cycles.len(), 1);
        assert_eq!(
            cycles[0],
            vec!["A".to_string(), "B".to_string(), "C".to_string()]
        );

        let cyclic = graph.cyclic_types();
        assert_eq!(cyclic.len(), 3);
        assert!(!cyclic.contains("Entry"));
        assert!(!cyclic.contains("Leaf"));
    }

    #[test]
    fn test_parallel_edges_report_one_cycle() {
        let mut graph = DependencyGraph::new();
        graph.add_node(node("A")).unwrap();
        graph.add_node(node("B")).unwrap();
        graph
            .add_dependency(edge("A", "B", DependencyKind::Method))
            .unwrap();
        graph
            .add_dependency(edge("B", "A", DependencyKind::Method))
            .unwrap();
        graph
            .add_dependency(edge("B", "A", DependencyKind::Property))
            .unwrap();

        assert_eq!(graph.find_circular_dependencies().len(), 1);
    }
}
