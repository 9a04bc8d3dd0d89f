use crate::graph::{DependencyGraph, NodeId};
use std::collections::{HashMap, HashSet, VecDeque};

impl DependencyGraph {
    /// Every type affected if `name` changes: the transitive closure over
    /// incoming edges, including `name` itself. Empty for unknown names.
    pub fn impact_scope(&self, name: &str) -> HashSet<String> {
        self.closure(name, |id| {
            self.entry(id)
                .dependents
                .iter()
                .map(|&e| self.edge_source(e))
                .collect()
        })
    }

    /// Every type `name` transitively requires, including itself. Empty for
    /// unknown names.
    pub fn dependency_scope(&self, name: &str) -> HashSet<String> {
        self.closure(name, |id| {
            self.entry(id)
                .dependencies
                .iter()
                .map(|&e| self.edge_target(e))
                .collect()
        })
    }

    pub fn impact_score(&self, name: &str) -> usize {
        self.impact_scope(name).len()
    }

    pub fn dependency_score(&self, name: &str) -> usize {
        self.dependency_scope(name).len()
    }

    fn closure(&self, name: &str, neighbors: impl Fn(NodeId) -> Vec<NodeId>) -> HashSet<String> {
        let Some(start) = self.node_id(name) else {
            return HashSet::new();
        };

        let mut visited: HashSet<NodeId> = HashSet::new();
        let mut queue = VecDeque::new();
        visited.insert(start);
        queue.push_back(start);

        while let Some(id) = queue.pop_front() {
            for next in neighbors(id) {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        visited
            .into_iter()
            .map(|id| self.entry(id).node.name.clone())
            .collect()
    }

    /// Shortest hop count from `a` to `b` following outgoing edges.
    /// `Some(0)` when `a == b`; `None` when no path exists or either name
    /// is unregistered.
    pub fn dependency_distance(&self, a: &str, b: &str) -> Option<usize> {
        self.shortest_path(a, b).map(|chain| chain.len() - 1)
    }

    /// The shortest dependency path from `a` to `b`, both endpoints
    /// included. Ties are broken by edge insertion order.
    pub fn find_dependency_chain(&self, a: &str, b: &str) -> Option<Vec<String>> {
        self.shortest_path(a, b).map(|chain| {
            chain
                .into_iter()
                .map(|id| self.entry(id).node.name.clone())
                .collect()
        })
    }

    /// Breadth-first search over outgoing edges, visiting each node's edge
    /// list in insertion order; parent pointers reconstruct the path.
    fn shortest_path(&self, a: &str, b: &str) -> Option<Vec<NodeId>> {
        let start = self.node_id(a)?;
        let goal = self.node_id(b)?;

        if start == goal {
            return Some(vec![start]);
        }

        let mut parents: HashMap<NodeId, NodeId> = HashMap::new();
        let mut queue = VecDeque::new();
        queue.push_back(start);

        while let Some(id) = queue.pop_front() {
            for &e in &self.entry(id).dependencies {
                let next = self.edge_target(e);
                if next == start || parents.contains_key(&next) {
                    continue;
                }
                parents.insert(next, id);

                if next == goal {
                    let mut chain = vec![goal];
                    let mut current = goal;
                    while let Some(&parent) = parents.get(&current) {
                        chain.push(parent);
                        current = parent;
                    }
                    chain.reverse();
                    return Some(chain);
                }
                queue.push_back(next);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::DependencyGraph;
    use crate::graph::test_support::{edge, node};
    use crate::model::DependencyKind;
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn layered_graph() -> DependencyGraph {
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
    fn test_impact_scope_includes_self() {
        let graph = layered_graph();

        let scope = graph.impact_scope("Model");
        let expected: HashSet<String> = ["Model", "Service", "Repository", "Controller"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(scope, expected);
        assert_eq!(graph.impact_score("Model"), 4);

        // A leaf of the dependent graph is its own whole impact scope
        assert_eq!(graph.impact_score("Controller"), 1);
    }

    #[test]
    fn test_dependency_scope_includes_self() {
        let graph = layered_graph();

        let scope = graph.dependency_scope("Controller");
        assert_eq!(scope.len(), 4);
        assert!(scope.contains("Controller"));

        assert_eq!(graph.dependency_score("Model"), 1);
    }

    #[test]
    fn test_scope_of_unknown_name_is_empty() {
        let graph = layered_graph();

        assert!(graph.impact_scope("Ghost").is_empty());
        assert!(graph.dependency_scope("Ghost").is_empty());
        assert_eq!(graph.impact_score("Ghost"), 0);
    }

    #[test]
    fn test_dependency_distance() {
        let graph = layered_graph();

        assert_eq!(graph.dependency_distance("Controller", "Controller"), Some(0));
        assert_eq!(graph.dependency_distance("Controller", "Service"), Some(1));
        assert_eq!(graph.dependency_distance("Controller", "Model"), Some(2));
        assert_eq!(graph.dependency_distance("Model", "Controller"), None);
        assert_eq!(graph.dependency_distance("Ghost", "Model"), None);
    }

    #[test]
    fn test_find_dependency_chain() {
        let graph = layered_graph();

        assert_eq!(
            graph.find_dependency_chain("Controller", "Model"),
            Some(vec![
                "Controller".to_string(),
                "Service".to_string(),
                "Model".to_string()
            ])
        );
        assert_eq!(
            graph.find_dependency_chain("Model", "Model"),
            Some(vec!["Model".to_string()])
        );
        assert_eq!(graph.find_dependency_chain("Model", "Controller"), None);
    }

    #[test]
    fn test_chain_ties_broken_by_insertion_order() {
        let mut graph = DependencyGraph::new();
        for name in ["A", "Left", "Right", "Z"] {
            graph.add_node(node(name)).unwrap();
        }
        // Two equal-length paths; the one through the first-inserted edge wins
        graph
            .add_dependency(edge("A", "Left", DependencyKind::Method))
            .unwrap();
        graph
            .add_dependency(edge("A", "Right", DependencyKind::Method))
            .unwrap();
        graph
            .add_dependency(edge("Left", "Z", DependencyKind::Method))
            .unwrap();
        graph
            .add_dependency(edge("Right", "Z", DependencyKind::Method))
            .unwrap();

        assert_eq!(
            graph.find_dependency_chain("A", "Z"),
            Some(vec!["A".to_string(), "Left".to_string(), "Z".to_string()])
        );
    }

    #[test]
    fn test_chain_length_agrees_with_distance() {
        let graph = layered_graph();

        for (a, b) in [("Controller", "Model"), ("Service", "Model"), ("Controller", "Service")] {
            let chain = graph.find_dependency_chain(a, b).unwrap();
            assert_eq!(graph.dependency_distance(a, b), Some(chain.len() - 1));
        }
    }
}
