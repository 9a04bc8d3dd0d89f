use crate::graph::DependencyGraph;
use crate::model::DependencyEdge;

/// Divisor that maps combined coupling counts into [0, 1]. Calibrated, not
/// derived: around 20 combined edges a relationship is as coupled as we
/// care to distinguish.
const COUPLING_NORMALIZATION: f64 = 20.0;

/// Bounded [0, 1] heuristic for how entangled a single relationship is:
/// the target's afferent coupling plus the source's efferent coupling,
/// normalized and clamped.
pub fn coupling_intensity(edge: &DependencyEdge, graph: &DependencyGraph) -> f64 {
    let afferent = graph.fan_in(&edge.target) as f64;
    let efferent = graph.fan_out(&edge.source) as f64;
    ((afferent + efferent) / COUPLING_NORMALIZATION).min(1.0)
}

/// True iff the graph also contains an edge in the opposite direction,
/// of any kind.
pub fn is_bidirectional(edge: &DependencyEdge, graph: &DependencyGraph) -> bool {
    graph
        .dependencies_of(&edge.target)
        .iter()
        .any(|reverse| reverse.target == edge.source)
}

/// Instability per Martin: efferent / (afferent + efferent). 0 for isolated
/// types; numerically identical to `FanInOutEntry::fan_out_ratio`.
pub fn instability(name: &str, graph: &DependencyGraph) -> f64 {
    let afferent = graph.fan_in(name) as f64;
    let efferent = graph.fan_out(name) as f64;
    let total = afferent + efferent;

    if total == 0.0 { 0.0 } else { efferent / total }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::DependencyGraph;
    use crate::graph::test_support::{edge, node};
    use crate::model::DependencyKind;

    #[test]
    fn test_coupling_intensity_is_bounded() {
        let mut graph = DependencyGraph::new();
        graph.add_node(node("Hub")).unwrap();
        for i in 0..25 {
            let name = format!("T{i}");
            graph.add_node(node(&name)).unwrap();
            graph
                .add_dependency(edge(&name, "Hub", DependencyKind::Method))
                .unwrap();
        }

        let sample = edge("T0", "Hub", DependencyKind::Method);
        // fan_in(Hub) = 25 pushes the raw score past 1.0; it must clamp
        assert_eq!(coupling_intensity(&sample, &graph), 1.0);
    }

    #[test]
    fn test_coupling_intensity_small_graph() {
        let mut graph = DependencyGraph::new();
        graph.add_node(node("A")).unwrap();
        graph.add_node(node("B")).unwrap();
        graph
            .add_dependency(edge("A", "B", DependencyKind::Constructor))
            .unwrap();

        let sample = edge("A", "B", DependencyKind::Constructor);
        // afferent(B) = 1, efferent(A) = 1
        assert!((coupling_intensity(&sample, &graph) - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_is_bidirectional() {
        let mut graph = DependencyGraph::new();
        graph.add_node(node("A")).unwrap();
        graph.add_node(node("B")).unwrap();
        graph.add_node(node("C")).unwrap();
        graph
            .add_dependency(edge("A", "B", DependencyKind::Method))
            .unwrap();
        graph
            .add_dependency(edge("B", "A", DependencyKind::Event))
            .unwrap();
        graph
            .add_dependency(edge("A", "C", DependencyKind::Method))
            .unwrap();

        assert!(is_bidirectional(&edge("A", "B", DependencyKind::Method), &graph));
        assert!(is_bidirectional(&edge("B", "A", DependencyKind::Event), &graph));
        assert!(!is_bidirectional(&edge("A", "C", DependencyKind::Method), &graph));
    }

    #[test]
    fn test_instability_zero_for_isolated_type() {
        let mut graph = DependencyGraph::new();
        graph.add_node(node("Alone")).unwrap();

        assert_eq!(instability("Alone", &graph), 0.0);
        assert_eq!(instability("Ghost", &graph), 0.0);
    }

    #[test]
    fn test_instability_agrees_with_fan_out_ratio() {
        let mut graph = DependencyGraph::new();
        for name in ["A", "B", "C"] {
            graph.add_node(node(name)).unwrap();
        }
        graph
            .add_dependency(edge("A", "B", DependencyKind::Method))
            .unwrap();
        graph
            .add_dependency(edge("B", "C", DependencyKind::Method))
            .unwrap();

        for entry in graph.fan_in_out_analysis() {
            assert_eq!(instability(&entry.name, &graph), entry.fan_out_ratio);
        }
    }
}
