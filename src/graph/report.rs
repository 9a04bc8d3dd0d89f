use crate::graph::DependencyGraph;

const TOP_ENTRIES: usize = 10;

impl DependencyGraph {
    /// Human-readable summary of both directions of the graph.
    ///
    /// Output is stable across repeated calls on an unchanged graph: top
    /// lists are ordered by degree, ties by name, everything else follows
    /// registration order.
    pub fn bidirectional_report(&self) -> String {
        let metrics = self.calculate_metrics();
        let mut output = String::new();

        output.push_str("# Bidirectional Dependency Analysis\n\n");
        output.push_str(&format!("Total types: {}\n", metrics.total_types));
        output.push_str(&format!("Total dependencies: {}\n", metrics.total_dependencies));
        output.push_str(&format!("Max fan-in: {}\n", metrics.max_fan_in));
        output.push_str(&format!("Max fan-out: {}\n", metrics.max_fan_out));

        output.push_str("\n## Most Depended Upon\n\n");
        for (name, fan_in) in self.top_by(|e| e.fan_in) {
            output.push_str(&format!("- {} (fan-in {})\n", name, fan_in));
        }

        output.push_str("\n## Most Depending\n\n");
        for (name, fan_out) in self.top_by(|e| e.fan_out) {
            output.push_str(&format!("- {} (fan-out {})\n", name, fan_out));
        }

        let stable = self.stable_types();
        output.push_str(&format!("\n## Stable Types ({})\n\n", stable.len()));
        for node in stable {
            output.push_str(&format!("- {}\n", node.name));
        }

        let unstable = self.unstable_types();
        output.push_str(&format!("\n## Unstable Types ({})\n\n", unstable.len()));
        for node in unstable {
            output.push_str(&format!("- {}\n", node.name));
        }

        let cycles = self.find_circular_dependencies();
        output.push_str(&format!("\n## Circular Dependencies ({})\n\n", cycles.len()));
        if cycles.is_empty() {
            output.push_str("*(none)*\n");
        } else {
            for cycle in cycles {
                output.push_str(&format!("- {}\n", cycle.join(" → ")));
            }
        }

        output.push_str("\n## Dependency Layers\n\n");
        for (position, name) in self.topological_order_with_cycles().iter().enumerate() {
            output.push_str(&format!("{}. {}\n", position + 1, name));
        }

        output
    }

    fn top_by(&self, degree: impl Fn(&crate::model::FanInOutEntry) -> usize) -> Vec<(String, usize)> {
        let mut ranked: Vec<(String, usize)> = self
            .fan_in_out_analysis()
            .iter()
            .map(|entry| (entry.name.clone(), degree(entry)))
            .filter(|(_, count)| *count > 0)
            .collect();

        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(TOP_ENTRIES);
        ranked
    }
}
