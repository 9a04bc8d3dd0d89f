use crate::graph::DependencyGraph;
use crate::model::DependencyEdge;
use std::collections::HashMap;
use tracing::debug;

/// Snapshot of every node's edge lists, flattened for O(1) repeated access.
///
/// This is a performance cache, never a source of truth: it is dropped on
/// any graph mutation and rebuilt only through
/// `DependencyGraph::build_bidirectional_indexes`. Its answers are always
/// identical to the live queries taken at build time.
#[derive(Debug)]
pub struct BiDirectionalIndex {
    dependencies: HashMap<String, Vec<DependencyEdge>>,
    dependents: HashMap<String, Vec<DependencyEdge>>,
}

impl BiDirectionalIndex {
    pub fn dependencies(&self, name: &str) -> &[DependencyEdge] {
        self.dependencies.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn dependents(&self, name: &str) -> &[DependencyEdge] {
        self.dependents.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl DependencyGraph {
    /// Materialize the per-node edge lists into a flat index.
    ///
    /// Intended for the frozen phase: build once after construction, then
    /// query. Any later mutation invalidates the index, and the optimized
    /// getters fall back to the live lists until it is rebuilt.
    pub fn build_bidirectional_indexes(&mut self) {
        let mut dependencies: HashMap<String, Vec<DependencyEdge>> = HashMap::new();
        let mut dependents: HashMap<String, Vec<DependencyEdge>> = HashMap::new();

        for node in self.nodes() {
            dependencies.insert(
                node.name.clone(),
                self.dependencies_of(&node.name).into_iter().cloned().collect(),
            );
            dependents.insert(
                node.name.clone(),
                self.dependents_of(&node.name).into_iter().cloned().collect(),
            );
        }

        debug!(
            types = self.type_count(),
            dependencies = self.dependency_count(),
            "built bidirectional index"
        );

        self.index = Some(BiDirectionalIndex {
            dependencies,
            dependents,
        });
    }

    pub fn has_bidirectional_index(&self) -> bool {
        self.index.is_some()
    }

    /// Indexed variant of `dependencies_of`; identical results, O(1) lookup
    /// once the index is built.
    pub fn dependencies_of_optimized(&self, name: &str) -> Vec<&DependencyEdge> {
        match &self.index {
            Some(index) => index.dependencies(name).iter().collect(),
            None => self.dependencies_of(name),
        }
    }

    /// Indexed variant of `dependents_of`; identical results, O(1) lookup
    /// once the index is built.
    pub fn dependents_of_optimized(&self, name: &str) -> Vec<&DependencyEdge> {
        match &self.index {
            Some(index) => index.dependents(name).iter().collect(),
            None => self.dependents_of(name),
        }
    }
}
