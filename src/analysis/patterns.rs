use crate::graph::DependencyGraph;
use crate::model::{DependencyEdge, DependencyKind, TypeNode, namespace_of, simple_name_of};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Architectural role assigned to a type or to a single dependency edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArchitecturalPattern {
    Repository,
    Factory,
    Strategy,
    Observer,
    DependencyInjection,
    DomainCore,
    ApplicationService,
    Infrastructure,
    DataAccess,
    Testing,
    Configuration,
    MicroservicesBoundary,
    Unknown,
}

impl std::fmt::Display for ArchitecturalPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Repository => "repository",
            Self::Factory => "factory",
            Self::Strategy => "strategy",
            Self::Observer => "observer",
            Self::DependencyInjection => "dependency-injection",
            Self::DomainCore => "domain-core",
            Self::ApplicationService => "application-service",
            Self::Infrastructure => "infrastructure",
            Self::DataAccess => "data-access",
            Self::Testing => "testing",
            Self::Configuration => "configuration",
            Self::MicroservicesBoundary => "microservices-boundary",
            Self::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// Coarse per-type layer classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LayerType {
    Presentation,
    Application,
    Domain,
    Infrastructure,
    Data,
    Test,
    Configuration,
    Unknown,
}

impl std::fmt::Display for LayerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Presentation => "presentation",
            Self::Application => "application",
            Self::Domain => "domain",
            Self::Infrastructure => "infrastructure",
            Self::Data => "data",
            Self::Test => "test",
            Self::Configuration => "configuration",
            Self::Unknown => "unknown",
        };
        write!(f, "{name}")
    }
}

/// Lower-cased view of one edge, precomputed once so the rule table stays
/// pure string predicates.
struct EdgeScope {
    kind: DependencyKind,
    source_name: String,
    source_namespace: String,
    source_top: String,
    target_name: String,
    target_namespace: String,
    target_top: String,
    target_is_interface: bool,
}

impl EdgeScope {
    fn of(edge: &DependencyEdge, graph: &DependencyGraph) -> Self {
        let (source_name, source_namespace, source_top) = name_parts(&edge.source);
        let (target_name, target_namespace, target_top) = name_parts(&edge.target);

        Self {
            kind: edge.kind,
            source_name,
            source_namespace,
            source_top,
            target_name,
            target_namespace,
            target_top,
            target_is_interface: graph
                .node(&edge.target)
                .is_some_and(TypeNode::is_interface),
        }
    }
}

fn name_parts(qualified: &str) -> (String, String, String) {
    let namespace = namespace_of(qualified).to_lowercase();
    let top = if namespace.is_empty() {
        String::new()
    } else {
        crate::model::top_namespace_of(qualified).to_lowercase()
    };
    (simple_name_of(qualified).to_lowercase(), namespace, top)
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// Edge classification rules, evaluated strictly in order; the first
/// matching predicate wins. Reordering entries changes observable
/// classification.
const EDGE_RULES: &[(ArchitecturalPattern, fn(&EdgeScope) -> bool)] = &[
    (ArchitecturalPattern::Repository, |s| {
        (contains_any(&s.target_name, &["repository", "data", "persistence"])
            || contains_any(&s.target_namespace, &["repository", "data", "persistence"]))
            && matches!(s.kind, DependencyKind::Constructor | DependencyKind::Interface)
    }),
    (ArchitecturalPattern::Factory, |s| {
        (contains_any(&s.target_name, &["factory", "builder"])
            || contains_any(&s.source_name, &["factory", "builder"]))
            && matches!(s.kind, DependencyKind::Method | DependencyKind::Interface)
    }),
    (ArchitecturalPattern::Strategy, |s| {
        s.kind == DependencyKind::Interface
            && contains_any(&s.target_name, &["strategy", "handler", "processor"])
    }),
    (ArchitecturalPattern::Observer, |s| {
        s.kind == DependencyKind::Event
            || (s.kind == DependencyKind::Interface
                && contains_any(&s.target_name, &["observer", "listener", "handler"]))
    }),
    (ArchitecturalPattern::DependencyInjection, |s| {
        s.kind == DependencyKind::Constructor && s.target_is_interface
    }),
    (ArchitecturalPattern::DomainCore, |s| {
        contains_any(&s.target_namespace, &["domain", "core", "business"])
            || (s.target_namespace.contains("model") && !s.target_namespace.contains("view"))
    }),
    (ArchitecturalPattern::ApplicationService, |s| {
        (s.target_namespace.contains("service") && !s.target_namespace.contains("infrastructure"))
            || s.target_namespace.contains("application")
            || (s.target_name.contains("service") && !s.target_name.contains("test"))
    }),
    (ArchitecturalPattern::Infrastructure, |s| {
        contains_any(
            &s.target_namespace,
            &["infrastructure", "external", "integration", "persistence"],
        )
    }),
    (ArchitecturalPattern::DataAccess, |s| {
        contains_any(
            &s.target_namespace,
            &["data", "repository", "dal", "persistence", "context"],
        ) || contains_any(
            &s.target_name,
            &["data", "repository", "dal", "persistence", "context"],
        )
    }),
    (ArchitecturalPattern::Testing, |s| {
        contains_any(&s.source_namespace, &["test", "mock"])
            || contains_any(&s.target_namespace, &["test", "mock"])
            || contains_any(&s.source_name, &["test", "mock"])
            || contains_any(&s.target_name, &["test", "mock"])
    }),
    (ArchitecturalPattern::Configuration, |s| {
        contains_any(&s.target_namespace, &["configuration", "config", "settings"])
            || contains_any(&s.target_name, &["configuration", "config", "settings"])
    }),
    (ArchitecturalPattern::MicroservicesBoundary, |s| {
        s.source_top != s.target_top
    }),
];

/// Single-type rules: the abridged precedence used when no edge context is
/// available. Same first-match discipline as `EDGE_RULES`.
const TYPE_RULES: &[(ArchitecturalPattern, fn(&str, &str) -> bool)] = &[
    (ArchitecturalPattern::Repository, |name, ns| {
        contains_any(name, &["repository", "data", "persistence"])
            || contains_any(ns, &["repository", "data", "persistence"])
    }),
    (ArchitecturalPattern::Factory, |name, _| {
        contains_any(name, &["factory", "builder"])
    }),
    (ArchitecturalPattern::ApplicationService, |name, ns| {
        (ns.contains("service") && !ns.contains("infrastructure"))
            || ns.contains("application")
            || (name.contains("service") && !name.contains("test"))
    }),
    (ArchitecturalPattern::DomainCore, |_, ns| {
        contains_any(ns, &["domain", "core", "business"])
            || (ns.contains("model") && !ns.contains("view"))
    }),
    (ArchitecturalPattern::Infrastructure, |_, ns| {
        contains_any(ns, &["infrastructure", "external", "integration", "persistence"])
    }),
    (ArchitecturalPattern::Testing, |name, ns| {
        contains_any(name, &["test", "mock"]) || contains_any(ns, &["test", "mock"])
    }),
    (ArchitecturalPattern::Configuration, |name, ns| {
        contains_any(name, &["configuration", "config", "settings"])
            || contains_any(ns, &["configuration", "config", "settings"])
    }),
];

const LAYER_RULES: &[(LayerType, fn(&str) -> bool)] = &[
    (LayerType::Presentation, |ns| {
        contains_any(ns, &["presentation", "ui", "web"])
    }),
    (LayerType::Application, |ns| {
        ns.contains("application") || (ns.contains("service") && !ns.contains("infrastructure"))
    }),
    (LayerType::Domain, |ns| {
        contains_any(ns, &["domain", "core", "business"])
    }),
    (LayerType::Infrastructure, |ns| {
        contains_any(ns, &["infrastructure", "external"])
    }),
    (LayerType::Data, |ns| {
        contains_any(ns, &["data", "persistence", "repository"])
    }),
    (LayerType::Test, |ns| ns.contains("test")),
    (LayerType::Configuration, |ns| ns.contains("config")),
];

/// Classify one edge. Total: falls through to `Unknown`, never fails.
pub fn detect_pattern(edge: &DependencyEdge, graph: &DependencyGraph) -> ArchitecturalPattern {
    let scope = EdgeScope::of(edge, graph);
    EDGE_RULES
        .iter()
        .find(|(_, predicate)| predicate(&scope))
        .map(|&(pattern, _)| pattern)
        .unwrap_or(ArchitecturalPattern::Unknown)
}

/// Classify one type from its qualified name alone.
pub fn detect_type_pattern(node: &TypeNode) -> ArchitecturalPattern {
    type_pattern_of_name(&node.name)
}

/// Assign a layer from the type's namespace.
pub fn detect_layer(node: &TypeNode) -> LayerType {
    layer_of_name(&node.name)
}

fn type_pattern_of_name(qualified: &str) -> ArchitecturalPattern {
    let name = simple_name_of(qualified).to_lowercase();
    let namespace = namespace_of(qualified).to_lowercase();
    TYPE_RULES
        .iter()
        .find(|(_, predicate)| predicate(&name, &namespace))
        .map(|&(pattern, _)| pattern)
        .unwrap_or(ArchitecturalPattern::Unknown)
}

fn layer_of_name(qualified: &str) -> LayerType {
    let namespace = namespace_of(qualified).to_lowercase();
    LAYER_RULES
        .iter()
        .find(|(_, predicate)| predicate(&namespace))
        .map(|&(layer, _)| layer)
        .unwrap_or(LayerType::Unknown)
}

/// Classifier with populate-once caches scoped to one analysis run.
///
/// Caches are owned state: two analyzers never share anything, so
/// independent analyses over unrelated graphs cannot interfere. A cached
/// entry is never overwritten once set.
#[derive(Debug, Default)]
pub struct PatternAnalyzer {
    edge_patterns: HashMap<(String, String), ArchitecturalPattern>,
    type_patterns: HashMap<String, ArchitecturalPattern>,
    type_layers: HashMap<String, LayerType>,
}

impl PatternAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify an edge, consulting the cache first. A miss runs
    /// `detect_pattern`, stores the result, and lazily fills the per-type
    /// pattern and layer caches for both endpoints.
    pub fn analyze_pattern(
        &mut self,
        edge: &DependencyEdge,
        graph: &DependencyGraph,
    ) -> ArchitecturalPattern {
        let key = (edge.source.clone(), edge.target.clone());
        if let Some(&cached) = self.edge_patterns.get(&key) {
            return cached;
        }

        let pattern = detect_pattern(edge, graph);
        self.edge_patterns.insert(key, pattern);

        for endpoint in [&edge.source, &edge.target] {
            self.type_patterns
                .entry(endpoint.clone())
                .or_insert_with(|| type_pattern_of_name(endpoint));
            self.type_layers
                .entry(endpoint.clone())
                .or_insert_with(|| layer_of_name(endpoint));
        }

        pattern
    }

    pub fn cached_type_pattern(&self, name: &str) -> Option<ArchitecturalPattern> {
        self.type_patterns.get(name).copied()
    }

    pub fn cached_layer(&self, name: &str) -> Option<LayerType> {
        self.type_layers.get(name).copied()
    }

    pub(crate) fn cache_type(&mut self, name: &str, pattern: ArchitecturalPattern, layer: LayerType) {
        self.type_patterns.entry(name.to_string()).or_insert(pattern);
        self.type_layers.entry(name.to_string()).or_insert(layer);
    }
}
