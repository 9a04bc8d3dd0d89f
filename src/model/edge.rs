use crate::model::SourceLocation;
use serde::{Deserialize, Serialize};

/// How one type depends on another. Closed set; the extractor never emits
/// anything outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DependencyKind {
    Constructor,
    Interface,
    Method,
    Property,
    Field,
    Event,
}

impl std::fmt::Display for DependencyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Constructor => write!(f, "constructor"),
            Self::Interface => write!(f, "interface"),
            Self::Method => write!(f, "method"),
            Self::Property => write!(f, "property"),
            Self::Field => write!(f, "field"),
            Self::Event => write!(f, "event"),
        }
    }
}

/// A directed, typed relationship between two registered types.
///
/// The graph is a multigraph: several edges may connect the same ordered
/// pair as long as they differ in kind or member.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DependencyEdge {
    /// Qualified name of the depending type.
    pub source: String,
    /// Qualified name of the depended-upon type.
    pub target: String,
    pub kind: DependencyKind,
    /// Member through which the dependency is expressed, when known.
    pub member: Option<String>,
    pub location: SourceLocation,
    /// Owning document reference from the extractor.
    pub document: Option<String>,
}

impl DependencyEdge {
    pub fn new(
        source: impl Into<String>,
        target: impl Into<String>,
        kind: DependencyKind,
        location: SourceLocation,
    ) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
            kind,
            member: None,
            location,
            document: None,
        }
    }

    pub fn with_member(mut self, member: impl Into<String>) -> Self {
        self.member = Some(member.into());
        self
    }

    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = Some(document.into());
        self
    }
}
