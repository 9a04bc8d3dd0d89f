use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Opaque handle into the external extractor's symbol table.
pub type SymbolId = String;

/// Declaration site of a type, as reported by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file: PathBuf,
    pub start_line: usize,
    pub end_line: usize,
}

impl SourceLocation {
    pub fn new(file: impl Into<PathBuf>, start_line: usize, end_line: usize) -> Self {
        Self {
            file: file.into(),
            start_line,
            end_line,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TypeKind {
    Class,
    Interface,
    Struct,
    Enum,
    Record,
}

/// A type declaration registered in the dependency graph.
///
/// Identity is the fully-qualified name (dot- or `::`-separated). Nodes are
/// produced once by the extractor and never mutated afterwards; their
/// dependency/dependent edge lists live inside the graph arena.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeNode {
    /// Fully-qualified name, unique within one graph.
    pub name: String,
    pub symbol: SymbolId,
    pub kind: TypeKind,
    pub location: SourceLocation,
    /// Owning project or module identifier.
    pub project: String,
}

impl TypeNode {
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<SymbolId>,
        kind: TypeKind,
        location: SourceLocation,
        project: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            kind,
            location,
            project: project.into(),
        }
    }

    /// Last segment of the qualified name.
    pub fn simple_name(&self) -> &str {
        simple_name_of(&self.name)
    }

    /// Everything before the last segment; empty for unqualified names.
    pub fn namespace(&self) -> &str {
        namespace_of(&self.name)
    }

    /// First segment of the qualified name.
    pub fn top_level_namespace(&self) -> &str {
        top_namespace_of(&self.name)
    }

    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }
}

fn split_qualified(qualified: &str) -> (&str, &str) {
    if let Some(idx) = qualified.rfind("::") {
        (&qualified[..idx], &qualified[idx + 2..])
    } else if let Some(idx) = qualified.rfind('.') {
        (&qualified[..idx], &qualified[idx + 1..])
    } else {
        ("", qualified)
    }
}

pub fn simple_name_of(qualified: &str) -> &str {
    split_qualified(qualified).1
}

pub fn namespace_of(qualified: &str) -> &str {
    split_qualified(qualified).0
}

pub fn top_namespace_of(qualified: &str) -> &str {
    let end = qualified
        .find(|c| c == '.' || c == ':')
        .unwrap_or(qualified.len());
    &qualified[..end]
}
