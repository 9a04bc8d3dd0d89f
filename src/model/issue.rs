use crate::model::SourceLocation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub kind: IssueKind,
    pub severity: IssueSeverity,
    /// Qualified names of the types involved, in reporting order.
    pub types: Vec<String>,
    pub locations: Vec<SourceLocation>,
    pub message: String,
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum IssueKind {
    CircularDependency,
    HighFanIn { fan_in: usize },
    HighFanOut { fan_out: usize },
    BidirectionalDependency,
}

impl IssueKind {
    pub fn label(&self) -> &'static str {
        match self {
            IssueKind::CircularDependency => "circular_dependency",
            IssueKind::HighFanIn { .. } => "high_fan_in",
            IssueKind::HighFanOut { .. } => "high_fan_out",
            IssueKind::BidirectionalDependency => "bidirectional_dependency",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum IssueSeverity {
    Info,
    Warn,
    Error,
}

impl Issue {
    pub fn circular_dependency(cycle: Vec<String>, locations: Vec<SourceLocation>) -> Self {
        let cycle_str: Vec<_> = cycle
            .iter()
            .map(|n| crate::model::simple_name_of(n))
            .collect();

        Self {
            kind: IssueKind::CircularDependency,
            severity: IssueSeverity::Error,
            message: format!("Circular dependency: {}", cycle_str.join(" → ")),
            suggestion: Some(
                "Break the cycle by extracting shared types or inverting one of the references"
                    .to_string(),
            ),
            types: cycle,
            locations,
        }
    }

    pub fn high_fan_in(name: String, fan_in: usize, location: SourceLocation) -> Self {
        Self {
            kind: IssueKind::HighFanIn { fan_in },
            severity: IssueSeverity::Warn,
            message: format!("Depended upon by {} other types", fan_in),
            suggestion: Some(
                "Heavily depended-upon types are risky to change. Check whether this type has accumulated too many responsibilities".to_string(),
            ),
            types: vec![name],
            locations: vec![location],
        }
    }

    pub fn high_fan_out(name: String, fan_out: usize, location: SourceLocation) -> Self {
        Self {
            kind: IssueKind::HighFanOut { fan_out },
            severity: IssueSeverity::Warn,
            message: format!("Depends on {} other types", fan_out),
            suggestion: Some(
                "A type reaching into many others usually coordinates too much. Consider splitting it or introducing an abstraction".to_string(),
            ),
            types: vec![name],
            locations: vec![location],
        }
    }

    pub fn bidirectional_dependency(a: String, b: String, locations: Vec<SourceLocation>) -> Self {
        let message = format!(
            "{} and {} depend on each other",
            crate::model::simple_name_of(&a),
            crate::model::simple_name_of(&b)
        );
        Self {
            kind: IssueKind::BidirectionalDependency,
            severity: IssueSeverity::Warn,
            message,
            suggestion: Some(
                "Mutual dependencies couple both types into one unit. Move the shared part into a type both can depend on".to_string(),
            ),
            types: vec![a, b],
            locations,
        }
    }
}

impl std::fmt::Display for IssueSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IssueSeverity::Info => write!(f, "info"),
            IssueSeverity::Warn => write!(f, "warn"),
            IssueSeverity::Error => write!(f, "error"),
        }
    }
}

impl std::str::FromStr for IssueSeverity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(IssueSeverity::Info),
            "warn" | "warning" => Ok(IssueSeverity::Warn),
            "error" => Ok(IssueSeverity::Error),
            _ => Err(format!("Unknown severity: {}", s)),
        }
    }
}
