use crate::analysis::LayerType;
use crate::model::{AnalysisReport, Issue, IssueKind, IssueSeverity};
use crate::output::OutputFormatter;
use std::io::Write;

pub struct MarkdownOutput {
    pub min_severity: IssueSeverity,
}

impl MarkdownOutput {
    pub fn new(min_severity: IssueSeverity) -> Self {
        Self { min_severity }
    }
}

impl OutputFormatter for MarkdownOutput {
    fn format<W: Write>(&self, report: &AnalysisReport, writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "# Dependency Analysis\n")?;

        writeln!(writer, "## Metrics\n")?;
        writeln!(writer, "- Total types: {}", report.metrics.total_types)?;
        writeln!(writer, "- Total dependencies: {}", report.metrics.total_dependencies)?;
        writeln!(writer, "- Max fan-in: {}", report.metrics.max_fan_in)?;
        writeln!(writer, "- Max fan-out: {}", report.metrics.max_fan_out)?;
        writeln!(writer, "- Stable types: {}", report.metrics.stable_types)?;
        writeln!(writer, "- Unstable types: {}", report.metrics.unstable_types)?;

        writeln!(writer, "\n## Layers\n")?;
        for layer in [
            LayerType::Presentation,
            LayerType::Application,
            LayerType::Domain,
            LayerType::Infrastructure,
            LayerType::Data,
            LayerType::Test,
            LayerType::Configuration,
            LayerType::Unknown,
        ] {
            let count = report.context.iter().filter(|(_, c)| c.layer == layer).count();
            if count > 0 {
                writeln!(writer, "- {}: {} types", layer, count)?;
            }
        }

        let filtered_issues: Vec<_> = report
            .issues
            .iter()
            .filter(|i| i.severity >= self.min_severity)
            .collect();

        if filtered_issues.is_empty() {
            writeln!(writer, "\n## No Issues Found\n")?;
            writeln!(writer, "No structural issues detected.")?;
            return Ok(());
        }

        writeln!(writer, "\n## Issues Found\n")?;

        self.issue_section(writer, &filtered_issues, "🔴 Circular Dependencies", |i| {
            matches!(i.kind, IssueKind::CircularDependency)
        })?;
        self.issue_section(writer, &filtered_issues, "🟡 High Fan-In", |i| {
            matches!(i.kind, IssueKind::HighFanIn { .. })
        })?;
        self.issue_section(writer, &filtered_issues, "🟡 High Fan-Out", |i| {
            matches!(i.kind, IssueKind::HighFanOut { .. })
        })?;
        self.issue_section(writer, &filtered_issues, "🟡 Bidirectional Dependencies", |i| {
            matches!(i.kind, IssueKind::BidirectionalDependency)
        })?;

        Ok(())
    }
}

impl MarkdownOutput {
    fn issue_section<W: Write>(
        &self,
        writer: &mut W,
        issues: &[&Issue],
        title: &str,
        select: impl Fn(&Issue) -> bool,
    ) -> std::io::Result<()> {
        let selected: Vec<_> = issues.iter().filter(|i| select(i)).collect();
        if selected.is_empty() {
            return Ok(());
        }

        writeln!(writer, "### {}\n", title)?;
        for issue in selected {
            match issue.types.first() {
                Some(name) => writeln!(writer, "- `{}` - {}", name, issue.message)?,
                None => writeln!(writer, "- {}", issue.message)?,
            }
            if let Some(ref suggestion) = issue.suggestion {
                writeln!(writer, "  → {}", suggestion)?;
            }
        }
        writeln!(writer)?;

        Ok(())
    }
}
