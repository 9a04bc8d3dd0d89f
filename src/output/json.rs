use crate::model::{AnalysisReport, GraphMetrics, SourceLocation};
use crate::output::OutputFormatter;
use serde::Serialize;
use std::io::Write;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    metrics: &'a GraphMetrics,
    issues: Vec<JsonIssue<'a>>,
    types: Vec<JsonTypeContext<'a>>,
}

#[derive(Serialize)]
struct JsonIssue<'a> {
    kind: &'static str,
    severity: String,
    message: &'a str,
    types: &'a [String],
    locations: &'a [SourceLocation],
    suggestion: Option<&'a str>,
}

#[derive(Serialize)]
struct JsonTypeContext<'a> {
    name: &'a str,
    pattern: String,
    layer: String,
    afferent_coupling: usize,
    efferent_coupling: usize,
    is_cyclic: bool,
    change_frequency: f64,
}

impl OutputFormatter for JsonOutput {
    fn format<W: Write>(&self, report: &AnalysisReport, writer: &mut W) -> std::io::Result<()> {
        // Sorted by name so the output is stable across runs
        let mut types: Vec<JsonTypeContext> = report
            .context
            .iter()
            .map(|(name, ctx)| JsonTypeContext {
                name: name.as_str(),
                pattern: ctx.pattern.to_string(),
                layer: ctx.layer.to_string(),
                afferent_coupling: ctx.afferent_coupling,
                efferent_coupling: ctx.efferent_coupling,
                is_cyclic: ctx.is_cyclic,
                change_frequency: ctx.change_frequency,
            })
            .collect();
        types.sort_by(|a, b| a.name.cmp(b.name));

        let json_report = JsonReport {
            metrics: &report.metrics,
            issues: report
                .issues
                .iter()
                .map(|i| JsonIssue {
                    kind: i.kind.label(),
                    severity: i.severity.to_string(),
                    message: &i.message,
                    types: &i.types,
                    locations: &i.locations,
                    suggestion: i.suggestion.as_deref(),
                })
                .collect(),
            types,
        };

        let json = serde_json::to_string_pretty(&json_report).map_err(std::io::Error::other)?;

        writeln!(writer, "{}", json)
    }
}
