mod json;
mod markdown;

pub use json::JsonOutput;
pub use markdown::MarkdownOutput;

use crate::model::AnalysisReport;
use std::io::Write;

pub trait OutputFormatter {
    fn format<W: Write>(&self, report: &AnalysisReport, writer: &mut W) -> std::io::Result<()>;
}
