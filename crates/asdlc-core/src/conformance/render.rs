use super::{passes, Category, ValidationReport};
use crate::error::{AsdlcError, Result};
use std::fmt;

const PASS_MARK: &str = "✓";
const FAIL_MARK: &str = "✗";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Markdown,
    Json,
    Text,
}

impl ReportFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportFormat::Markdown => "markdown",
            ReportFormat::Json => "json",
            ReportFormat::Text => "text",
        }
    }

    /// Render an already-computed report. Nothing is re-evaluated.
    pub fn render(self, report: &ValidationReport) -> Result<String> {
        match self {
            ReportFormat::Markdown => Ok(render_markdown(report)),
            ReportFormat::Json => Ok(serde_json::to_string_pretty(report)?),
            ReportFormat::Text => Ok(render_text(report)),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ReportFormat {
    type Err = AsdlcError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "json" => Ok(ReportFormat::Json),
            "text" | "txt" => Ok(ReportFormat::Text),
            _ => Err(AsdlcError::InvalidReportFormat(s.to_string())),
        }
    }
}

fn status_mark(score: f64) -> &'static str {
    if passes(score) {
        PASS_MARK
    } else {
        FAIL_MARK
    }
}

pub fn render_markdown(report: &ValidationReport) -> String {
    let mut out = String::from("# A-SDLC Conformance Report\n\n");
    out.push_str(&format!("**Project**: {}  \n", report.project_name));
    out.push_str(&format!("**Date**: {}  \n", report.timestamp));
    out.push_str(&format!(
        "**Overall Score**: {:.1}/100\n\n",
        report.overall_score
    ));

    out.push_str("## Category Summary\n\n");
    out.push_str("| Category | Score | Status |\n");
    out.push_str("|----------|-------|--------|\n");
    for (category, score) in report.categories.scores() {
        out.push_str(&format!(
            "| {} | {:.1}/100 | {} |\n",
            category.label(),
            score,
            status_mark(score)
        ));
    }

    out.push_str("\n## Suggestions\n\n");
    for suggestion in &report.suggestions {
        out.push_str(&format!("- {suggestion}\n"));
    }

    if !report.auto_fix_commands.is_empty() {
        out.push_str("\n## Auto-fix Commands\n\n```bash\n");
        for command in &report.auto_fix_commands {
            out.push_str(command);
            out.push('\n');
        }
        out.push_str("```\n");
    }

    out
}

pub fn render_text(report: &ValidationReport) -> String {
    let mut out = String::from("A-SDLC CONFORMANCE REPORT\n=========================\n\n");
    out.push_str(&format!("Project: {}\n", report.project_name));
    out.push_str(&format!("Date: {}\n", report.timestamp));
    out.push_str(&format!(
        "Overall Score: {:.1}/100\n\n",
        report.overall_score
    ));

    out.push_str("CATEGORIES:\n-----------\n");
    for &category in Category::all() {
        let score = report.categories.score(category);
        out.push_str(&format!(
            "{category}: {score:.1}/100 {}\n",
            status_mark(score)
        ));
    }

    out.push_str("\nSUGGESTIONS:\n------------\n");
    for suggestion in &report.suggestions {
        out.push_str(&format!("- {suggestion}\n"));
    }

    out
}
