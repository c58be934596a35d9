use anyhow::Context;
use asdlc_core::conformance::{validate_project, ReportFormat};
use asdlc_core::io::atomic_write;
use std::path::Path;

/// Validate `project`, print or write the report, and return the exit code
/// (0 when the overall score passes, 1 otherwise). A missing project scores
/// zero everywhere; it is reported, not rejected.
pub fn run(project: &Path, format: ReportFormat, output: Option<&Path>) -> anyhow::Result<i32> {
    let report = validate_project(project);
    let rendered = format
        .render(&report)
        .with_context(|| format!("failed to render {format} report"))?;

    match output {
        Some(path) => {
            atomic_write(path, rendered.as_bytes())
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Report written to {}", path.display());
            println!("Overall score: {:.1}/100", report.overall_score);
        }
        None => println!("{}", rendered.trim_end()),
    }

    Ok(report.exit_code())
}
