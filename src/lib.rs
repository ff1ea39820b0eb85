pub mod analyzer;
pub mod report;

use std::path::Path;

use anyhow::Context;

pub use analyzer::{Analyzer, AnalyzerError, SpaceUsed, StatFilter, StatSummary};

/// Analyzes the database file and renders the disk-space utilization
/// report. The file is opened read-only and closed before this returns.
pub fn generate_report(path: impl AsRef<Path>) -> anyhow::Result<String> {
    let path = path.as_ref();

    let stats = Analyzer::open(path)
        .with_context(|| format!("failed to analyze {}", path.display()))?;

    Ok(report::render(&stats))
}
