mod json;
mod yaml;

pub use json::to_json;
pub use yaml::to_yaml;

use crate::models::SortReport;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Yaml,
    Summary,
}

/// Format a SortReport according to the specified format
pub fn format_report(report: &SortReport, format: OutputFormat) -> Result<String, FormatError> {
    match format {
        OutputFormat::Json => to_json(report),
        OutputFormat::Yaml => to_yaml(report),
        OutputFormat::Summary => Ok(format_summary(report)),
    }
}

/// Generate a human-readable summary
pub fn format_summary(report: &SortReport) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Import Sort Summary\n\
         ===================\n\
         Root: {}\n\n",
        report.root.display()
    ));

    output.push_str(&format!(
        "Files scanned: {}\n\
         Files needing changes: {}\n\
         Files rewritten: {}\n\n",
        report.stats.total_files,
        report.stats.files_needing_changes,
        report.stats.files_rewritten
    ));

    let needing: Vec<_> = report.files_needing_changes().collect();
    if !needing.is_empty() {
        output.push_str("Needs sorting:\n");
        for file in needing {
            output.push_str(&format!("  {}\n", file.path.display()));
        }
        output.push('\n');
    }

    output.push_str(&format!(
        "Imports: {} (stdlib: {}, third-party: {}, local: {})\n\n",
        report.stats.total_imports,
        report.stats.stdlib_imports,
        report.stats.third_party_imports,
        report.stats.local_imports
    ));

    output.push_str(&format!(
        "Scan Duration: {}ms ({:.2} files/sec)\n\
         Timestamp: {}\n\
         Tool Version: {}\n",
        report.metadata.scan_duration_ms,
        report.metadata.files_per_second,
        report.metadata.timestamp,
        report.metadata.tool_version
    ));

    output
}

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("YAML serialization error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}
