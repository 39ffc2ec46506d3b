use super::FormatError;
use crate::models::SortReport;

/// Serialize a SortReport to pretty-printed JSON
pub fn to_json(report: &SortReport) -> Result<String, FormatError> {
    serde_json::to_string_pretty(report).map_err(FormatError::from)
}

/// Serialize a SortReport to compact JSON
#[allow(dead_code)]
pub fn to_json_compact(report: &SortReport) -> Result<String, FormatError> {
    serde_json::to_string(report).map_err(FormatError::from)
}
