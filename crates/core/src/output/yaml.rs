use super::FormatError;
use crate::models::SortReport;

/// Serialize a SortReport to YAML
pub fn to_yaml(report: &SortReport) -> Result<String, FormatError> {
    serde_yaml::to_string(report).map_err(FormatError::from)
}
