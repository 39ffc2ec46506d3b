use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Classification bucket for an import path.
///
/// The declaration order is the group order in a canonical import
/// block: standard library first, then third-party, then local
/// packages. Blank separator lines are not a category; they are the
/// `ImportEntry::Blank` variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PackageType {
    /// Go standard library (exact match against the stdlib table)
    StandardLibrary,
    /// Externally hosted package (dotted import path)
    ThirdParty,
    /// Package under the local module, or unresolved dotless path
    LocalPackage,
}

/// A single real import declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportDecl {
    /// Local alias, if the import is named (`foo "bar/foo"`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The import path as written in source, quotes included
    pub path: String,
    /// Comment lines immediately preceding the import
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub doc: Vec<String>,
    /// Comment on the same line, after the path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ImportDecl {
    /// The import path with surrounding quotes or backticks removed.
    pub fn unquoted_path(&self) -> &str {
        trim_quotes(&self.path)
    }
}

/// One element of an import block: a real import or a blank
/// separator line between groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImportEntry {
    Blank,
    Import(ImportDecl),
}

impl ImportEntry {
    pub fn as_import(&self) -> Option<&ImportDecl> {
        match self {
            ImportEntry::Import(decl) => Some(decl),
            ImportEntry::Blank => None,
        }
    }

    /// Positional comparison used to decide whether a rewrite is
    /// needed: two entries match if they are both blank, or both
    /// imports with the same path and alias. Comments are ignored.
    pub fn same_import(&self, other: &ImportEntry) -> bool {
        match (self, other) {
            (ImportEntry::Blank, ImportEntry::Blank) => true,
            (ImportEntry::Import(a), ImportEntry::Import(b)) => {
                a.path == b.path && a.name == b.name
            }
            _ => false,
        }
    }
}

/// Strip the string-literal quotes from an import path.
pub fn trim_quotes(path: &str) -> &str {
    path.trim_matches(|c| c == '"' || c == '`')
}

/// The set of changes requested to one file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changes {
    /// Line the imports begin on, 1-indexed
    pub start_line: usize,
    /// Last line occupied by the last real import, 1-indexed
    pub end_line: usize,
    /// Canonical import sequence, separators included
    pub imports: Vec<ImportEntry>,
    /// True if a rewrite would change the file
    pub needed: bool,
}

impl Changes {
    /// Number of real imports (separators excluded).
    pub fn import_count(&self) -> usize {
        self.imports
            .iter()
            .filter(|e| matches!(e, ImportEntry::Import(_)))
            .count()
    }
}

/// Per-file result of a directory scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileReport {
    /// Relative path from the scan root
    pub path: PathBuf,
    /// Whether the import block needs rewriting
    pub needed: bool,
    pub total_imports: usize,
    pub stdlib_imports: usize,
    pub third_party_imports: usize,
    pub local_imports: usize,
}

/// Aggregated statistics for a scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SortStats {
    pub total_files: usize,
    pub files_needing_changes: usize,
    pub files_rewritten: usize,
    pub total_imports: usize,
    pub stdlib_imports: usize,
    pub third_party_imports: usize,
    pub local_imports: usize,
}

/// Scan metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanMetadata {
    pub scan_duration_ms: u64,
    pub files_per_second: f64,
    pub timestamp: String,
    pub tool_version: String,
}

impl Default for ScanMetadata {
    fn default() -> Self {
        Self {
            scan_duration_ms: 0,
            files_per_second: 0.0,
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Full result of scanning a directory tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortReport {
    /// Scan root path
    pub root: PathBuf,
    /// All Go files analyzed
    pub files: Vec<FileReport>,
    /// Aggregate statistics
    pub stats: SortStats,
    /// Scan metadata
    pub metadata: ScanMetadata,
}

impl SortReport {
    /// Files whose import block is not in canonical form.
    pub fn files_needing_changes(&self) -> impl Iterator<Item = &FileReport> {
        self.files.iter().filter(|f| f.needed)
    }
}
