//! Sortimports Core Library
//!
//! This library sorts and groups the import block of Go source
//! files into a single canonical style: three groups (standard
//! library, third-party, local package) separated by blank lines,
//! sorted alphabetically within each group.
//!
//! # Features
//!
//! - Extract Go import declarations (tree-sitter based), including
//!   doc and trailing comments
//! - Classify imports as stdlib, third-party, or local
//! - Compute the canonical import block and whether a file needs it
//! - Rewrite files in place, touching nothing outside the block
//! - Scan whole directory trees with gitignore support
//! - Output scan reports in JSON, YAML, or summary format
//!
//! # Example
//!
//! ```no_run
//! use sortimports_core::{reformat, rewrite};
//! use std::path::Path;
//!
//! let path = Path::new("main.go");
//! let changes = reformat(path, Some("github.com/me/proj")).unwrap();
//! if changes.needed {
//!     rewrite(path, path, &changes).unwrap();
//! }
//! ```

pub mod classifier;
pub mod config;
pub mod manifest;
pub mod models;
pub mod output;
pub mod parsers;
pub mod reformat;
pub mod rewrite;
pub mod scanner;
pub mod stdlib;

// Re-exports for convenience
pub use classifier::ImportClassifier;
pub use config::SortConfig;
pub use models::*;
pub use output::{format_report, format_summary, FormatError, OutputFormat};
pub use reformat::{reformat, reformat_source, ReformatError};
pub use rewrite::{rewrite, RewriteError};
pub use scanner::{report_for, ImportSorter, ScanError};
