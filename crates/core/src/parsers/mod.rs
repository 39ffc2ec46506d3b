mod go;

pub use go::GoParser;

use crate::models::ImportDecl;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParserError {
    #[error("Failed to initialize parser: {0}")]
    InitError(String),
    #[error("Failed to parse source code: {0}")]
    ParseError(String),
    #[error("Syntax error near line {line}")]
    SyntaxError { line: usize },
}

/// One import declaration as it appears in source, with the line
/// span the extractor needs for gap detection and block replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedImport {
    /// Local alias (`foo`, `.`, or `_`), if named
    pub name: Option<String>,
    /// Import path verbatim, quotes included
    pub path: String,
    /// Comment lines immediately preceding the import
    pub doc: Vec<String>,
    /// Comment on the same line, after the path
    pub comment: Option<String>,
    /// First source line of the import spec, 1-indexed
    pub start_line: usize,
    /// Last source line of the import spec, 1-indexed
    pub end_line: usize,
    /// First line of the doc comment, when present. Always directly
    /// above `start_line` since detached comments are not doc.
    pub doc_line: Option<usize>,
}

impl From<ParsedImport> for ImportDecl {
    fn from(parsed: ParsedImport) -> Self {
        ImportDecl {
            name: parsed.name,
            path: parsed.path,
            doc: parsed.doc,
            comment: parsed.comment,
        }
    }
}

/// Trait for language-specific import extractors
pub trait ImportParser {
    /// Parse source code and extract import declarations in source
    /// order. Fails on unparseable input; no partial recovery.
    fn parse(&mut self, source: &str) -> Result<Vec<ParsedImport>, ParserError>;
}
