use crate::classifier::ImportClassifier;
use crate::models::{trim_quotes, Changes, ImportDecl, ImportEntry, PackageType};
use crate::parsers::{GoParser, ImportParser, ParserError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReformatError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse { path: PathBuf, source: ParserError },
}

/// Analyze a Go source file and compute the canonical form of its
/// import block.
pub fn reformat(path: &Path, local_package: Option<&str>) -> Result<Changes, ReformatError> {
    let source = fs::read_to_string(path).map_err(|e| ReformatError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    reformat_source(&source, local_package).map_err(|e| ReformatError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Analyze Go source text and compute the canonical form of its
/// import block.
///
/// The result is a pure function of the source text, the local
/// package prefix, and the static stdlib table; separators are
/// recomputed from classification rather than trusted from the
/// input, which is what makes the tool idempotent.
pub fn reformat_source(
    source: &str,
    local_package: Option<&str>,
) -> Result<Changes, ParserError> {
    let mut parser = GoParser::new()?;
    let parsed = parser.parse(source)?;

    // Extract in source order, inserting a blank marker wherever the
    // original block left more than one line between imports. An
    // import's span starts at its doc comment, so doc lines are not
    // mistaken for gaps and the head copy on rewrite stops before
    // them.
    let mut entries: Vec<ImportEntry> = Vec::with_capacity(parsed.len());
    let mut start_line = 0;
    let mut end_line = 0;
    for imp in parsed {
        let block_start = imp.doc_line.unwrap_or(imp.start_line);
        if start_line == 0 {
            start_line = block_start;
        }
        if !entries.is_empty() && block_start > end_line + 1 {
            entries.push(ImportEntry::Blank);
        }
        end_line = imp.end_line;
        entries.push(ImportEntry::Import(imp.into()));
    }

    // Keep the original sequence so we can work out later whether
    // anything changed.
    let original = entries.clone();

    let classifier = ImportClassifier::new(local_package);

    let mut decls: Vec<ImportDecl> = entries
        .into_iter()
        .filter_map(|entry| match entry {
            ImportEntry::Import(decl) => Some(decl),
            ImportEntry::Blank => None,
        })
        .collect();
    decls.sort_by(|a, b| {
        let path_a = trim_quotes(&a.path);
        let path_b = trim_quotes(&b.path);
        let type_a = classifier.classify(path_a);
        let type_b = classifier.classify(path_b);
        type_a
            .cmp(&type_b)
            .then_with(|| path_a.cmp(path_b))
            .then_with(|| a.name.cmp(&b.name))
    });

    // Re-insert exactly one separator at each category transition.
    let mut imports: Vec<ImportEntry> = Vec::with_capacity(decls.len() + 2);
    let mut last_type: Option<PackageType> = None;
    for decl in decls {
        let this_type = classifier.classify(decl.unquoted_path());
        if last_type.is_some_and(|last| last != this_type) {
            imports.push(ImportEntry::Blank);
        }
        imports.push(ImportEntry::Import(decl));
        last_type = Some(this_type);
    }

    let needed = imports.len() != original.len()
        || imports
            .iter()
            .zip(original.iter())
            .any(|(a, b)| !a.same_import(b));

    Ok(Changes {
        start_line,
        end_line,
        imports,
        needed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths(changes: &Changes) -> Vec<String> {
        changes
            .imports
            .iter()
            .map(|e| match e {
                ImportEntry::Blank => String::new(),
                ImportEntry::Import(d) => d.path.clone(),
            })
            .collect()
    }

    #[test]
    fn test_already_sorted_stdlib() {
        // Scenario A
        let src = "package main\n\nimport (\n\t\"fmt\"\n\t\"strings\"\n)\n";
        let changes = reformat_source(src, None).unwrap();
        assert!(!changes.needed);
        assert_eq!(paths(&changes), vec!["\"fmt\"", "\"strings\""]);
        assert_eq!(changes.start_line, 4);
        assert_eq!(changes.end_line, 5);
    }

    #[test]
    fn test_out_of_order_stdlib() {
        // Scenario B
        let src = "package main\n\nimport (\n\t\"strings\"\n\t\"fmt\"\n)\n";
        let changes = reformat_source(src, None).unwrap();
        assert!(changes.needed);
        assert_eq!(paths(&changes), vec!["\"fmt\"", "\"strings\""]);
    }

    #[test]
    fn test_missing_separator_between_groups() {
        // Scenario C
        let src = "package main\n\nimport (\n\t\"fmt\"\n\t\"github.com/foo/bar\"\n)\n";
        let changes = reformat_source(src, None).unwrap();
        assert!(changes.needed);
        assert_eq!(
            paths(&changes),
            vec!["\"fmt\"", "", "\"github.com/foo/bar\""]
        );
    }

    #[test]
    fn test_existing_separator_is_canonical() {
        let src = "package main\n\nimport (\n\t\"fmt\"\n\n\t\"github.com/foo/bar\"\n)\n";
        let changes = reformat_source(src, None).unwrap();
        assert!(!changes.needed);
    }

    #[test]
    fn test_spurious_separator_within_group() {
        let src = "package main\n\nimport (\n\t\"fmt\"\n\n\t\"strings\"\n)\n";
        let changes = reformat_source(src, None).unwrap();
        assert!(changes.needed);
        assert_eq!(paths(&changes), vec!["\"fmt\"", "\"strings\""]);
    }

    #[test]
    fn test_local_package_sorts_last() {
        // Scenario D
        let src = "package main\n\nimport (\n\t\"github.com/me/proj/sub\"\n\t\"github.com/zzz/other\"\n\t\"fmt\"\n)\n";
        let changes = reformat_source(src, Some("github.com/me/proj")).unwrap();
        assert!(changes.needed);
        assert_eq!(
            paths(&changes),
            vec![
                "\"fmt\"",
                "",
                "\"github.com/zzz/other\"",
                "",
                "\"github.com/me/proj/sub\"",
            ]
        );
    }

    #[test]
    fn test_dotless_path_groups_with_local() {
        let src = "package main\n\nimport (\n\t\"myproj/util\"\n\t\"fmt\"\n)\n";
        let changes = reformat_source(src, None).unwrap();
        assert!(changes.needed);
        assert_eq!(paths(&changes), vec!["\"fmt\"", "", "\"myproj/util\""]);
    }

    #[test]
    fn test_alias_breaks_path_ties() {
        let src = "package main\n\nimport (\n\tzzz \"fmt\"\n\taaa \"fmt\"\n)\n";
        let changes = reformat_source(src, None).unwrap();
        assert!(changes.needed);
        let names: Vec<_> = changes
            .imports
            .iter()
            .filter_map(|e| e.as_import())
            .map(|d| d.name.clone())
            .collect();
        assert_eq!(names, vec![Some("aaa".to_string()), Some("zzz".to_string())]);
    }

    #[test]
    fn test_three_groups_in_order() {
        let src = "package main\n\nimport (\n\t\"myproj/util\"\n\t\"github.com/foo/bar\"\n\t\"os\"\n\t\"fmt\"\n)\n";
        let changes = reformat_source(src, None).unwrap();
        assert_eq!(
            paths(&changes),
            vec![
                "\"fmt\"",
                "\"os\"",
                "",
                "\"github.com/foo/bar\"",
                "",
                "\"myproj/util\"",
            ]
        );
    }

    #[test]
    fn test_comments_travel_with_import() {
        let src = "package main\n\nimport (\n\t\"strings\"\n\t// fmt docs\n\t\"fmt\" // trailing\n)\n";
        let changes = reformat_source(src, None).unwrap();
        assert!(changes.needed);
        let first = changes.imports[0].as_import().unwrap();
        assert_eq!(first.path, "\"fmt\"");
        assert_eq!(first.doc, vec!["// fmt docs".to_string()]);
        assert_eq!(first.comment.as_deref(), Some("// trailing"));
    }

    #[test]
    fn test_doc_comment_between_imports_is_not_a_gap() {
        // The doc line widens the distance between the specs but is
        // part of the next import, not a separator.
        let src = "package main\n\nimport (\n\t\"fmt\"\n\t// string helpers\n\t\"strings\"\n)\n";
        let changes = reformat_source(src, None).unwrap();
        assert!(!changes.needed);
        assert_eq!(paths(&changes), vec!["\"fmt\"", "\"strings\""]);
    }

    #[test]
    fn test_doc_comment_on_first_import_starts_the_span() {
        let src = "package main\n\nimport (\n\t// docs\n\t\"fmt\"\n\t\"strings\"\n)\n";
        let changes = reformat_source(src, None).unwrap();
        assert!(!changes.needed);
        assert_eq!(changes.start_line, 4);
        assert_eq!(changes.end_line, 6);
    }

    #[test]
    fn test_no_imports() {
        let changes = reformat_source("package main\n\nfunc main() {}\n", None).unwrap();
        assert!(!changes.needed);
        assert_eq!(changes.start_line, 0);
        assert!(changes.imports.is_empty());
    }

    #[test]
    fn test_deterministic() {
        let src = "package main\n\nimport (\n\t\"strings\"\n\t\"github.com/foo/bar\"\n\t\"fmt\"\n)\n";
        let a = reformat_source(src, Some("example.com/me")).unwrap();
        let b = reformat_source(src, Some("example.com/me")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_separate_declarations_merge() {
        let src = "package main\n\nimport \"strings\"\nimport \"fmt\"\n";
        let changes = reformat_source(src, None).unwrap();
        assert!(changes.needed);
        assert_eq!(paths(&changes), vec!["\"fmt\"", "\"strings\""]);
        assert_eq!(changes.start_line, 3);
        assert_eq!(changes.end_line, 4);
    }

    #[test]
    fn test_reformat_missing_file() {
        let err = reformat(Path::new("/nonexistent/file.go"), None).unwrap_err();
        assert!(matches!(err, ReformatError::Io { .. }));
    }
}
