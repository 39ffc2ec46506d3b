use crate::models::{Changes, ImportDecl, ImportEntry};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RewriteError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Mismatching file lengths; expected at least {expected} lines but got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
}

/// Rewrite the contents of a file based on a set of changes.
///
/// When `changes.needed` is false this is a no-op: nothing is read
/// and nothing is written, so an unchanged file keeps its timestamp.
/// `infile` and `outfile` may be the same path for an in-place
/// rewrite; the output is assembled in memory first.
pub fn rewrite(infile: &Path, outfile: &Path, changes: &Changes) -> Result<(), RewriteError> {
    if !changes.needed {
        return Ok(());
    }

    let content = fs::read_to_string(infile).map_err(|e| RewriteError::Read {
        path: infile.to_path_buf(),
        source: e,
    })?;
    let mut lines: Vec<&str> = content.split('\n').collect();
    if lines.last() == Some(&"") {
        lines.pop();
    }
    if lines.len() < changes.end_line {
        return Err(RewriteError::LengthMismatch {
            expected: changes.end_line,
            actual: lines.len(),
        });
    }

    let mut out = String::with_capacity(content.len());

    // Everything before the import block, verbatim. A line starting
    // with the import keyword marks the true start of the block being
    // replaced, in case the recorded line numbers have gone stale.
    for line in &lines[..changes.start_line - 1] {
        if line.starts_with("import") {
            break;
        }
        out.push_str(line);
        out.push('\n');
    }

    if changes.import_count() == 1 {
        // Special case to write on a single line.
        if let Some(decl) = changes.imports.iter().find_map(|e| e.as_import()) {
            write_single_import(&mut out, decl);
        }
    } else {
        out.push_str("import (\n");
        for entry in &changes.imports {
            match entry {
                ImportEntry::Blank => out.push('\n'),
                ImportEntry::Import(decl) => write_import(&mut out, decl, "\t"),
            }
        }
        // Closing blank line. The block terminator is copied from the
        // original when one follows the last import; imports merged
        // from separate single-line declarations have none, so emit
        // it here.
        out.push('\n');
        let tail_closes = lines
            .get(changes.end_line)
            .map(|l| l.trim_start().starts_with(')'))
            .unwrap_or(false);
        if !tail_closes {
            out.push_str(")\n");
        }
    }

    // Everything after the last original import, verbatim.
    for line in &lines[changes.end_line..] {
        out.push_str(line);
        out.push('\n');
    }

    fs::write(outfile, out).map_err(|e| RewriteError::Write {
        path: outfile.to_path_buf(),
        source: e,
    })
}

fn write_single_import(out: &mut String, decl: &ImportDecl) {
    for doc in &decl.doc {
        out.push_str(doc);
        out.push('\n');
    }
    out.push_str("import ");
    push_spec(out, decl);
}

/// Write a single import spec with the given indent prefix.
fn write_import(out: &mut String, decl: &ImportDecl, prefix: &str) {
    for doc in &decl.doc {
        out.push_str(prefix);
        out.push_str(doc);
        out.push('\n');
    }
    out.push_str(prefix);
    push_spec(out, decl);
}

fn push_spec(out: &mut String, decl: &ImportDecl) {
    if let Some(ref name) = decl.name {
        out.push_str(name);
        out.push(' ');
    }
    out.push_str(&decl.path);
    if let Some(ref comment) = decl.comment {
        out.push(' ');
        out.push_str(comment);
    }
    out.push('\n');
}
