use crate::classifier::ImportClassifier;
use crate::config::{ConfigError, IgnoreFilter, SortConfig};
use crate::models::{Changes, FileReport, PackageType, ScanMetadata, SortReport, SortStats};
use crate::reformat::{reformat, ReformatError};
use crate::rewrite::{rewrite, RewriteError};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Config error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error(transparent)]
    ReformatError(#[from] ReformatError),
    #[error(transparent)]
    RewriteError(#[from] RewriteError),
}

/// Walks a directory tree and sorts the import block of every Go
/// file found.
pub struct ImportSorter {
    config: SortConfig,
    ignore_filter: IgnoreFilter,
}

impl ImportSorter {
    pub fn new(config: SortConfig) -> Result<Self, ScanError> {
        let ignore_filter = IgnoreFilter::new(&config)?;
        Ok(Self {
            config,
            ignore_filter,
        })
    }

    /// Analyze (and with `write` set, rewrite) every Go file under
    /// the root. Files are independent, so they are processed in
    /// parallel; the first failure aborts the scan.
    pub fn run(&self) -> Result<SortReport, ScanError> {
        let start = Instant::now();

        let classifier = ImportClassifier::new(self.config.local_package.as_deref());
        let source_files = self.find_go_files();

        let files: Vec<FileReport> = if self.config.threads == 1 {
            source_files
                .iter()
                .map(|path| self.process_file(path, &classifier))
                .collect::<Result<_, _>>()?
        } else {
            let pool = if self.config.threads > 0 {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(self.config.threads)
                    .build()
                    .ok()
            } else {
                None
            };

            match pool {
                Some(pool) => pool.install(|| {
                    source_files
                        .par_iter()
                        .map(|path| self.process_file(path, &classifier))
                        .collect::<Result<_, _>>()
                })?,
                None => source_files
                    .par_iter()
                    .map(|path| self.process_file(path, &classifier))
                    .collect::<Result<_, _>>()?,
            }
        };

        let stats = self.calculate_stats(&files);

        let duration = start.elapsed();
        let metadata = ScanMetadata {
            scan_duration_ms: duration.as_millis() as u64,
            files_per_second: if duration.as_secs_f64() > 0.0 {
                files.len() as f64 / duration.as_secs_f64()
            } else {
                0.0
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
        };

        Ok(SortReport {
            root: self.config.root.clone(),
            files,
            stats,
            metadata,
        })
    }

    /// Find all Go source files under the root
    fn find_go_files(&self) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.config.root)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();

            if entry.file_type().is_dir() {
                continue;
            }
            if self.ignore_filter.should_ignore(path, false) {
                continue;
            }
            if !self.ignore_filter.is_go_file(path) {
                continue;
            }

            files.push(path.to_path_buf());
        }

        files
    }

    /// Analyze one file, rewriting it in place when configured
    fn process_file(
        &self,
        path: &Path,
        classifier: &ImportClassifier,
    ) -> Result<FileReport, ScanError> {
        let changes = reformat(path, self.config.local_package.as_deref())?;
        if self.config.write {
            rewrite(path, path, &changes)?;
        }

        let relative = path
            .strip_prefix(&self.config.root)
            .unwrap_or(path)
            .to_path_buf();

        Ok(report_for(relative, &changes, classifier))
    }

    fn calculate_stats(&self, files: &[FileReport]) -> SortStats {
        let mut stats = SortStats {
            total_files: files.len(),
            ..Default::default()
        };

        for file in files {
            if file.needed {
                stats.files_needing_changes += 1;
                if self.config.write {
                    stats.files_rewritten += 1;
                }
            }
            stats.total_imports += file.total_imports;
            stats.stdlib_imports += file.stdlib_imports;
            stats.third_party_imports += file.third_party_imports;
            stats.local_imports += file.local_imports;
        }

        stats
    }
}

/// Build the per-file report for a computed change set.
pub fn report_for(path: PathBuf, changes: &Changes, classifier: &ImportClassifier) -> FileReport {
    let mut report = FileReport {
        path,
        needed: changes.needed,
        total_imports: 0,
        stdlib_imports: 0,
        third_party_imports: 0,
        local_imports: 0,
    };

    for decl in changes.imports.iter().filter_map(|e| e.as_import()) {
        report.total_imports += 1;
        match classifier.classify(decl.unquoted_path()) {
            PackageType::StandardLibrary => report.stdlib_imports += 1,
            PackageType::ThirdParty => report.third_party_imports += 1,
            PackageType::LocalPackage => report.local_imports += 1,
        }
    }

    report
}
