use anyhow::Context;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use sortimports_core::{
    format_report, manifest, reformat, report_for, rewrite, FileReport, ImportClassifier,
    ImportSorter, OutputFormat, ScanMetadata, SortConfig, SortReport, SortStats,
};
use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser)]
#[command(name = "sortimports")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sort and group the import blocks of Go source files")]
#[command(long_about = "A Rust-based tool that sorts Go import blocks into a single canonical \
    style: three groups (standard library, third-party, local package) separated by blank \
    lines, sorted alphabetically within each group. By default it only reports which files \
    need changes; pass --write to rewrite them in place.\n\n\
    Arguments may be single .go files or directories, which are scanned recursively with \
    gitignore support. The local package prefix defaults to the module path of the nearest \
    go.mod.")]
pub struct Args {
    /// Go files or directories to sort imports in
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,

    /// Import path of the local package (e.g. github.com/me/proj)
    #[arg(short, long)]
    pub local_package: Option<String>,

    /// Rewrite the files in-place
    #[arg(short, long)]
    pub write: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormatArg::Summary)]
    pub format: OutputFormatArg,

    /// Output file (defaults to stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Additional ignore patterns (gitignore style)
    #[arg(long, action = clap::ArgAction::Append)]
    pub ignore: Vec<String>,

    /// Ignore file path (defaults to .gitignore)
    #[arg(long)]
    pub ignore_file: Option<PathBuf>,

    /// Include vendor/ and testdata/ when scanning directories
    #[arg(long)]
    pub include_vendor: bool,

    /// Show verbose progress
    #[arg(short, long)]
    pub verbose: bool,

    /// Parallel threads for directory scans (0 = auto)
    #[arg(long, default_value_t = 0)]
    pub threads: usize,
}

#[derive(ValueEnum, Clone, Debug)]
pub enum OutputFormatArg {
    Json,
    Yaml,
    Summary,
}

impl From<OutputFormatArg> for OutputFormat {
    fn from(arg: OutputFormatArg) -> Self {
        match arg {
            OutputFormatArg::Json => OutputFormat::Json,
            OutputFormatArg::Yaml => OutputFormat::Yaml,
            OutputFormatArg::Summary => OutputFormat::Summary,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let start = Instant::now();

    let mut files: Vec<FileReport> = Vec::new();
    let mut files_rewritten = 0usize;

    // Paths are processed in order; the first failure aborts.
    for path in &args.paths {
        let local_package = args
            .local_package
            .clone()
            .or_else(|| manifest::find_module_path(path));

        if path.is_dir() {
            let mut config = SortConfig::new(path.clone())
                .with_local_package(local_package)
                .with_write(args.write)
                .with_ignore_patterns(args.ignore.clone())
                .with_include_vendor(args.include_vendor)
                .with_threads(args.threads);
            if let Some(ref ignore_file) = args.ignore_file {
                config = config.with_ignore_file(ignore_file.clone());
            }

            let spinner = if args.verbose {
                let pb = ProgressBar::new_spinner();
                pb.set_style(
                    ProgressStyle::default_spinner()
                        .template("{spinner:.green} {msg}")
                        .unwrap(),
                );
                pb.enable_steady_tick(Duration::from_millis(100));
                pb.set_message(format!("Scanning {}...", path.display()));
                Some(pb)
            } else {
                None
            };

            let report = ImportSorter::new(config)?.run()?;

            if let Some(pb) = spinner {
                pb.finish_with_message(format!(
                    "Scanned {} files in {}ms",
                    report.stats.total_files, report.metadata.scan_duration_ms
                ));
            }

            files_rewritten += report.stats.files_rewritten;
            files.extend(report.files.into_iter().map(|mut f| {
                f.path = path.join(&f.path);
                f
            }));
        } else {
            let classifier = ImportClassifier::new(local_package.as_deref());
            let changes = reformat(path, local_package.as_deref())
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            if args.write && changes.needed {
                rewrite(path, path, &changes)
                    .with_context(|| format!("Failed to rewrite {}", path.display()))?;
                files_rewritten += 1;
            }
            files.push(report_for(path.clone(), &changes, &classifier));
        }
    }

    // Aggregate the per-file reports into one combined report.
    let mut stats = SortStats {
        total_files: files.len(),
        files_rewritten,
        ..Default::default()
    };
    for file in &files {
        if file.needed {
            stats.files_needing_changes += 1;
        }
        stats.total_imports += file.total_imports;
        stats.stdlib_imports += file.stdlib_imports;
        stats.third_party_imports += file.third_party_imports;
        stats.local_imports += file.local_imports;
    }

    let duration = start.elapsed();
    let metadata = ScanMetadata {
        scan_duration_ms: duration.as_millis() as u64,
        files_per_second: if duration.as_secs_f64() > 0.0 {
            stats.total_files as f64 / duration.as_secs_f64()
        } else {
            0.0
        },
        ..Default::default()
    };

    let report = SortReport {
        root: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
        files,
        stats,
        metadata,
    };

    let output = format_report(&report, args.format.into())?;

    if let Some(path) = args.output {
        fs::write(&path, &output)?;
        if args.verbose {
            eprintln!("Output written to: {}", path.display());
        }
    } else {
        println!("{}", output);
    }

    Ok(())
}
