use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use picsort_core::{RenameOptions, Report, TimestampField};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Clone, Copy, ValueEnum)]
enum FieldArg {
    /// Image DateTime (last modification)
    Datetime,
    /// EXIF DateTimeOriginal (capture)
    Original,
}

impl From<FieldArg> for TimestampField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::Datetime => TimestampField::DateTime,
            FieldArg::Original => TimestampField::Original,
        }
    }
}

#[derive(Parser)]
#[command(name = "picsort", version, about = "Rename the photos of a folder after the time they were shot")]
struct Cli {
    /// Folder holding all and only the photos to rename
    #[arg(env = "PICSORT_DIR")]
    directory: PathBuf,

    /// EXIF tag to take the timestamp from
    #[arg(long, value_enum, default_value = "datetime")]
    field: FieldArg,

    /// Prefix of the new filenames
    #[arg(long, default_value = picsort_core::DEFAULT_PREFIX)]
    prefix: String,

    /// Only look at files with an image extension
    #[arg(long)]
    images_only: bool,

    /// Set the modification time of renamed files to their timestamp
    #[arg(long)]
    set_mtime: bool,

    /// Also write the report as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Debug logging on stderr (RUST_LOG overrides)
    #[arg(short, long)]
    verbose: bool,

    /// No progress bar
    #[arg(short, long)]
    quiet: bool,
}

/// Run the renamer, driving `pb` from the progress callback.
fn run_with_bar(options: &RenameOptions, pb: &ProgressBar) -> anyhow::Result<Report> {
    let report = picsort_core::process(options, &|stage, current, total, message| {
        pb.set_length(total);
        pb.set_position(current + 1);
        pb.set_message(format!("{} ({})", message, stage));
    })?;
    Ok(report)
}

fn write_json_report(report: &Report, path: &Path) -> anyhow::Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    report.write_json(&mut writer)?;
    // BufWriter drops flush errors silently
    writer
        .flush()
        .with_context(|| format!("writing {}", path.display()))?;
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let t_total = std::time::Instant::now();

    let log_level = if cli.verbose { "debug" } else { "error" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let options = RenameOptions {
        directory: cli.directory,
        field: cli.field.into(),
        prefix: cli.prefix,
        images_only: cli.images_only,
        set_mtime: cli.set_mtime,
    };

    let pb = if cli.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(0)
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40}] {pos}/{len} {msg}")
            .context("invalid progress template")?,
    );

    let report = run_with_bar(&options, &pb)?;
    pb.finish_and_clear();

    for diagnostic in &report.diagnostics {
        println!("{}", diagnostic);
    }

    if let Some(path) = &cli.json {
        write_json_report(&report, path)?;
    }

    let summary = report.summary();
    eprintln!(
        "Done! {} entries, {} renamed, {} skipped, {} duplicates, {} failed ({:.2}s)",
        summary.entries,
        summary.renamed,
        summary.skipped,
        summary.duplicates,
        summary.failed,
        t_total.elapsed().as_secs_f64()
    );

    Ok(())
}
