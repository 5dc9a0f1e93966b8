pub mod date;
pub mod error;
pub mod media;
pub mod rename;
pub mod report;
pub mod scan;

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

pub use date::{TimestampField, TimestampKey};
pub use error::{Error, RenameError, Result, ScanError};
pub use media::SourceFile;
pub use rename::rename_all;
pub use report::{Diagnostic, DiagnosticRecord, Report, Summary};
pub use scan::{collect_timestamps, RenameMapping, ScanResult};

/// Prefix put in front of every new filename unless configured otherwise.
pub const DEFAULT_PREFIX: &str = "pic_";

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameOptions {
    /// Directory holding all and only the photos to rename
    pub directory: PathBuf,
    #[serde(default)]
    pub field: TimestampField,
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Skip entries whose extension is not an image type
    #[serde(default)]
    pub images_only: bool,
    /// Set each renamed file's mtime to its timestamp
    #[serde(default)]
    pub set_mtime: bool,
}

impl RenameOptions {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            field: TimestampField::default(),
            prefix: default_prefix(),
            images_only: false,
            set_mtime: false,
        }
    }
}

/// Type alias for progress callback. The callback may borrow from the caller.
pub type ProgressCallback<'a> = dyn Fn(&str, u64, u64, &str) + Send + Sync + 'a;

/// Throttled progress reporter: emits at most every 200ms or on completion.
pub struct ThrottledProgress<'a> {
    inner: &'a ProgressCallback<'a>,
    last_emit: Mutex<Instant>,
}

impl<'a> ThrottledProgress<'a> {
    pub fn new(inner: &'a ProgressCallback<'a>) -> Self {
        Self {
            inner,
            last_emit: Mutex::new(Instant::now() - Duration::from_secs(1)),
        }
    }

    pub fn report(&self, stage: &str, current: u64, total: u64, message: &str) {
        let is_done = current + 1 >= total;
        if !is_done {
            let mut last = self.last_emit.lock().unwrap_or_else(|e| e.into_inner());
            if last.elapsed() < Duration::from_millis(200) {
                return;
            }
            *last = Instant::now();
        }
        (self.inner)(stage, current, total, message);
    }
}

/// Scan the configured directory, then rename everything that has a
/// timestamp. Only an unreadable directory is an error; per-file problems
/// are in the returned [`Report`].
pub fn process(options: &RenameOptions, progress_callback: &ProgressCallback<'_>) -> Result<Report> {
    let tp = ThrottledProgress::new(progress_callback);
    let dir = &options.directory;

    // Stage 1: Scan
    let scan = collect_timestamps(dir, options, &tp)?;
    tracing::debug!(
        "Scanned {} entries, {} to rename",
        scan.entries,
        scan.mapping.len()
    );

    let mut report = Report {
        diagnostics: scan.diagnostics,
        entries: scan.entries,
    };

    // Stage 2: Rename
    report
        .diagnostics
        .extend(rename_all(dir, &scan.mapping, options, &tp));

    Ok(report)
}
