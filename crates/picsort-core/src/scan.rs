use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::date::exif::{read_timestamp, Lookup};
use crate::date::TimestampKey;
use crate::error::{Error, ScanError};
use crate::media::SourceFile;
use crate::report::Diagnostic;
use crate::{RenameOptions, ThrottledProgress};

/// Timestamp key -> file, iterated in sorted-key order by the rename phase.
pub type RenameMapping = BTreeMap<TimestampKey, SourceFile>;

/// Result of scanning the target directory
pub struct ScanResult {
    pub mapping: RenameMapping,
    /// Skipped files and duplicate timestamps, in scan order
    pub diagnostics: Vec<Diagnostic>,
    /// Number of directory entries looked at
    pub entries: u64,
}

/// List directory entries sorted by file name, so that duplicate handling
/// does not depend on the platform's enumeration order.
fn sorted_entries(dir: &Path) -> crate::error::Result<Vec<PathBuf>> {
    let read_dir = fs::read_dir(dir).map_err(|source| Error::ReadDir {
        dir: dir.to_path_buf(),
        source,
    })?;

    let mut paths: Vec<PathBuf> = read_dir.flatten().map(|entry| entry.path()).collect();
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

fn is_image(path: &Path) -> bool {
    mime_guess::from_path(path)
        .first()
        .map_or(false, |mime| mime.type_() == mime_guess::mime::IMAGE)
}

/// Open one file and read its timestamp key. The handle is dropped on return.
fn read_source(path: &Path, options: &RenameOptions) -> Result<(SourceFile, TimestampKey), ScanError> {
    let source = SourceFile::new(path.to_path_buf());
    let unreadable = |e| ScanError::Unreadable {
        file: source.filename.clone(),
        source: e,
    };

    let file = File::open(path).map_err(unreadable)?;
    if !file.metadata().map_err(unreadable)?.is_file() {
        return Err(ScanError::NotAFile { file: source.filename });
    }

    let mut reader = BufReader::new(file);
    match read_timestamp(&mut reader, options.field).map_err(unreadable)? {
        Lookup::Found(key) => Ok((source, key)),
        Lookup::NoExif => Err(ScanError::NoExif { file: source.filename }),
        Lookup::MissingTag => Err(ScanError::MissingTag {
            file: source.filename,
            tag: options.field.name(),
        }),
    }
}

/// Build the timestamp -> file mapping for every file in `dir`.
///
/// Per-file failures never abort the scan; they end up in
/// [`ScanResult::diagnostics`]. A second file on a taken key goes to the
/// `_dupl` slot. A third one overwrites that slot, so the second file is
/// dropped from the mapping and keeps its name.
pub fn collect_timestamps(
    dir: &Path,
    options: &RenameOptions,
    progress: &ThrottledProgress<'_>,
) -> crate::error::Result<ScanResult> {
    let paths = sorted_entries(dir)?;
    let total = paths.len() as u64;

    let mut mapping = RenameMapping::new();
    let mut diagnostics = Vec::new();

    for (i, path) in paths.iter().enumerate() {
        progress.report("scan", i as u64, total, "Reading EXIF");

        if options.images_only && !is_image(path) {
            tracing::debug!("{}: not an image, skipped", path.display());
            continue;
        }

        let (source, mut key) = match read_source(path, options) {
            Ok(found) => found,
            Err(e) => {
                tracing::warn!("{}", e);
                diagnostics.push(Diagnostic::Skipped(e));
                continue;
            }
        };

        if let Some(previous) = mapping.get(&key) {
            let duplicate = Diagnostic::Duplicate {
                file: source.filename.clone(),
                previous: previous.filename.clone(),
                key: key.to_string(),
            };
            tracing::warn!("{}", duplicate);
            diagnostics.push(duplicate);
            key = key.with_duplicate_suffix();
        }

        tracing::debug!("{}: {}", source.filename, key);
        mapping.insert(key, source);
    }

    Ok(ScanResult {
        mapping,
        diagnostics,
        entries: total,
    })
}
