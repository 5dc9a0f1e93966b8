use std::fs;
use std::io;
use std::path::Path;

use crate::date::TimestampKey;
use crate::error::RenameError;
use crate::media::SourceFile;
use crate::report::Diagnostic;
use crate::scan::RenameMapping;
use crate::{RenameOptions, ThrottledProgress};

/// `<prefix><sanitized key><ext>`, e.g. `pic_2018_05_03_14_22_10_dupl.jpg`.
pub fn target_name(key: &TimestampKey, source: &SourceFile, prefix: &str) -> String {
    format!("{}{}{}", prefix, key.sanitized(), source.extension())
}

fn rename_one(source: &SourceFile, dest: &Path) -> io::Result<()> {
    // rename(2) replaces an existing target without asking
    if dest != source.path.as_path() && fs::symlink_metadata(dest).is_ok() {
        return Err(io::Error::new(io::ErrorKind::AlreadyExists, "target already exists"));
    }
    fs::rename(&source.path, dest)
}

fn set_mtime(dest: &Path, key: &TimestampKey) {
    // EXIF datetimes are local time; convert back to a UTC epoch for mtime
    let Some(local) = key
        .datetime()
        .and_then(|dt| dt.and_local_timezone(chrono::Local).single())
    else {
        return;
    };
    let ft = filetime::FileTime::from_unix_time(local.timestamp(), 0);
    filetime::set_file_mtime(dest, ft).ok();
}

/// Rename every mapped file in ascending key order.
///
/// A failed rename is recorded and the next key is tried; nothing already
/// renamed is rolled back.
pub fn rename_all(
    dir: &Path,
    mapping: &RenameMapping,
    options: &RenameOptions,
    progress: &ThrottledProgress<'_>,
) -> Vec<Diagnostic> {
    let total = mapping.len() as u64;
    let mut diagnostics = Vec::with_capacity(mapping.len());

    for (i, (key, source)) in mapping.iter().enumerate() {
        progress.report("rename", i as u64, total, "Renaming files");

        let new_name = target_name(key, source, &options.prefix);
        let dest = dir.join(&new_name);

        match rename_one(source, &dest) {
            Ok(()) => {
                if options.set_mtime {
                    set_mtime(&dest, key);
                }
                tracing::info!("{} -> {}", source.filename, new_name);
                diagnostics.push(Diagnostic::Renamed {
                    from: source.filename.clone(),
                    to: new_name,
                });
            }
            Err(e) => {
                let err = RenameError {
                    file: source.filename.clone(),
                    target: new_name,
                    source: e,
                };
                tracing::warn!("{}", err);
                diagnostics.push(Diagnostic::RenameFailed(err));
            }
        }
    }

    diagnostics
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_target_name() {
        let source = SourceFile::new(PathBuf::from("/photos/DSC_0042.JPG"));
        let key = TimestampKey::new("2018:05:03 14:22:10");
        assert_eq!(target_name(&key, &source, "pic_"), "pic_2018_05_03_14_22_10.JPG");
        assert_eq!(
            target_name(&key.with_duplicate_suffix(), &source, "pic_"),
            "pic_2018_05_03_14_22_10_dupl.JPG"
        );

        let bare = SourceFile::new(PathBuf::from("/photos/scan"));
        assert_eq!(target_name(&key, &bare, "img-"), "img-2018_05_03_14_22_10");
    }
}
