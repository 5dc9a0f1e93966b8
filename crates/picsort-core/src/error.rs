//! Error types for the renamer.
//!
//! Only [`Error`] is fatal. The per-file errors are collected into the
//! [`Report`](crate::report::Report) and the run carries on.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Fatal error: the run cannot start.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot read directory {}: {source}", .dir.display())]
    ReadDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Why a file was left out of the rename mapping.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("{file}: Cannot open for reading ({source})")]
    Unreadable {
        file: String,
        #[source]
        source: io::Error,
    },

    #[error("{file}: Cannot open for reading (not a regular file)")]
    NotAFile { file: String },

    #[error("{file}: No EXIF data found")]
    NoExif { file: String },

    #[error("{file}: No {tag} tag in EXIF data")]
    MissingTag { file: String, tag: &'static str },
}

impl ScanError {
    pub fn file(&self) -> &str {
        match self {
            ScanError::Unreadable { file, .. }
            | ScanError::NotAFile { file }
            | ScanError::NoExif { file }
            | ScanError::MissingTag { file, .. } => file,
        }
    }

    /// Short machine-readable category, used in the JSON report.
    pub fn kind(&self) -> &'static str {
        match self {
            ScanError::Unreadable { .. } | ScanError::NotAFile { .. } => "unreadable",
            ScanError::NoExif { .. } | ScanError::MissingTag { .. } => "missing_metadata",
        }
    }
}

/// A rename that did not happen.
#[derive(Error, Debug)]
#[error("{file}: Could not rename to {target} ({source})")]
pub struct RenameError {
    pub file: String,
    pub target: String,
    #[source]
    pub source: io::Error,
}
