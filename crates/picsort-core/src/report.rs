use std::fmt;

use serde::Serialize;

use crate::error::{RenameError, ScanError};

/// One line of the run's diagnostic log.
#[derive(Debug)]
pub enum Diagnostic {
    /// File left out of the mapping (unreadable or no timestamp).
    Skipped(ScanError),
    /// `file` has the same timestamp as `previous` and got the `_dupl` slot.
    Duplicate {
        file: String,
        previous: String,
        key: String,
    },
    Renamed {
        from: String,
        to: String,
    },
    RenameFailed(RenameError),
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Skipped(e) => write!(f, "{}", e),
            Diagnostic::Duplicate { file, previous, .. } => {
                write!(f, "{}: Duplicate datestamp with {}", file, previous)
            }
            Diagnostic::Renamed { from, to } => write!(f, "{} -> {}", from, to),
            Diagnostic::RenameFailed(e) => write!(f, "{}", e),
        }
    }
}

/// Flat, serializable form of a [`Diagnostic`].
#[derive(Debug, Clone, Serialize)]
pub struct DiagnosticRecord {
    pub kind: &'static str,
    pub file: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn to_record(&self) -> DiagnosticRecord {
        let (kind, file, target) = match self {
            Diagnostic::Skipped(e) => (e.kind(), e.file().to_string(), None),
            Diagnostic::Duplicate { file, previous, .. } => {
                ("duplicate", file.clone(), Some(previous.clone()))
            }
            Diagnostic::Renamed { from, to } => ("renamed", from.clone(), Some(to.clone())),
            Diagnostic::RenameFailed(e) => ("rename_failed", e.file.clone(), Some(e.target.clone())),
        };
        DiagnosticRecord {
            kind,
            file,
            target,
            message: self.to_string(),
        }
    }
}

/// Everything that happened during one run, in order.
#[derive(Debug, Default)]
pub struct Report {
    pub diagnostics: Vec<Diagnostic>,
    /// Directory entries looked at by the scan
    pub entries: u64,
}

/// Counters shown at the end of a run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub entries: u64,
    pub renamed: u64,
    pub skipped: u64,
    pub duplicates: u64,
    pub failed: u64,
}

impl Report {
    pub fn summary(&self) -> Summary {
        let mut summary = Summary {
            entries: self.entries,
            ..Summary::default()
        };
        for d in &self.diagnostics {
            match d {
                Diagnostic::Skipped(_) => summary.skipped += 1,
                Diagnostic::Duplicate { .. } => summary.duplicates += 1,
                Diagnostic::Renamed { .. } => summary.renamed += 1,
                Diagnostic::RenameFailed(_) => summary.failed += 1,
            }
        }
        summary
    }

    /// `(from, to)` for every successful rename.
    pub fn renamed(&self) -> impl Iterator<Item = (&str, &str)> {
        self.diagnostics.iter().filter_map(|d| match d {
            Diagnostic::Renamed { from, to } => Some((from.as_str(), to.as_str())),
            _ => None,
        })
    }

    pub fn records(&self) -> Vec<DiagnosticRecord> {
        self.diagnostics.iter().map(Diagnostic::to_record).collect()
    }

    /// Write the report as pretty JSON.
    pub fn write_json<W: std::io::Write>(&self, writer: W) -> serde_json::Result<()> {
        let json = ReportJson {
            summary: self.summary(),
            diagnostics: self.records(),
        };
        serde_json::to_writer_pretty(writer, &json)
    }
}

#[derive(Serialize)]
struct ReportJson {
    summary: Summary,
    diagnostics: Vec<DiagnosticRecord>,
}
