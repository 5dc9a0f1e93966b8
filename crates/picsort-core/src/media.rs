use std::path::PathBuf;

/// A file in the target directory that carries a capture timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Full path, as found by the scan
    pub path: PathBuf,
    /// Just the filename (lossy UTF-8, for messages)
    pub filename: String,
}

impl SourceFile {
    pub fn new(path: PathBuf) -> Self {
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self { path, filename }
    }

    /// Extension including the leading dot, or empty if the name has none.
    ///
    /// `.hidden` has no extension; `name.` yields `"."`.
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default()
    }
}
