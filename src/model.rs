//! Values passed through one mirror run. Nothing here is persisted; the written files are
//! the only state.

use std::fmt;
use std::path::PathBuf;

/// Top-level link on the catalog page; one book's subpage. Kept verbatim as listed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryLink(String);

impl EntryLink {
    pub fn new(href: impl Into<String>) -> Self {
        Self(href.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntryLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Link on an entry page, relative to that page, that names a downloadable document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentLink(String);

impl DocumentLink {
    pub fn new(href: impl Into<String>) -> Self {
        Self(href.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Final `/`-separated segment, still percent-encoded.
    pub fn file_segment(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or(&self.0)
    }
}

impl fmt::Display for DocumentLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One document that could not be materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub file_url: String,
    pub file_path: PathBuf,
    pub message: String,
}

impl fmt::Display for ErrorRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {}: {}",
            self.file_url,
            self.file_path.display(),
            self.message
        )
    }
}

/// Outcome of a run: newly written files and per-file failures in the order they occurred.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadResult {
    pub downloaded: usize,
    pub errors: Vec<ErrorRecord>,
}
