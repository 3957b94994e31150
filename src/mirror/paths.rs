//! Local path derivation. Pure functions of (destination root, entry, document).

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::model::{DocumentLink, EntryLink};

/// The final segment of a document link names no file (empty, `.` or `..` once decoded).
#[derive(Debug, Error)]
#[error("Document link {link:?} has no usable file name")]
pub struct InvalidFileName {
    pub link: String,
}

/// Percent-decode one path segment exactly once. Invalid UTF-8 in the decoded bytes is
/// replaced rather than rejected.
pub fn decode_segment(segment: &str) -> String {
    String::from_utf8_lossy(&urlencoding::decode_binary(segment.as_bytes())).into_owned()
}

/// Append a decoded name under `base`, treating `/` as a separator and dropping empty,
/// `.` and `..` components so the result never leaves `base`.
fn push_decoded(base: &Path, decoded: &str) -> PathBuf {
    let mut path = base.to_path_buf();
    for part in decoded.split('/') {
        if part.is_empty() || part == "." || part == ".." {
            continue;
        }
        path.push(part);
    }
    path
}

/// Directory for one entry: the entry link with surrounding `/` trimmed, decoded.
pub fn entry_dir(root: &Path, entry: &EntryLink) -> PathBuf {
    push_decoded(root, &decode_segment(entry.as_str().trim_matches('/')))
}

/// Local path for one document: entry directory joined with the decoded final segment.
///
/// Fails when the segment would collapse onto the entry directory itself, so that one
/// odd link cannot turn the directory into a file.
pub fn document_path(
    root: &Path,
    entry: &EntryLink,
    document: &DocumentLink,
) -> Result<PathBuf, InvalidFileName> {
    let dir = entry_dir(root, entry);
    let path = push_decoded(&dir, &decode_segment(document.file_segment()));
    if path == dir {
        return Err(InvalidFileName {
            link: document.to_string(),
        });
    }
    Ok(path)
}
