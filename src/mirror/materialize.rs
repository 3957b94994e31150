//! Conditional download of one remote file to one local path.

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::catalog::{Fetch, FetchError};

#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Cannot create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Cannot write file {path}: {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Create `dir` and any missing parents. An existing directory is not an error.
pub fn ensure_dir(dir: &Path) -> Result<(), MaterializeError> {
    std::fs::create_dir_all(dir).map_err(|e| MaterializeError::CreateDir {
        path: dir.to_path_buf(),
        source: e,
    })
}

/// Write `body` to a hidden temp file next to `path`, then rename it into place, so
/// `path` only ever appears with its full content.
fn write_whole(path: &Path, body: &[u8]) -> Result<(), MaterializeError> {
    let write_err = |source: std::io::Error| MaterializeError::WriteFile {
        path: path.to_path_buf(),
        source,
    };
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = tempfile::Builder::new()
        .prefix(".partial-")
        .tempfile_in(dir)
        .map_err(write_err)?;
    tmp.write_all(body).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Make sure `local_path` holds the content of `file_url`.
///
/// Returns `Ok(false)` without any request when a regular file is already at
/// `local_path`, and `Ok(true)` after fetching and writing a new file. A failed write
/// leaves nothing at `local_path`. The existence check and the rename are not atomic
/// together: callers running more than one materialize at a time must hold a per-path
/// lock.
pub fn materialize(
    client: &mut dyn Fetch,
    file_url: &str,
    local_path: &Path,
) -> Result<bool, MaterializeError> {
    if local_path.is_file() {
        debug!(path = %local_path.display(), "already present, skipping");
        return Ok(false);
    }
    let body = client.get_bytes(file_url)?;
    if let Some(parent) = local_path.parent() {
        ensure_dir(parent)?;
    }
    write_whole(local_path, &body)?;
    debug!(url = %file_url, path = %local_path.display(), bytes = body.len(), "downloaded");
    Ok(true)
}
