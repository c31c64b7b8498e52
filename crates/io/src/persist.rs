//! Atomic file persistence.

use std::fs;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::PersistError;

fn parent_dir_or_dot(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Writes `bytes` to `path` so that readers see either the old file or the
/// complete new one.
///
/// Bytes go to a temporary file in the target directory, which is synced to
/// disk and then renamed over `path`. Parent directories are created. The
/// temporary file is removed on every failure.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), PersistError> {
    let dir = parent_dir_or_dot(path);
    fs::create_dir_all(dir).map_err(|e| PersistError::io(dir, e))?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| PersistError::io(dir, e))?;
    tmp.write_all(bytes)
        .and_then(|()| tmp.flush())
        .map_err(|e| PersistError::io(tmp.path(), e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| PersistError::io(tmp.path(), e))?;

    tmp.persist(path)
        .map_err(|e| PersistError::io(path, e.error))?;

    debug!(path = %path.display(), bytes = bytes.len(), "Wrote file");
    Ok(())
}
