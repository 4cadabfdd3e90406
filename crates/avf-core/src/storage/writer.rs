//! Whole-payload writer with temp-file + rename.

use crate::http::FetchError;
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use super::temp_path;

/// Writes `data` unmodified to `final_path`.
///
/// Missing parent directories are created. The bytes go to `final_path.part`
/// first, are synced, then renamed over `final_path` (an existing file is
/// replaced). On any failure the temp file is removed.
pub fn save_bytes(final_path: &Path, data: &[u8]) -> Result<(), FetchError> {
    if let Some(parent) = final_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| FetchError::storage(parent, e))?;
    }

    let tp = temp_path(final_path);
    let res = write_temp(&tp, data).and_then(|()| {
        fs::rename(&tp, final_path).map_err(|e| FetchError::storage(final_path, e))
    });
    if res.is_err() {
        if let Err(e) = fs::remove_file(&tp) {
            tracing::debug!(path = %tp.display(), error = %e, "temp file cleanup skipped");
        }
    }
    res
}

fn write_temp(tp: &Path, data: &[u8]) -> Result<(), FetchError> {
    let mut f = File::options()
        .write(true)
        .create(true)
        .truncate(true)
        .open(tp)
        .map_err(|e| FetchError::storage(tp, e))?;
    f.write_all(data).map_err(|e| FetchError::storage(tp, e))?;
    f.sync_all().map_err(|e| FetchError::storage(tp, e))?;
    Ok(())
}
