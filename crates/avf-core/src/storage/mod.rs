//! Disk side of fetch-and-save.
//!
//! Creates the destination directory once, writes each payload to a `.part`
//! temp file and renames it into place so a failed task never leaves a
//! truncated image under its final name.

mod writer;

pub use writer::save_bytes;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";

/// Path for the temp file: appends `.part` to the final path (e.g. `avatar_1.jpg` → `avatar_1.jpg.part`).
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut o = final_path.as_os_str().to_owned();
    o.push(TEMP_SUFFIX);
    PathBuf::from(o)
}

/// Creates `dir` (recursively) only if it does not exist yet.
/// Returns `true` when this call created it.
pub fn ensure_dir(dir: &Path) -> io::Result<bool> {
    if dir.is_dir() {
        return Ok(false);
    }
    fs::create_dir_all(dir)?;
    Ok(true)
}
