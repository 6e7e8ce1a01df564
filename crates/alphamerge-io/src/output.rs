//! Atomic file output.
//!
//! Bytes go to a uniquely named temporary file in the destination
//! directory, which is synced and then renamed over the target. Readers of
//! the target see either the previous file or the complete new one.

use crate::IoResult;
use std::io::Write;
use std::path::Path;
use tracing::trace;

/// Atomically writes `bytes` to `path`, replacing any existing file.
///
/// The destination directory must already exist. On failure the temporary
/// file is removed and `path` is left as it was.
pub fn write_atomic<P: AsRef<Path>>(path: P, bytes: &[u8]) -> IoResult<()> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::Builder::new()
        .prefix(".alphamerge-")
        .suffix(".tmp")
        .tempfile_in(dir)?;
    trace!(tmp = %tmp.path().display(), dest = %path.display(), "staging output");

    tmp.write_all(bytes)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}
