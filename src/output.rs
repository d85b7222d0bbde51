//! Atomic persistence of framed images.

use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// Writes `bytes` to `path`, all or nothing.
///
/// The data is staged in a temporary file in the destination's directory and
/// renamed into place once fully written, so a failed run never leaves a
/// partially written image behind. The temporary file must live next to the
/// destination for the rename to stay on one filesystem.
pub fn write_image(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
    let mut staged = match dir {
        Some(dir) => NamedTempFile::new_in(dir)?,
        None => NamedTempFile::new_in(".")?,
    };
    staged.write_all(bytes)?;
    staged.as_file().sync_all()?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}
