//! Writing the generated calendar to disk.

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use tempfile::NamedTempFile;

use crate::args::containing_dir;

/// Write `contents` to `path` through a temporary file in the same directory,
/// replacing any existing file only once everything has been written.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = containing_dir(path);

    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Could not create temporary file in {}", dir.display()))?;

    tmp.write_all(contents)
        .with_context(|| format!("Could not write {}", tmp.path().display()))?;
    tmp.as_file().sync_all()?;

    tmp.persist(path)
        .with_context(|| format!("Could not write output file {}", path.display()))?;

    Ok(())
}
