//! Entry synthesis
//!
//! A bundled unit is compiled from one synthesized file that imports every
//! source in the unit. That file lives beside the sources under a reserved
//! name and is owned by a [`ScratchEntry`] guard: dropping the guard removes
//! the file, so every exit path (success, failure, `?`, unwinding) cleans up.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::domain::services::{render_entry, SCRATCH_ENTRY_NAME};
use crate::domain::value_objects::Unit;
use crate::error::BuildResult;

/// Path of the scratch entry for a source directory
pub fn scratch_path(source_dir: &Path) -> PathBuf {
    source_dir.join(SCRATCH_ENTRY_NAME)
}

/// Remove a scratch entry if present; never fails.
///
/// Returns whether a file was removed.
pub fn remove_scratch(path: &Path) -> bool {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!("removed scratch entry {}", path.display());
            true
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => {
            tracing::warn!("could not remove {}: {}", path.display(), e);
            false
        }
    }
}

/// Remove whatever scratch entry is left in any unit's source directory.
///
/// Returns how many files were removed.
pub fn sweep_scratch(units: &[Unit]) -> usize {
    units
        .iter()
        .filter(|unit| remove_scratch(&scratch_path(unit.source_dir())))
        .count()
}

/// Owner of one scratch entry file
#[derive(Debug)]
pub struct ScratchEntry {
    path: PathBuf,
}

impl ScratchEntry {
    /// Write the entry for `files` into `source_dir`, replacing any stale copy.
    ///
    /// The content goes through a temp file in the same directory and is
    /// renamed into place, so the compiler never reads a partial entry.
    pub fn write(source_dir: &Path, files: &[PathBuf]) -> BuildResult<Self> {
        let path = scratch_path(source_dir);
        let mut tmp = NamedTempFile::new_in(source_dir)?;
        tmp.write_all(render_entry(files).as_bytes())?;
        tmp.persist(&path).map_err(|e| e.error)?;
        tracing::debug!("wrote scratch entry {} ({} import(s))", path.display(), files.len());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the file now rather than at drop
    pub fn release(self) {
        drop(self);
    }
}

impl Drop for ScratchEntry {
    fn drop(&mut self) {
        remove_scratch(&self.path);
    }
}
