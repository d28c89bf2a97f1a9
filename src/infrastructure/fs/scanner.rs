//! Tree Scanner
//!
//! Lazily enumerates compilable sources under a directory. Each call to
//! [`scan_sources`] starts a fresh walk, so a scan can be restarted at will
//! and nothing is retained between calls.

use std::path::{Path, PathBuf};

use ignore::{Walk, WalkBuilder};

use crate::domain::services::is_source_file;

/// Iterator over source files, yielding paths relative to the scan root
pub struct SourceScan {
    root: PathBuf,
    walk: Walk,
}

/// Scan `root` recursively for `.ts` files (excluding `.d.ts` and scratch entries).
///
/// Siblings are visited in file-name order. Unreadable directories are
/// logged and skipped.
pub fn scan_sources(root: &Path) -> SourceScan {
    let walk = WalkBuilder::new(root)
        .standard_filters(false)
        .follow_links(false)
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    SourceScan {
        root: root.to_path_buf(),
        walk,
    }
}

impl Iterator for SourceScan {
    type Item = PathBuf;

    fn next(&mut self) -> Option<PathBuf> {
        loop {
            let entry = match self.walk.next()? {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::warn!("skipping unreadable entry under {}: {}", self.root.display(), err);
                    continue;
                }
            };

            if !entry.file_type().is_some_and(|t| t.is_file()) {
                continue;
            }

            let Some(name) = entry.file_name().to_str() else {
                tracing::trace!("skipping non UTF-8 name {:?}", entry.path());
                continue;
            };
            if !is_source_file(name) {
                tracing::trace!("not a source: {}", entry.path().display());
                continue;
            }

            match entry.path().strip_prefix(&self.root) {
                Ok(relative) => return Some(relative.to_path_buf()),
                Err(_) => continue,
            }
        }
    }
}
