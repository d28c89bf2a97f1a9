//! Unit discovery
//!
//! Two strategies walk the application root for conventional folder shapes:
//!
//! - module-scoped: `doctype/<name>/ts` and `*/doctype/<name>/ts`
//! - public-asset: `public/ts` and `*/public/ts`
//!
//! Neither strategy reads or mutates earlier results. The only side effect is
//! creating a public-asset unit's `public/js` output directory.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::{AssetUnit, ModuleUnit, Unit};
use crate::error::{BuildError, BuildResult};
use crate::infrastructure::fs::scan_sources;

const MODULE_FOLDER: &str = "doctype";
const SOURCE_FOLDER: &str = "ts";
const PUBLIC_FOLDER: &str = "public";

/// Discover both unit shapes under `root`: module units first, then assets.
pub fn discover(root: &Path) -> BuildResult<Vec<Unit>> {
    let mut units: Vec<Unit> = discover_module_units(root)?
        .into_iter()
        .map(Unit::Module)
        .collect();
    units.extend(discover_asset_units(root)?.into_iter().map(Unit::Asset));
    Ok(units)
}

/// Find every `doctype/<name>/ts` folder (directly under `root` or one level down)
/// holding at least one source file.
pub fn discover_module_units(root: &Path) -> BuildResult<Vec<ModuleUnit>> {
    ensure_root(root)?;

    let mut units = Vec::new();
    for container in candidate_dirs(root) {
        let doctype_dir = container.join(MODULE_FOLDER);
        if !doctype_dir.is_dir() {
            continue;
        }

        for folder in sorted_subdirs(&doctype_dir) {
            let source_dir = folder.join(SOURCE_FOLDER);
            if !source_dir.is_dir() {
                continue;
            }
            let Some(name) = folder.file_name().map(|n| n.to_string_lossy().into_owned()) else {
                continue;
            };

            let files: Vec<PathBuf> = scan_sources(&source_dir).collect();
            match ModuleUnit::new(name, source_dir, files) {
                Some(unit) => units.push(unit),
                None => tracing::debug!("no sources in {}", folder.display()),
            }
        }
    }

    Ok(units)
}

/// Find every `public/ts` folder (directly under `root` or one level down)
/// holding at least one source file, creating its `public/js` sibling.
pub fn discover_asset_units(root: &Path) -> BuildResult<Vec<AssetUnit>> {
    ensure_root(root)?;

    let mut units = Vec::new();
    for container in candidate_dirs(root) {
        let source_dir = container.join(PUBLIC_FOLDER).join(SOURCE_FOLDER);
        if !source_dir.is_dir() {
            continue;
        }

        let files: Vec<PathBuf> = scan_sources(&source_dir).collect();
        let Some(unit) = AssetUnit::new(container, files) else {
            tracing::debug!("no sources in {}", source_dir.display());
            continue;
        };

        if let Err(e) = fs::create_dir_all(unit.output_dir()) {
            tracing::warn!(
                "skipping {}: cannot create {}: {}",
                unit.source_dir().display(),
                unit.output_dir().display(),
                e
            );
            continue;
        }
        units.push(unit);
    }

    Ok(units)
}

fn ensure_root(root: &Path) -> BuildResult<()> {
    if root.is_dir() {
        Ok(())
    } else {
        Err(BuildError::RootNotFound {
            path: root.to_path_buf(),
        })
    }
}

/// `root` itself followed by its immediate subdirectories in name order
fn candidate_dirs(root: &Path) -> Vec<PathBuf> {
    let mut dirs = vec![root.to_path_buf()];
    dirs.extend(sorted_subdirs(root));
    dirs
}

/// Immediate subdirectories in name order; files and unreadable entries are dropped
fn sorted_subdirs(dir: &Path) -> Vec<PathBuf> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("cannot read {}: {}", dir.display(), e);
            return Vec::new();
        }
    };

    let mut dirs: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                tracing::warn!("skipping entry in {}: {}", dir.display(), e);
                None
            }
        })
        .filter(|path| path.is_dir())
        .collect();
    dirs.sort();
    dirs
}
