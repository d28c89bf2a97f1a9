//! Build unit value objects - the compilable surfaces found by discovery

use std::path::{Path, PathBuf};

use serde::Serialize;

/// Extension of compiled outputs
pub const OUTPUT_EXT: &str = "js";

/// A module-scoped unit: `<doctype>/<name>/ts/**.ts` bundled into one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleUnit {
    name: String,
    source_dir: PathBuf,
    source_files: Vec<PathBuf>,
    output_file: PathBuf,
}

impl ModuleUnit {
    /// Create a unit from its `ts/` folder.
    ///
    /// Returns `None` when `source_files` is empty; such units are never built.
    /// The output is `<parent of source_dir>/<name>.js`.
    pub fn new(name: impl Into<String>, source_dir: PathBuf, source_files: Vec<PathBuf>) -> Option<Self> {
        if source_files.is_empty() {
            return None;
        }
        let name = name.into();
        let parent = source_dir
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| source_dir.clone());
        let output_file = parent.join(format!("{}.{}", name, OUTPUT_EXT));
        Some(Self {
            name,
            source_dir,
            source_files,
            output_file,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    /// Source files relative to `source_dir`, in discovery order
    pub fn source_files(&self) -> &[PathBuf] {
        &self.source_files
    }

    pub fn output_file(&self) -> &Path {
        &self.output_file
    }
}

/// A public-asset unit: `public/ts/**.ts` compiled into the sibling `public/js`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssetUnit {
    source_dir: PathBuf,
    output_dir: PathBuf,
    source_files: Vec<PathBuf>,
    root: PathBuf,
}

impl AssetUnit {
    /// Create a unit from `<root>/public/ts`. Returns `None` for an empty file list.
    pub fn new(root: PathBuf, source_files: Vec<PathBuf>) -> Option<Self> {
        if source_files.is_empty() {
            return None;
        }
        let public = root.join("public");
        Some(Self {
            source_dir: public.join("ts"),
            output_dir: public.join("js"),
            source_files,
            root,
        })
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn source_files(&self) -> &[PathBuf] {
        &self.source_files
    }

    /// Directory that holds `public/`
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Display label: the name of the folder holding `public/`
    pub fn label(&self) -> String {
        self.root
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "public".to_string())
    }

    /// Mirrored output path for one source file: `a/b.ts` -> `<output_dir>/a/b.js`
    pub fn output_for(&self, source: &Path) -> PathBuf {
        self.output_dir.join(source).with_extension(OUTPUT_EXT)
    }

    /// Output of the bundling variant: `<output_dir>/<name>.js`
    pub fn bundle_output(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}", name, OUTPUT_EXT))
    }
}

/// Either shape of discovered unit
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Unit {
    Module(ModuleUnit),
    Asset(AssetUnit),
}

impl Unit {
    pub fn label(&self) -> String {
        match self {
            Unit::Module(unit) => unit.name().to_string(),
            Unit::Asset(unit) => unit.label(),
        }
    }

    pub fn source_dir(&self) -> &Path {
        match self {
            Unit::Module(unit) => unit.source_dir(),
            Unit::Asset(unit) => unit.source_dir(),
        }
    }

    pub fn source_files(&self) -> &[PathBuf] {
        match self {
            Unit::Module(unit) => unit.source_files(),
            Unit::Asset(unit) => unit.source_files(),
        }
    }

    pub fn as_module(&self) -> Option<&ModuleUnit> {
        match self {
            Unit::Module(unit) => Some(unit),
            Unit::Asset(_) => None,
        }
    }
}
