//! Entry rendering - the aggregate import file fed to the bundler

use std::path::{Component, Path, PathBuf};

/// Reserved file name of the synthesized entry inside a unit's source dir
pub const SCRATCH_ENTRY_NAME: &str = "__bundle_entry__.ts";

/// Suffix of compilable sources
pub const SOURCE_SUFFIX: &str = ".ts";

/// Suffix of declaration-only files, excluded from compilation
pub const DECLARATION_SUFFIX: &str = ".d.ts";

/// Whether a file name is a compilable source
pub fn is_source_file(name: &str) -> bool {
    name.ends_with(SOURCE_SUFFIX) && !name.ends_with(DECLARATION_SUFFIX) && name != SCRATCH_ENTRY_NAME
}

/// Module specifier for a source path relative to the entry: `b/c.ts` -> `./b/c`
pub fn import_specifier(relative: &Path) -> String {
    let joined = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/");
    let stem = joined.strip_suffix(SOURCE_SUFFIX).unwrap_or(&joined);
    format!("./{}", stem)
}

/// Render one side-effect import per file, in the given order
pub fn render_entry(files: &[PathBuf]) -> String {
    let mut out = String::new();
    for file in files {
        out.push_str(&format!("import \"{}\";\n", import_specifier(file)));
    }
    out
}
