//! Command-line construction for the external bundler and type-checker
//!
//! Pure functions: they never touch the file system and never spawn.

use std::path::Path;

use crate::domain::ports::CommandSpec;
use crate::domain::value_objects::{BuildMode, ModuleFormat};

/// Launcher for an external tool, e.g. `npx esbuild` or `npx tsc`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    pub program: String,
    pub args: Vec<String>,
}

impl Toolchain {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    fn command(&self, cwd: &Path) -> CommandSpec {
        CommandSpec::new(self.program.clone(), cwd).args(self.args.iter().cloned())
    }
}

/// Flags shared by every bundler invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputOptions<'a> {
    pub format: ModuleFormat,
    /// Target runtime level (`--target=`), omitted when `None`
    pub target: Option<&'a str>,
    /// Dependencies left out of the bundle (`--external:`); ignored without bundling
    pub externals: &'a [String],
    pub banner: &'a str,
}

/// Bundle one entry file into `outfile`, excluding `externals`
pub fn bundle_command(
    tool: &Toolchain,
    cwd: &Path,
    entry: &Path,
    outfile: &Path,
    options: &OutputOptions<'_>,
    mode: BuildMode,
) -> CommandSpec {
    let mut spec = tool
        .command(cwd)
        .arg(display_path(entry, cwd))
        .arg("--bundle")
        .arg(format!("--outfile={}", display_path(outfile, cwd)))
        .arg(format!("--format={}", options.format.as_str()));
    if let Some(target) = options.target {
        spec = spec.arg(format!("--target={}", target));
    }
    spec = spec.args(options.externals.iter().map(|e| format!("--external:{}", e)));
    finish(spec, options.banner, mode)
}

/// Compile one source file to `outfile` without bundling
pub fn transpile_command(
    tool: &Toolchain,
    cwd: &Path,
    source: &Path,
    outfile: &Path,
    options: &OutputOptions<'_>,
    mode: BuildMode,
) -> CommandSpec {
    let mut spec = tool
        .command(cwd)
        .arg(display_path(source, cwd))
        .arg(format!("--outfile={}", display_path(outfile, cwd)))
        .arg(format!("--format={}", options.format.as_str()));
    if let Some(target) = options.target {
        spec = spec.arg(format!("--target={}", target));
    }
    finish(spec, options.banner, mode)
}

/// Whole-project diagnostics without emitting output
pub fn typecheck_command(tool: &Toolchain, cwd: &Path, config: &Path, mode: BuildMode) -> CommandSpec {
    let spec = tool
        .command(cwd)
        .arg("--noEmit")
        .arg("-p")
        .arg(display_path(config, cwd));
    if mode.is_watch() {
        spec.arg("--watch")
    } else {
        spec
    }
}

fn finish(spec: CommandSpec, banner: &str, mode: BuildMode) -> CommandSpec {
    let spec = if banner.is_empty() {
        spec
    } else {
        spec.arg(format!("--banner:js={}", banner))
    };
    if mode.is_watch() {
        spec.arg("--watch")
    } else {
        spec
    }
}

/// Paths under `cwd` are passed relative to it, others as given
fn display_path(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned()
}
