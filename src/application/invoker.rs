//! Compiler invoker
//!
//! Turns units into external compiler invocations. One-shot calls block
//! until the tool exits; watch calls return a [`WatchJob`] immediately.
//!
//! Scratch entries follow one rule: a one-shot bundle removes its entry
//! before returning (success or failure), a watch bundle hands the entry to
//! its job so it lives exactly as long as the process.

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::domain::ports::{CommandSpec, ProcessRunner, ProcessStatus};
use crate::domain::services::{bundle_command, transpile_command, OutputOptions};
use crate::domain::value_objects::{AssetMode, AssetUnit, BuildMode, ModuleUnit};
use crate::error::{BuildError, BuildResult};

use super::entry::ScratchEntry;
use super::session::WatchJob;

/// Builds units with the configured bundler
pub struct CompilerInvoker<'a, R: ProcessRunner + ?Sized> {
    runner: &'a R,
    config: &'a Config,
    root: PathBuf,
}

impl<'a, R: ProcessRunner + ?Sized> CompilerInvoker<'a, R> {
    /// `root` becomes the working directory of every invocation
    pub fn new(runner: &'a R, config: &'a Config, root: &Path) -> Self {
        Self {
            runner,
            config,
            root: root.to_path_buf(),
        }
    }

    pub fn config(&self) -> &Config {
        self.config
    }

    fn module_options(&self) -> OutputOptions<'_> {
        OutputOptions {
            format: self.config.bundle.format,
            target: None,
            externals: &self.config.bundle.externals,
            banner: &self.config.bundle.banner,
        }
    }

    fn asset_file_options(&self) -> OutputOptions<'_> {
        OutputOptions {
            format: self.config.assets.format,
            target: Some(&self.config.assets.target),
            externals: &[],
            banner: &self.config.bundle.banner,
        }
    }

    fn asset_bundle_options(&self) -> OutputOptions<'_> {
        OutputOptions {
            externals: &self.config.bundle.externals,
            ..self.asset_file_options()
        }
    }

    fn run_one_shot(&self, spec: &CommandSpec, label: &str) -> BuildResult<()> {
        let status = self.runner.run(spec)?;
        check_status(status, label)
    }

    /// Bundle a module unit once; its scratch entry is gone when this returns.
    pub fn build_module(&self, unit: &ModuleUnit) -> BuildResult<PathBuf> {
        let entry = ScratchEntry::write(unit.source_dir(), unit.source_files())?;
        let spec = bundle_command(
            &self.config.compiler.toolchain(),
            &self.root,
            entry.path(),
            unit.output_file(),
            &self.module_options(),
            BuildMode::OneShot,
        );
        let result = self.run_one_shot(&spec, unit.name());
        entry.release();
        result.map(|()| unit.output_file().to_path_buf())
    }

    /// Start the bundler in watch mode for a module unit
    pub fn watch_module(&self, unit: &ModuleUnit) -> BuildResult<WatchJob> {
        let entry = ScratchEntry::write(unit.source_dir(), unit.source_files())?;
        let spec = bundle_command(
            &self.config.compiler.toolchain(),
            &self.root,
            entry.path(),
            unit.output_file(),
            &self.module_options(),
            BuildMode::Watch,
        );
        let handle = self.runner.spawn(&spec)?;
        Ok(WatchJob::new(unit.name(), handle, Some(entry)))
    }

    fn asset_file_spec(&self, unit: &AssetUnit, file: &Path, mode: BuildMode) -> BuildResult<CommandSpec> {
        let output = unit.output_for(file);
        if let Some(parent) = output.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(transpile_command(
            &self.config.compiler.toolchain(),
            &self.root,
            &unit.source_dir().join(file),
            &output,
            &self.asset_file_options(),
            mode,
        ))
    }

    /// Compile one asset file to its mirrored path under `public/js`
    pub fn build_asset_file(&self, unit: &AssetUnit, file: &Path) -> BuildResult<PathBuf> {
        let spec = self.asset_file_spec(unit, file, BuildMode::OneShot)?;
        self.run_one_shot(&spec, &asset_file_label(unit, file))?;
        Ok(unit.output_for(file))
    }

    pub fn watch_asset_file(&self, unit: &AssetUnit, file: &Path) -> BuildResult<WatchJob> {
        let spec = self.asset_file_spec(unit, file, BuildMode::Watch)?;
        let handle = self.runner.spawn(&spec)?;
        Ok(WatchJob::new(asset_file_label(unit, file), handle, None))
    }

    /// Output name for the bundling variant
    pub fn asset_bundle_name(&self, unit: &AssetUnit) -> String {
        self.config
            .assets
            .bundle_name
            .clone()
            .unwrap_or_else(|| unit.label())
    }

    fn asset_bundle_spec(&self, unit: &AssetUnit, entry: &ScratchEntry, mode: BuildMode) -> CommandSpec {
        bundle_command(
            &self.config.compiler.toolchain(),
            &self.root,
            entry.path(),
            &unit.bundle_output(&self.asset_bundle_name(unit)),
            &self.asset_bundle_options(),
            mode,
        )
    }

    /// Bundle all asset files into one named output
    pub fn build_asset_bundle(&self, unit: &AssetUnit) -> BuildResult<PathBuf> {
        let entry = ScratchEntry::write(unit.source_dir(), unit.source_files())?;
        let spec = self.asset_bundle_spec(unit, &entry, BuildMode::OneShot);
        let result = self.run_one_shot(&spec, &unit.label());
        entry.release();
        result.map(|()| unit.bundle_output(&self.asset_bundle_name(unit)))
    }

    pub fn watch_asset_bundle(&self, unit: &AssetUnit) -> BuildResult<WatchJob> {
        let entry = ScratchEntry::write(unit.source_dir(), unit.source_files())?;
        let spec = self.asset_bundle_spec(unit, &entry, BuildMode::Watch);
        let handle = self.runner.spawn(&spec)?;
        Ok(WatchJob::new(unit.label(), handle, Some(entry)))
    }

    /// Watch an asset unit in the configured mode: one job per file, or one bundle job.
    ///
    /// Each job goes to `track` the moment it starts, so jobs started before
    /// a later file fails are still owned by the caller.
    pub fn watch_assets<F>(&self, unit: &AssetUnit, mut track: F) -> BuildResult<()>
    where
        F: FnMut(WatchJob),
    {
        match self.config.assets.mode {
            AssetMode::PerFile => {
                for file in unit.source_files() {
                    track(self.watch_asset_file(unit, file)?);
                }
            }
            AssetMode::Bundle => track(self.watch_asset_bundle(unit)?),
        }
        Ok(())
    }
}

/// `<app>/<relative file>`, e.g. `myapp/b/c.ts`
pub fn asset_file_label(unit: &AssetUnit, file: &Path) -> String {
    format!("{}/{}", unit.label(), file.to_string_lossy().replace('\\', "/"))
}

fn check_status(status: ProcessStatus, label: &str) -> BuildResult<()> {
    if status.success() {
        Ok(())
    } else {
        Err(BuildError::CompilerFailed {
            unit: label.to_string(),
            code: status.code,
        })
    }
}
