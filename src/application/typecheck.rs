//! Type-check supervisor
//!
//! Runs the project-wide type-checker independently of the build pipeline.
//! A missing project config means "skip", never a session failure.

use std::path::{Path, PathBuf};

use crate::config::TypecheckConfig;
use crate::domain::ports::{ProcessRunner, ProcessStatus};
use crate::domain::services::typecheck_command;
use crate::domain::value_objects::BuildMode;
use crate::error::{BuildError, BuildResult};

use super::session::WatchJob;

/// Label used for the type-checker's watch job and events
pub const TYPECHECK_LABEL: &str = "typecheck";

pub struct TypeCheckSupervisor<'a, R: ProcessRunner + ?Sized> {
    runner: &'a R,
    config: &'a TypecheckConfig,
    root: PathBuf,
}

impl<'a, R: ProcessRunner + ?Sized> TypeCheckSupervisor<'a, R> {
    pub fn new(runner: &'a R, config: &'a TypecheckConfig, root: &Path) -> Self {
        Self {
            runner,
            config,
            root: root.to_path_buf(),
        }
    }

    pub fn config_path(&self) -> PathBuf {
        self.root.join(&self.config.config)
    }

    /// The config path if present, `None` (with a warning) otherwise
    fn locate(&self) -> Option<PathBuf> {
        let path = self.config_path();
        if path.is_file() {
            Some(path)
        } else {
            tracing::warn!("{} not found, skipping type-checking", self.config.config);
            None
        }
    }

    /// Like `locate`, but a missing config is an error
    pub fn require_config(&self) -> BuildResult<PathBuf> {
        let path = self.config_path();
        if path.is_file() {
            Ok(path)
        } else {
            Err(BuildError::TypeCheckConfigMissing { path })
        }
    }

    /// Run once. `Ok(None)` when skipped; a non-zero exit is `TypeCheckFailed`.
    pub fn check(&self) -> BuildResult<Option<ProcessStatus>> {
        let Some(config) = self.locate() else {
            return Ok(None);
        };
        let spec = typecheck_command(&self.config.toolchain(), &self.root, &config, BuildMode::OneShot);
        let status = self.runner.run(&spec)?;
        if status.success() {
            Ok(Some(status))
        } else {
            Err(BuildError::TypeCheckFailed { code: status.code })
        }
    }

    /// Start in continuous mode. `Ok(None)` when skipped.
    pub fn start(&self) -> BuildResult<Option<WatchJob>> {
        let Some(config) = self.locate() else {
            return Ok(None);
        };
        let spec = typecheck_command(&self.config.toolchain(), &self.root, &config, BuildMode::Watch);
        let handle = self.runner.spawn(&spec)?;
        Ok(Some(WatchJob::new(TYPECHECK_LABEL, handle, None)))
    }
}
