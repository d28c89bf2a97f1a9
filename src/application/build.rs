//! Build use case
//!
//! Drives the invoker over a batch of discovered units. One
//! [`FailurePolicy`] governs both batch shapes: the list of units and the
//! per-file sequence inside an asset unit.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::ports::ProcessRunner;
use crate::domain::value_objects::{AssetMode, AssetUnit, FailurePolicy, Unit};
use crate::error::{BuildError, BuildResult};

use super::events::BuildEvent;
use super::invoker::{asset_file_label, CompilerInvoker};
use super::session::{Session, WatchJob};

/// Result of a one-shot batch
#[derive(Debug, Clone, Default)]
pub struct BuildSummary {
    /// Outputs written, in build order
    pub outputs: Vec<PathBuf>,
}

/// Build Use Case
///
/// Entry point for `frappe-build build` and `frappe-build watch`.
pub struct BuildUseCase<'a, R: ProcessRunner + ?Sized> {
    invoker: CompilerInvoker<'a, R>,
    policy: FailurePolicy,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a, R: ProcessRunner + ?Sized> BuildUseCase<'a, R> {
    pub fn new(invoker: CompilerInvoker<'a, R>, policy: FailurePolicy) -> Self {
        Self {
            invoker,
            policy,
            cancel: None,
        }
    }

    /// Stop before the next invocation once `flag` is set
    pub fn with_cancel(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    fn check_cancelled(&self) -> BuildResult<()> {
        match &self.cancel {
            Some(flag) if flag.load(Ordering::SeqCst) => Err(BuildError::Interrupted),
            _ => Ok(()),
        }
    }

    /// Build every unit once.
    ///
    /// Fail-fast returns the first failure; keep-going returns `BatchFailed`
    /// naming everything that failed. Scratch entries are removed either way.
    pub fn build_all<F>(&self, units: &[Unit], mut on_event: F) -> BuildResult<BuildSummary>
    where
        F: FnMut(BuildEvent),
    {
        let mut batch = Batch::new(self.policy);

        for unit in units {
            self.check_cancelled()?;
            match unit {
                Unit::Module(module) => {
                    on_event(BuildEvent::UnitStarted {
                        label: module.name().to_string(),
                        files: module.source_files().len(),
                    });
                    let result = self.invoker.build_module(module);
                    batch.record(module.name(), result, &mut on_event)?;
                }
                Unit::Asset(asset) => self.build_asset(asset, &mut batch, &mut on_event)?,
            }
        }

        batch.finish()
    }

    fn build_asset<F>(&self, unit: &AssetUnit, batch: &mut Batch, on_event: &mut F) -> BuildResult<()>
    where
        F: FnMut(BuildEvent),
    {
        on_event(BuildEvent::UnitStarted {
            label: unit.label(),
            files: unit.source_files().len(),
        });

        match self.invoker.config().assets.mode {
            AssetMode::PerFile => {
                for file in unit.source_files() {
                    self.check_cancelled()?;
                    let result = self.invoker.build_asset_file(unit, file);
                    batch.record(&asset_file_label(unit, file), result, on_event)?;
                }
                Ok(())
            }
            AssetMode::Bundle => {
                let result = self.invoker.build_asset_bundle(unit);
                batch.record(&unit.label(), result, on_event)
            }
        }
    }

    /// Start watch jobs for every unit and hand them to `session`.
    ///
    /// Returns without blocking. Every job is tracked as soon as it starts,
    /// including jobs of a unit that fails partway. Under fail-fast a unit
    /// that cannot be started aborts the rest (already-started jobs stay in
    /// the session for the caller to terminate).
    pub fn watch_all<F>(&self, units: &[Unit], session: &mut Session, mut on_event: F) -> BuildResult<()>
    where
        F: FnMut(BuildEvent),
    {
        let mut failed = Vec::new();

        for unit in units {
            let mut start = |job: WatchJob| {
                on_event(BuildEvent::WatchStarted {
                    label: job.label().to_string(),
                    pid: job.id(),
                });
                session.track(job);
            };
            let started = match unit {
                Unit::Module(module) => self.invoker.watch_module(module).map(&mut start),
                Unit::Asset(asset) => self.invoker.watch_assets(asset, &mut start),
            };

            if let Err(e) = started {
                on_event(BuildEvent::UnitFailed {
                    label: unit.label(),
                    message: e.to_string(),
                });
                match self.policy {
                    FailurePolicy::FailFast => return Err(e),
                    FailurePolicy::KeepGoing => failed.push(unit.label()),
                }
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(BuildError::BatchFailed { failed })
        }
    }
}

/// Outcome accumulator for one batch
struct Batch {
    policy: FailurePolicy,
    outputs: Vec<PathBuf>,
    failed: Vec<String>,
}

impl Batch {
    fn new(policy: FailurePolicy) -> Self {
        Self {
            policy,
            outputs: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Emit the outcome; under fail-fast a failure is returned as-is
    fn record<F>(&mut self, label: &str, result: BuildResult<PathBuf>, on_event: &mut F) -> BuildResult<()>
    where
        F: FnMut(BuildEvent),
    {
        match result {
            Ok(output) => {
                on_event(BuildEvent::UnitBuilt {
                    label: label.to_string(),
                    output: output.display().to_string(),
                });
                self.outputs.push(output);
                Ok(())
            }
            Err(e) => {
                on_event(BuildEvent::UnitFailed {
                    label: label.to_string(),
                    message: e.to_string(),
                });
                match self.policy {
                    FailurePolicy::FailFast => Err(e),
                    FailurePolicy::KeepGoing => {
                        self.failed.push(label.to_string());
                        Ok(())
                    }
                }
            }
        }
    }

    fn finish(self) -> BuildResult<BuildSummary> {
        if self.failed.is_empty() {
            Ok(BuildSummary {
                outputs: self.outputs,
            })
        } else {
            Err(BuildError::BatchFailed {
                failed: self.failed,
            })
        }
    }
}
