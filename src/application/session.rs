//! Session manager
//!
//! A [`Session`] owns every live watch process started during one
//! invocation, plus the scratch entries those processes read. It is driven
//! from a single control thread: the caller polls it for exits and calls
//! [`Session::terminate`] once on interrupt. `terminate` is idempotent and
//! also runs on drop.

use crate::domain::ports::{ProcessHandle, ProcessStatus};
use crate::domain::value_objects::Unit;

use super::entry::{sweep_scratch, ScratchEntry};
use super::events::BuildEvent;

/// A continuous external process and the scratch entry it keeps re-reading
pub struct WatchJob {
    label: String,
    handle: Box<dyn ProcessHandle>,
    scratch: Option<ScratchEntry>,
    exit: Option<ProcessStatus>,
}

impl WatchJob {
    pub fn new(label: impl Into<String>, handle: Box<dyn ProcessHandle>, scratch: Option<ScratchEntry>) -> Self {
        Self {
            label: label.into(),
            handle,
            scratch,
            exit: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn id(&self) -> u32 {
        self.handle.id()
    }

    pub fn is_running(&self) -> bool {
        self.exit.is_none()
    }

    /// Check for exit. Returns the status once, on the poll that observes it;
    /// the scratch entry is released at that moment.
    pub fn poll(&mut self) -> Option<ProcessStatus> {
        if self.exit.is_some() {
            return None;
        }
        match self.handle.try_wait() {
            Ok(Some(status)) => {
                self.exit = Some(status);
                self.scratch = None;
                Some(status)
            }
            Ok(None) => None,
            Err(e) => {
                tracing::warn!("cannot query {} (pid {}): {}", self.label, self.id(), e);
                None
            }
        }
    }

    /// Kill (if still running), reap, and release the scratch entry.
    /// Errors from an already-dead process are swallowed.
    fn terminate(&mut self) {
        if self.exit.is_none() {
            if let Err(e) = self.handle.kill() {
                tracing::debug!("kill {} (pid {}): {}", self.label, self.id(), e);
            }
            match self.handle.wait() {
                Ok(status) => self.exit = Some(status),
                Err(e) => tracing::debug!("wait {} (pid {}): {}", self.label, self.id(), e),
            }
        }
        self.scratch = None;
    }
}

impl Drop for WatchJob {
    fn drop(&mut self) {
        self.terminate();
    }
}

impl std::fmt::Debug for WatchJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatchJob")
            .field("label", &self.label)
            .field("pid", &self.handle.id())
            .field("scratch", &self.scratch)
            .field("exit", &self.exit)
            .finish()
    }
}

/// All processes and scratch files of one build/watch invocation
#[derive(Debug, Default)]
pub struct Session {
    units: Vec<Unit>,
    jobs: Vec<WatchJob>,
}

impl Session {
    /// Start a session over the units discovered for it
    pub fn new(units: Vec<Unit>) -> Self {
        Self {
            units,
            jobs: Vec::new(),
        }
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn track(&mut self, job: WatchJob) {
        tracing::debug!("tracking {} (pid {})", job.label(), job.id());
        self.jobs.push(job);
    }

    pub fn jobs(&self) -> &[WatchJob] {
        &self.jobs
    }

    /// Number of tracked processes not yet observed to exit
    pub fn running(&self) -> usize {
        self.jobs.iter().filter(|j| j.is_running()).count()
    }

    /// Observe processes that exited since the last poll.
    ///
    /// Exits are not restarted; siblings keep running.
    pub fn poll(&mut self) -> Vec<BuildEvent> {
        self.jobs
            .iter_mut()
            .filter_map(|job| {
                job.poll().map(|status| BuildEvent::ProcessExited {
                    label: job.label().to_string(),
                    code: status.code,
                })
            })
            .collect()
    }

    /// Terminate every tracked process and remove every scratch entry.
    ///
    /// Safe to call repeatedly; never fails.
    pub fn terminate(&mut self) {
        let jobs = std::mem::take(&mut self.jobs);
        if !jobs.is_empty() {
            tracing::info!("terminating {} process(es)", jobs.len());
        }
        for mut job in jobs {
            job.terminate();
        }

        sweep_scratch(&self.units);
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.terminate();
    }
}
