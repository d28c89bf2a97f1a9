//! System Process Runner
//!
//! Implements the ProcessRunner port with `std::process::Command`.
//! Children inherit stdin/stdout/stderr, so the external tool's diagnostics
//! reach the user unchanged.
//!
//! One-shot commands stay in our process group, so Ctrl+C reaches them
//! directly. Spawned (watch) processes lead a group of their own and `kill`
//! signals that whole group, which takes down the real tool behind a
//! launcher such as `npx`.

use std::process::{Child, Command, Stdio};

use crate::domain::ports::{CommandSpec, ProcessHandle, ProcessRunner, ProcessStatus};
use crate::error::{BuildError, BuildResult};

/// Runs commands as real OS processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemProcessRunner;

impl SystemProcessRunner {
    pub fn new() -> Self {
        Self
    }

    fn command(spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .current_dir(&spec.cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        cmd
    }

    fn spawn_error(spec: &CommandSpec, source: std::io::Error) -> BuildError {
        BuildError::Spawn {
            program: spec.program.clone(),
            source,
        }
    }
}

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, spec: &CommandSpec) -> BuildResult<ProcessStatus> {
        tracing::debug!("running: {}", spec);
        let status = Self::command(spec)
            .status()
            .map_err(|e| Self::spawn_error(spec, e))?;
        Ok(status.into())
    }

    fn spawn(&self, spec: &CommandSpec) -> BuildResult<Box<dyn ProcessHandle>> {
        tracing::debug!("spawning: {}", spec);
        let mut cmd = Self::command(spec);
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }
        let child = cmd.spawn().map_err(|e| Self::spawn_error(spec, e))?;
        Ok(Box::new(SystemProcess {
            child,
            reaped: false,
        }))
    }
}

/// Live handle to a spawned OS process
#[derive(Debug)]
pub struct SystemProcess {
    child: Child,
    /// Once reaped, the pid (and group id) may belong to someone else
    reaped: bool,
}

impl ProcessHandle for SystemProcess {
    fn id(&self) -> u32 {
        self.child.id()
    }

    fn try_wait(&mut self) -> std::io::Result<Option<ProcessStatus>> {
        let status = self.child.try_wait()?;
        self.reaped |= status.is_some();
        Ok(status.map(Into::into))
    }

    fn kill(&mut self) -> std::io::Result<()> {
        if self.reaped {
            return Ok(());
        }
        kill_group(&mut self.child)
    }

    fn wait(&mut self) -> std::io::Result<ProcessStatus> {
        let status = self.child.wait()?;
        self.reaped = true;
        Ok(status.into())
    }
}

#[cfg(unix)]
fn kill_group(child: &mut Child) -> std::io::Result<()> {
    let pgid = child.id() as libc::pid_t;
    // SAFETY: kill(2) takes no pointers; the group was created at spawn and
    // its leader is not reaped yet, so the id cannot have been reused.
    if unsafe { libc::kill(-pgid, libc::SIGKILL) } == 0 {
        Ok(())
    } else {
        Err(std::io::Error::last_os_error())
    }
}

#[cfg(not(unix))]
fn kill_group(child: &mut Child) -> std::io::Result<()> {
    child.kill()
}
