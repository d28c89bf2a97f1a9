//! ProcessRunner port - abstraction over spawning external tools
//!
//! The compiler and type-checker are opaque external programs. The domain
//! only describes *what* to run (`CommandSpec`) and observes exit status;
//! infrastructure decides *how* (real OS processes, or a fake in tests).

use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::BuildResult;

/// A fully-resolved external command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    /// Working directory (the discovery root)
    pub cwd: PathBuf,
}

impl CommandSpec {
    pub fn new(program: impl Into<String>, cwd: &Path) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.to_path_buf(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Value of a `--flag=value` argument, if present
    pub fn flag_value(&self, flag: &str) -> Option<&str> {
        let prefix = format!("{}=", flag);
        self.args
            .iter()
            .find_map(|a| a.strip_prefix(prefix.as_str()))
    }

    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.contains(char::is_whitespace) {
                write!(f, " {:?}", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Exit status of an external process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessStatus {
    /// Exit code, `None` when terminated by a signal
    pub code: Option<i32>,
}

impl ProcessStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::ExitStatus> for ProcessStatus {
    fn from(status: std::process::ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

/// A live external process
///
/// The orchestrator only asks for exit notification and termination.
pub trait ProcessHandle: Send {
    /// OS process id (or a fake id in tests)
    fn id(&self) -> u32;

    /// Non-blocking exit check
    fn try_wait(&mut self) -> std::io::Result<Option<ProcessStatus>>;

    /// Request termination
    fn kill(&mut self) -> std::io::Result<()>;

    /// Block until the process exits
    fn wait(&mut self) -> std::io::Result<ProcessStatus>;
}

/// Starts external commands with inherited standard streams
pub trait ProcessRunner {
    /// Run to completion (one-shot mode)
    fn run(&self, spec: &CommandSpec) -> BuildResult<ProcessStatus>;

    /// Start and return immediately (watch mode)
    fn spawn(&self, spec: &CommandSpec) -> BuildResult<Box<dyn ProcessHandle>>;
}
