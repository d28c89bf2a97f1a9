//! Error types for frappe-build
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for frappe-build operations
pub type BuildResult<T> = Result<T, BuildError>;

/// Main error type for discovery, build and session operations
#[derive(Error, Debug)]
pub enum BuildError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Root directory does not exist or is not a directory
    #[error("root directory not found: {path}")]
    RootNotFound { path: PathBuf },

    /// Configuration file could not be parsed
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// External tool could not be started
    #[error("failed to start '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// One-shot compiler invocation exited non-zero
    #[error("build of {unit} failed ({})", describe_code(.code))]
    CompilerFailed { unit: String, code: Option<i32> },

    /// One-shot type-check exited non-zero
    #[error("type-check failed ({})", describe_code(.code))]
    TypeCheckFailed { code: Option<i32> },

    /// Type-check configuration file is absent
    #[error("type-check config not found: {path}")]
    TypeCheckConfigMissing { path: PathBuf },

    /// The session was cancelled before the batch finished
    #[error("build interrupted")]
    Interrupted,

    /// A keep-going batch finished with failures
    #[error("{} unit(s) failed to build: {}", .failed.len(), .failed.join(", "))]
    BatchFailed { failed: Vec<String> },
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}
