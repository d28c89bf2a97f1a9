//! frappe-build - TypeScript build orchestration for Frappe apps
//!
//! Discovers TypeScript units in a Frappe app tree (`*/doctype/<name>/ts` and
//! `*/public/ts`), compiles them with an external bundler (esbuild by
//! default), and manages the lifecycle of one-shot and watch-mode compiler
//! processes, including the scratch entry files bundling relies on.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use application::{
    discover, BuildEvent, BuildSummary, BuildUseCase, CompilerInvoker, Session,
    TypeCheckSupervisor, WatchJob,
};
pub use config::Config;
pub use domain::value_objects::{AssetUnit, FailurePolicy, ModuleUnit, Unit};
pub use error::{BuildError, BuildResult};
pub use infrastructure::SystemProcessRunner;
