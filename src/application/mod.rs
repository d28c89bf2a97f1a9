//! Application Layer
//!
//! Use cases that orchestrate discovery, compilation and process lifecycle.
//!
//! ## Use Cases
//!
//! - `discover` - Find module-scoped and public-asset units under a root
//! - `BuildUseCase` - Build or watch a batch of units under one failure policy
//! - `TypeCheckSupervisor` - Run the project type-checker, one-shot or continuous
//! - `Session` - Own live watch processes and scratch entries; terminate them together
//!
//! ## Services
//!
//! - `CompilerInvoker` - One unit (or one asset file) to one compiler invocation
//! - `ScratchEntry` - Synthesized bundle entry, removed on drop

pub mod build;
pub mod discovery;
pub mod entry;
pub mod events;
pub mod invoker;
pub mod session;
pub mod typecheck;

pub use build::{BuildSummary, BuildUseCase};
pub use discovery::{discover, discover_asset_units, discover_module_units};
pub use entry::{remove_scratch, scratch_path, sweep_scratch, ScratchEntry};
pub use events::BuildEvent;
pub use invoker::CompilerInvoker;
pub use session::{Session, WatchJob};
pub use typecheck::{TypeCheckSupervisor, TYPECHECK_LABEL};
