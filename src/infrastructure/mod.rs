//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Source tree scanning
//! - `process/` - Process runners (system, and a fake for tests)

pub mod fs;
pub mod process;

pub use fs::scan_sources;
pub use process::SystemProcessRunner;
