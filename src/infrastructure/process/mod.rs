//! Process Runner Implementations
//!
//! Concrete implementations of the ProcessRunner port.

#[cfg(test)]
mod fake;
mod system;

#[cfg(test)]
pub use fake::{FakeProcessState, FakeRunner};
pub use system::{SystemProcess, SystemProcessRunner};
