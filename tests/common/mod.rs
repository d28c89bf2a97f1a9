//! Common test utilities for frappe-build CLI tests.
//!
//! This module provides:
//! - `TestEnv`: Isolated app tree, config home and stub toolchain
//! - Fixtures: A small Frappe app layout and a stub compiler script

pub mod env;
pub mod fixtures;

pub use env::*;
pub use fixtures::*;
