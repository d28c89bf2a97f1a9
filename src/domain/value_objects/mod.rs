//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod mode;
mod unit;

pub use config_warning::ConfigWarning;
pub use mode::{AssetMode, BuildMode, FailurePolicy, ModuleFormat};
pub use unit::{AssetUnit, ModuleUnit, Unit, OUTPUT_EXT};
