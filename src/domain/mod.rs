//! Domain Layer
//!
//! Pure build logic without I/O dependencies.
//!
//! ## Structure
//!
//! - `value_objects/` - Immutable value types (ModuleUnit, AssetUnit, BuildMode)
//! - `services/` - Entry rendering and command-line construction
//! - `ports/` - Interface definitions for infrastructure (ProcessRunner)

pub mod ports;
pub mod services;
pub mod value_objects;
