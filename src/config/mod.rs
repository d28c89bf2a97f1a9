//! Configuration module for frappe-build
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (FRAPPE_BUILD_*)
//! 3. Project config (<root>/frappe-build.toml)
//! 4. User config (~/.config/frappe-build/config.toml)
//! 5. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use crate::domain::value_objects::ConfigWarning;
pub use loader::PROJECT_CONFIG_FILE;
pub use types::{AssetsConfig, BuildConfig, BundleConfig, CompilerConfig, Config, TypecheckConfig};
