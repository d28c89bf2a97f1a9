//! Configuration type definitions

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::services::Toolchain;
use crate::domain::value_objects::{AssetMode, ConfigWarning, FailurePolicy, ModuleFormat};
use crate::error::BuildResult;

use super::loader;

/// Bundler launcher configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilerConfig {
    #[serde(default = "default_launcher")]
    pub program: String,

    #[serde(default = "default_esbuild_args")]
    pub args: Vec<String>,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            program: default_launcher(),
            args: default_esbuild_args(),
        }
    }
}

impl CompilerConfig {
    pub fn toolchain(&self) -> Toolchain {
        Toolchain::new(self.program.clone(), self.args.clone())
    }
}

/// Module-scoped bundle configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BundleConfig {
    #[serde(default = "default_externals")]
    pub externals: Vec<String>,

    #[serde(default)]
    pub format: ModuleFormat,

    #[serde(default = "default_banner")]
    pub banner: String,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            externals: default_externals(),
            format: ModuleFormat::default(),
            banner: default_banner(),
        }
    }
}

/// Public-asset configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetsConfig {
    #[serde(default)]
    pub mode: AssetMode,

    #[serde(default = "default_target")]
    pub target: String,

    #[serde(default)]
    pub format: ModuleFormat,

    /// Output name for bundle mode; defaults to the app folder name
    #[serde(default)]
    pub bundle_name: Option<String>,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            mode: AssetMode::default(),
            target: default_target(),
            format: ModuleFormat::default(),
            bundle_name: None,
        }
    }
}

/// Type-checker configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypecheckConfig {
    #[serde(default = "default_launcher")]
    pub program: String,

    #[serde(default = "default_tsc_args")]
    pub args: Vec<String>,

    /// Project config, relative to the root
    #[serde(default = "default_tsconfig")]
    pub config: String,
}

impl Default for TypecheckConfig {
    fn default() -> Self {
        Self {
            program: default_launcher(),
            args: default_tsc_args(),
            config: default_tsconfig(),
        }
    }
}

impl TypecheckConfig {
    pub fn toolchain(&self) -> Toolchain {
        Toolchain::new(self.program.clone(), self.args.clone())
    }
}

/// Batch behaviour
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BuildConfig {
    #[serde(default)]
    pub keep_going: bool,
}

fn default_launcher() -> String {
    "npx".to_string()
}

fn default_esbuild_args() -> Vec<String> {
    vec!["esbuild".to_string()]
}

fn default_tsc_args() -> Vec<String> {
    vec!["tsc".to_string()]
}

fn default_externals() -> Vec<String> {
    vec!["frappe".to_string(), "jquery".to_string()]
}

fn default_banner() -> String {
    "// Copyright (c) 2025, AnyGridTech and contributors\n// For license information, please see license.txt".to_string()
}

fn default_target() -> String {
    "es2017".to_string()
}

fn default_tsconfig() -> String {
    "tsconfig.base.json".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub compiler: CompilerConfig,

    #[serde(default)]
    pub bundle: BundleConfig,

    #[serde(default)]
    pub assets: AssetsConfig,

    #[serde(default)]
    pub typecheck: TypecheckConfig,

    #[serde(default)]
    pub build: BuildConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> BuildResult<Self> {
        let (config, _warnings) = loader::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> BuildResult<(Self, Vec<ConfigWarning>)> {
        loader::load_with_warnings(path)
    }

    /// Resolve project config, user config or defaults, then env overrides
    pub fn load_for_root(root: &Path) -> BuildResult<(Self, Vec<ConfigWarning>)> {
        loader::load_for_root(root)
    }

    /// Apply environment variable overrides (FRAPPE_BUILD_* prefix)
    pub fn with_env_overrides(self) -> Self {
        loader::with_env_overrides(self)
    }

    pub fn failure_policy(&self) -> FailurePolicy {
        FailurePolicy::from_keep_going(self.build.keep_going)
    }
}
