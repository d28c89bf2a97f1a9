//! Build mode, output format and failure policy value objects

use serde::{Deserialize, Serialize};

/// One-shot (run to completion) or watch (continuous) invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuildMode {
    #[default]
    OneShot,
    Watch,
}

impl BuildMode {
    pub fn is_watch(&self) -> bool {
        matches!(self, BuildMode::Watch)
    }
}

/// Module format handed to the bundler's `--format` flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ModuleFormat {
    /// Self-executing wrapper
    #[default]
    Iife,
    Esm,
    Cjs,
}

impl ModuleFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleFormat::Iife => "iife",
            ModuleFormat::Esm => "esm",
            ModuleFormat::Cjs => "cjs",
        }
    }
}

impl std::str::FromStr for ModuleFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "iife" => Ok(ModuleFormat::Iife),
            "esm" => Ok(ModuleFormat::Esm),
            "cjs" => Ok(ModuleFormat::Cjs),
            other => Err(format!("unknown module format '{}'", other)),
        }
    }
}

/// How public-asset units are compiled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AssetMode {
    /// One compiler invocation per source file, mirrored into `public/js`
    #[default]
    PerFile,
    /// One synthesized entry bundled into a single named output
    Bundle,
}

impl std::str::FromStr for AssetMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "per-file" => Ok(AssetMode::PerFile),
            "bundle" => Ok(AssetMode::Bundle),
            other => Err(format!("unknown assets mode '{}'", other)),
        }
    }
}

/// What a batch does after one unit (or one per-file invocation) fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort the remaining batch and return the first failure
    #[default]
    FailFast,
    /// Attempt everything, then report every failure together
    KeepGoing,
}

impl FailurePolicy {
    pub fn from_keep_going(keep_going: bool) -> Self {
        if keep_going {
            FailurePolicy::KeepGoing
        } else {
            FailurePolicy::FailFast
        }
    }
}
