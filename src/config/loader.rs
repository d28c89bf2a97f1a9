//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::value_objects::{AssetMode, ConfigWarning};
use crate::error::{BuildError, BuildResult};

use super::types::Config;

/// Project config file name, looked up directly under the root
pub const PROJECT_CONFIG_FILE: &str = "frappe-build.toml";

/// Load configuration and collect non-fatal warnings (e.g. unknown keys).
pub fn load_with_warnings(path: &Path) -> BuildResult<(Config, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;
    parse_with_warnings(&content, path)
}

fn parse_with_warnings(content: &str, path: &Path) -> BuildResult<(Config, Vec<ConfigWarning>)> {
    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(content);

    let config: Config = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| BuildError::InvalidConfig {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                line: find_line_number(content, &key),
                suggestion: suggest_key(&key),
                key,
                path: path_str,
                file: path.to_path_buf(),
            }
        })
        .collect();

    Ok((config, warnings))
}

/// Project config, else user config, else defaults; env overrides on top.
///
/// A missing file is not an error, a malformed one is.
pub fn load_for_root(root: &Path) -> BuildResult<(Config, Vec<ConfigWarning>)> {
    let candidates = [Some(root.join(PROJECT_CONFIG_FILE)), user_config_path()];

    for candidate in candidates.into_iter().flatten() {
        if candidate.is_file() {
            tracing::debug!("loading config from {}", candidate.display());
            let (config, warnings) = load_with_warnings(&candidate)?;
            return Ok((with_env_overrides(config), warnings));
        }
    }

    Ok((with_env_overrides(Config::default()), Vec::new()))
}

/// Apply environment variable overrides (FRAPPE_BUILD_* prefix)
pub fn with_env_overrides(config: Config) -> Config {
    apply_overrides(config, |key| std::env::var(key).ok())
}

fn apply_overrides(mut config: Config, lookup: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(program) = lookup("FRAPPE_BUILD_COMPILER") {
        if !program.trim().is_empty() {
            config.compiler.program = program.trim().to_string();
        }
    }

    if let Some(format) = lookup("FRAPPE_BUILD_FORMAT") {
        match format.parse() {
            Ok(format) => config.bundle.format = format,
            Err(e) => tracing::warn!("ignoring FRAPPE_BUILD_FORMAT: {}", e),
        }
    }

    if let Some(target) = lookup("FRAPPE_BUILD_TARGET") {
        if !target.trim().is_empty() {
            config.assets.target = target.trim().to_string();
        }
    }

    if let Some(mode) = lookup("FRAPPE_BUILD_ASSETS_MODE") {
        match mode.parse::<AssetMode>() {
            Ok(mode) => config.assets.mode = mode,
            Err(e) => tracing::warn!("ignoring FRAPPE_BUILD_ASSETS_MODE: {}", e),
        }
    }

    if let Some(val) = lookup("FRAPPE_BUILD_KEEP_GOING") {
        match parse_flag(&val) {
            Some(keep_going) => config.build.keep_going = keep_going,
            None => tracing::warn!("ignoring FRAPPE_BUILD_KEEP_GOING: expected 1/true/0/false, got '{}'", val),
        }
    }

    config
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("frappe-build").join("config.toml"))
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "compiler",
        "program",
        "args",
        "bundle",
        "externals",
        "format",
        "banner",
        "assets",
        "mode",
        "target",
        "bundle_name",
        "typecheck",
        "config",
        "build",
        "keep_going",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] =
                std::cmp::min(std::cmp::min(prev[j + 1] + 1, curr[j] + 1), prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
