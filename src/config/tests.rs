//! Tests for the config module

use super::types::*;
use super::PROJECT_CONFIG_FILE;
use crate::domain::value_objects::{AssetMode, FailurePolicy, ModuleFormat};
use std::fs;
use tempfile::tempdir;

#[test]
fn test_config_default() {
    let config = Config::default();

    assert_eq!(config.compiler.program, "npx");
    assert_eq!(config.compiler.args, vec!["esbuild"]);
    assert_eq!(config.bundle.externals, vec!["frappe", "jquery"]);
    assert_eq!(config.bundle.format, ModuleFormat::Iife);
    assert!(config.bundle.banner.starts_with("// Copyright"));
    assert_eq!(config.assets.mode, AssetMode::PerFile);
    assert_eq!(config.assets.target, "es2017");
    assert_eq!(config.typecheck.config, "tsconfig.base.json");
    assert_eq!(config.failure_policy(), FailurePolicy::FailFast);
}

#[test]
fn test_config_parse_toml() {
    let toml = r#"
[compiler]
program = "node_modules/.bin/esbuild"
args = []

[bundle]
externals = ["frappe"]
format = "esm"
banner = ""

[assets]
mode = "bundle"
bundle_name = "desk"

[typecheck]
config = "tsconfig.json"

[build]
keep_going = true
"#;

    let config: Config = toml::from_str(toml).unwrap();

    assert_eq!(config.compiler.program, "node_modules/.bin/esbuild");
    assert!(config.compiler.args.is_empty());
    assert_eq!(config.bundle.externals, vec!["frappe"]);
    assert_eq!(config.bundle.format, ModuleFormat::Esm);
    assert_eq!(config.bundle.banner, "");
    assert_eq!(config.assets.mode, AssetMode::Bundle);
    assert_eq!(config.assets.bundle_name.as_deref(), Some("desk"));
    assert_eq!(config.typecheck.config, "tsconfig.json");
    assert_eq!(config.failure_policy(), FailurePolicy::KeepGoing);
}

#[test]
fn test_partial_section_keeps_defaults() {
    let config: Config = toml::from_str("[assets]\ntarget = \"es2022\"\n").unwrap();

    assert_eq!(config.assets.target, "es2022");
    assert_eq!(config.assets.mode, AssetMode::PerFile);
    assert_eq!(config.bundle.externals, vec!["frappe", "jquery"]);
}

#[test]
fn test_load_for_root_prefers_project_file() {
    let dir = tempdir().unwrap();
    fs::write(
        dir.path().join(PROJECT_CONFIG_FILE),
        "[typecheck]\nconfig = \"tsconfig.app.json\"\nconfgi = 1\n",
    )
    .unwrap();

    let (config, warnings) = Config::load_for_root(dir.path()).unwrap();

    assert_eq!(config.typecheck.config, "tsconfig.app.json");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].suggestion.as_deref(), Some("config"));
}

#[test]
fn test_load_missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = Config::load(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, crate::error::BuildError::Io(_)));
}
