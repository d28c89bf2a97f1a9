//! Test environment builder for isolated frappe-build testing.
//!
//! Provides `TestEnv` - a temp app root, a temp config home (so no user
//! config leaks in) and a stub toolchain wired in through
//! `frappe-build.toml`.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant};

use tempfile::TempDir;

use super::fixtures::{ASSET_SOURCES, STUB_COMPILER, WIDGET_SOURCES};

/// Result of running a frappe-build CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as NDJSON, skipping non-JSON lines
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }
}

/// Isolated test environment
pub struct TestEnv {
    /// The application root, used as the working directory
    pub root: TempDir,
    /// Holds the stub toolchain, its log and the config home
    pub tools: TempDir,
}

impl TestEnv {
    /// Empty root with the stub toolchain configured
    pub fn new() -> Self {
        let env = Self {
            root: TempDir::new().expect("create root"),
            tools: TempDir::new().expect("create tools dir"),
        };
        env.install_stub();
        env
    }

    /// Root holding one doctype unit and one public asset unit
    pub fn with_app() -> Self {
        let env = Self::new();
        for (path, content) in WIDGET_SOURCES.iter().chain(ASSET_SOURCES) {
            env.write(path, content);
        }
        env
    }

    fn install_stub(&self) {
        let stub = self.tools.path().join("stub-compiler");
        fs::write(&stub, STUB_COMPILER).expect("write stub");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&stub, fs::Permissions::from_mode(0o755)).expect("chmod stub");
        }

        let config = format!(
            r#"[compiler]
program = "{stub}"
args = []

[typecheck]
program = "{stub}"
args = ["tsc"]
"#,
            stub = stub.display()
        );
        self.write("frappe-build.toml", &config);
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent");
        }
        fs::write(path, content).expect("write fixture");
    }

    /// Every invocation of the stub, one line each
    pub fn stub_log(&self) -> Vec<String> {
        fs::read_to_string(self.log_path())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Concatenated contents of every entry file the stub saw
    pub fn stub_entries(&self) -> String {
        fs::read_to_string(self.log_path().with_extension("log.entries")).unwrap_or_default()
    }

    fn log_path(&self) -> PathBuf {
        self.tools.path().join("stub.log")
    }

    fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_frappe-build"));
        cmd.args(args)
            .current_dir(self.root.path())
            .env("STUB_LOG", self.log_path())
            .env("XDG_CONFIG_HOME", self.tools.path().join("config"))
            .env("HOME", self.tools.path())
            .env_remove("RUST_LOG");
        for key in [
            "FRAPPE_BUILD_COMPILER",
            "FRAPPE_BUILD_FORMAT",
            "FRAPPE_BUILD_TARGET",
            "FRAPPE_BUILD_ASSETS_MODE",
            "FRAPPE_BUILD_KEEP_GOING",
        ] {
            cmd.env_remove(key);
        }
        cmd
    }

    /// Run to completion
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    /// Run to completion with extra environment variables
    pub fn run_with_env(&self, args: &[&str], vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = self.command(args);
        cmd.envs(vars.iter().copied());
        let output = cmd.output().expect("run frappe-build");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    /// Start in the background with piped output
    pub fn spawn(&self, args: &[&str]) -> Child {
        self.spawn_with_env(args, &[])
    }

    pub fn spawn_with_env(&self, args: &[&str], vars: &[(&str, &str)]) -> Child {
        self.command(args)
            .envs(vars.iter().copied())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("spawn frappe-build")
    }
}

/// Poll `check` until it holds or `timeout` passes
pub fn wait_until(timeout: Duration, mut check: impl FnMut() -> bool) -> bool {
    let deadline = Instant::now() + timeout;
    while Instant::now() < deadline {
        if check() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    check()
}

/// Deliver SIGINT to `child`, as Ctrl+C would
#[cfg(unix)]
pub fn interrupt(child: &Child) {
    let status = Command::new("kill")
        .args(["-INT", &child.id().to_string()])
        .status()
        .expect("run kill");
    assert!(status.success(), "kill -INT failed");
}

/// List all files under a directory recursively (for failure messages)
pub fn list_all_files(dir: &Path) -> Vec<String> {
    let mut files = Vec::new();
    if let Ok(entries) = fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                files.extend(list_all_files(&path));
            } else {
                files.push(path.display().to_string());
            }
        }
    }
    files
}
