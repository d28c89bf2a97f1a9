//! Command handlers for the `frappe-build` binary

pub mod build;
pub mod list;
pub mod typecheck;
pub mod watch;

use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::Duration;

use anyhow::{Context as _, Result};
use frappe_build::{Config, Session};

use crate::cli::BuildArgs;
use crate::ui;

/// How often the watch loop checks tracked processes
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// Resolved root, configuration and output mode shared by every command
#[derive(Debug, Clone)]
pub struct Context {
    pub root: PathBuf,
    pub config: Config,
    pub json: bool,
}

impl Context {
    pub fn load(root: Option<PathBuf>, json: bool) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => std::env::current_dir().context("cannot determine current directory")?,
        };
        let root = root
            .canonicalize()
            .with_context(|| format!("root directory not found: {}", root.display()))?;

        let (config, warnings) = Config::load_for_root(&root)?;
        if !json {
            ui::print_config_warnings(&warnings);
        }

        Ok(Self { root, config, json })
    }

    /// Apply `build`/`watch` flag overrides on top of the loaded config
    pub fn with_build_args(mut self, args: &BuildArgs) -> Self {
        if args.keep_going {
            self.config.build.keep_going = true;
        }
        if let Some(mode) = args.assets_mode {
            self.config.assets.mode = mode;
        }
        if let Some(format) = args.format {
            self.config.bundle.format = format;
        }
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Block until Ctrl+C (or until every tracked process has exited),
/// reporting exits as they happen, then terminate the session.
pub fn supervise(session: &mut Session, interrupt: &Receiver<()>, ctx: &Context, command: &str) {
    loop {
        match interrupt.recv_timeout(POLL_INTERVAL) {
            Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
            Err(RecvTimeoutError::Timeout) => {}
        }

        for event in session.poll() {
            ui::emit(&event, command, ctx.json, ctx.root());
        }

        if session.running() == 0 {
            tracing::warn!("all processes exited");
            break;
        }
    }

    session.terminate();
}

/// Install a Ctrl+C handler that reports on the returned channel
pub fn interrupt_channel() -> Result<Receiver<()>> {
    let (tx, rx) = std::sync::mpsc::channel();
    ctrlc::set_handler(move || {
        let _ = tx.send(());
    })
    .context("failed to install Ctrl+C handler")?;
    Ok(rx)
}
