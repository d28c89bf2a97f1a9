//! In-memory ProcessRunner for tests
//!
//! Records every command, "compiles" by writing the requested `--outfile`,
//! and hands out processes whose exit can be triggered from the test.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use crate::domain::ports::{CommandSpec, ProcessHandle, ProcessRunner, ProcessStatus};
use crate::error::BuildResult;

/// Shared state of one fake process
#[derive(Debug, Default)]
pub struct FakeProcessState {
    pub id: u32,
    pub spec: Option<CommandSpec>,
    exit: Mutex<Option<ProcessStatus>>,
    killed: Mutex<bool>,
}

impl FakeProcessState {
    /// Simulate the process exiting on its own
    pub fn exit_with(&self, code: i32) {
        *self.exit.lock().unwrap() = Some(ProcessStatus::from_code(code));
    }

    pub fn is_killed(&self) -> bool {
        *self.killed.lock().unwrap()
    }

    pub fn has_exited(&self) -> bool {
        self.exit.lock().unwrap().is_some()
    }
}

#[derive(Debug, Default)]
struct FakeState {
    commands: Vec<CommandSpec>,
    inputs: Vec<(PathBuf, Option<String>)>,
    fail_patterns: Vec<String>,
    processes: Vec<Arc<FakeProcessState>>,
}

/// Recording runner; cheap to clone, clones share state
#[derive(Debug, Clone, Default)]
pub struct FakeRunner {
    state: Arc<Mutex<FakeState>>,
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// One-shot commands with an argument containing `pattern` exit 1
    pub fn fail_on(&self, pattern: &str) {
        self.state
            .lock()
            .unwrap()
            .fail_patterns
            .push(pattern.to_string());
    }

    pub fn commands(&self) -> Vec<CommandSpec> {
        self.state.lock().unwrap().commands.clone()
    }

    /// `.ts` inputs as they existed on disk when the command ran
    pub fn inputs(&self) -> Vec<(PathBuf, Option<String>)> {
        self.state.lock().unwrap().inputs.clone()
    }

    pub fn processes(&self) -> Vec<Arc<FakeProcessState>> {
        self.state.lock().unwrap().processes.clone()
    }

    fn record(&self, spec: &CommandSpec) {
        let mut state = self.state.lock().unwrap();
        state.commands.push(spec.clone());
        if let Some(input) = spec.args.iter().find(|a| a.ends_with(".ts")) {
            let path = spec.cwd.join(input);
            let content = std::fs::read_to_string(&path).ok();
            state.inputs.push((path, content));
        }
    }
}

impl ProcessRunner for FakeRunner {
    fn run(&self, spec: &CommandSpec) -> BuildResult<ProcessStatus> {
        self.record(spec);

        let fails = {
            let state = self.state.lock().unwrap();
            state
                .fail_patterns
                .iter()
                .any(|p| spec.args.iter().any(|a| a.contains(p.as_str())))
        };
        if fails {
            return Ok(ProcessStatus::from_code(1));
        }

        if let Some(outfile) = spec.flag_value("--outfile") {
            let path = spec.cwd.join(outfile);
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, "// built\n")?;
        }
        Ok(ProcessStatus::from_code(0))
    }

    fn spawn(&self, spec: &CommandSpec) -> BuildResult<Box<dyn ProcessHandle>> {
        self.record(spec);

        let mut state = self.state.lock().unwrap();
        let process = Arc::new(FakeProcessState {
            id: 1000 + state.processes.len() as u32,
            spec: Some(spec.clone()),
            ..FakeProcessState::default()
        });
        state.processes.push(process.clone());
        Ok(Box::new(FakeProcess { state: process }))
    }
}

struct FakeProcess {
    state: Arc<FakeProcessState>,
}

impl ProcessHandle for FakeProcess {
    fn id(&self) -> u32 {
        self.state.id
    }

    fn try_wait(&mut self) -> std::io::Result<Option<ProcessStatus>> {
        Ok(*self.state.exit.lock().unwrap())
    }

    fn kill(&mut self) -> std::io::Result<()> {
        let mut exit = self.state.exit.lock().unwrap();
        if exit.is_some() {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "process already exited",
            ));
        }
        *self.state.killed.lock().unwrap() = true;
        *exit = Some(ProcessStatus { code: None });
        Ok(())
    }

    fn wait(&mut self) -> std::io::Result<ProcessStatus> {
        self.state
            .exit
            .lock()
            .unwrap()
            .ok_or_else(|| std::io::Error::other("fake process still running"))
    }
}
