//! `frappe-build build` - one-shot build of every unit

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use frappe_build::application::sweep_scratch;
use frappe_build::{
    discover, BuildEvent, BuildUseCase, CompilerInvoker, SystemProcessRunner, TypeCheckSupervisor,
};

use super::Context;
use crate::cli::BuildArgs;
use crate::ui;

pub fn cmd_build(ctx: &Context, args: &BuildArgs) -> Result<()> {
    let root = ctx.root();
    let units = discover(root)?;

    if units.is_empty() {
        if !ctx.json {
            println!("No DocTypes with ts/ folders or public/ts folders found");
        }
        return Ok(());
    }

    if !ctx.json {
        println!("{}", ui::render_units(&units, root));
    }

    // The compiler receives the interrupt itself; staying alive lets the
    // scratch guards and the final sweep run before exiting.
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = interrupted.clone();
    ctrlc::set_handler(move || flag.store(true, Ordering::SeqCst))
        .context("failed to install Ctrl+C handler")?;

    let runner = SystemProcessRunner::new();
    let emit = |event: BuildEvent| ui::emit(&event, "build", ctx.json, root);

    if args.typecheck {
        let supervisor = TypeCheckSupervisor::new(&runner, &ctx.config.typecheck, root);
        let config = ctx.config.typecheck.config.clone();
        if supervisor.config_path().is_file() {
            emit(BuildEvent::TypeCheckStarted { config });
            supervisor.check()?;
        } else {
            emit(BuildEvent::TypeCheckSkipped { config });
        }
    }

    let use_case = BuildUseCase::new(
        CompilerInvoker::new(&runner, &ctx.config, root),
        ctx.config.failure_policy(),
    )
    .with_cancel(interrupted.clone());

    let result = use_case.build_all(&units, emit);
    sweep_scratch(&units);

    if interrupted.load(Ordering::SeqCst) {
        anyhow::bail!("build interrupted");
    }
    let summary = result?;

    if !ctx.json {
        println!("\n✓ Built {} output(s)", summary.outputs.len());
    }
    Ok(())
}
