//! `frappe-build watch` - continuous compilation until Ctrl+C

use anyhow::Result;
use frappe_build::{
    discover, BuildError, BuildEvent, BuildUseCase, CompilerInvoker, Session,
    SystemProcessRunner, TypeCheckSupervisor,
};

use super::{interrupt_channel, supervise, Context};
use crate::cli::BuildArgs;
use crate::ui;

pub fn cmd_watch(ctx: &Context, args: &BuildArgs) -> Result<()> {
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

    let interrupt = interrupt_channel()?;
    let runner = SystemProcessRunner::new();
    let mut session = Session::new(units.clone());
    let emit = |event: BuildEvent| ui::emit(&event, "watch", ctx.json, root);

    if args.typecheck {
        let supervisor = TypeCheckSupervisor::new(&runner, &ctx.config.typecheck, root);
        let config = ctx.config.typecheck.config.clone();
        match supervisor.start()? {
            Some(job) => {
                emit(BuildEvent::TypeCheckStarted { config });
                session.track(job);
            }
            None => emit(BuildEvent::TypeCheckSkipped { config }),
        }
    }

    let use_case = BuildUseCase::new(
        CompilerInvoker::new(&runner, &ctx.config, root),
        ctx.config.failure_policy(),
    );
    // Keep-going reports units that failed to start but keeps the rest alive.
    let start_failure = match use_case.watch_all(&units, &mut session, emit) {
        Ok(()) => None,
        Err(e @ BuildError::BatchFailed { .. }) => {
            if !ctx.json {
                eprintln!("⚠ {}; watching the rest", e);
            }
            Some(e)
        }
        Err(e) => return Err(e.into()),
    };

    if !ctx.json {
        println!("\n👀 Watching for changes... (Press Ctrl+C to stop)");
    }

    supervise(&mut session, &interrupt, ctx, "watch");

    if !ctx.json {
        println!("\n👋 Stopped watching");
    }
    match start_failure {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
