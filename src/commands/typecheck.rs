//! `frappe-build typecheck` - standalone type-checking

use anyhow::Result;
use frappe_build::{BuildEvent, Session, SystemProcessRunner, TypeCheckSupervisor};

use super::{interrupt_channel, supervise, Context};
use crate::ui;

pub fn cmd_typecheck(ctx: &Context, watch: bool) -> Result<()> {
    let runner = SystemProcessRunner::new();
    let supervisor = TypeCheckSupervisor::new(&runner, &ctx.config.typecheck, ctx.root());

    // Unlike inside a build session, a missing config is an error here.
    supervisor.require_config()?;
    ui::emit(
        &BuildEvent::TypeCheckStarted {
            config: ctx.config.typecheck.config.clone(),
        },
        "typecheck",
        ctx.json,
        ctx.root(),
    );

    if !watch {
        supervisor.check()?;
        if !ctx.json {
            println!("✓ No type errors");
        }
        return Ok(());
    }

    let interrupt = interrupt_channel()?;
    let mut session = Session::default();
    if let Some(job) = supervisor.start()? {
        session.track(job);
    }

    if !ctx.json {
        println!("\n👀 Watching for type errors... (Press Ctrl+C to stop)");
    }

    supervise(&mut session, &interrupt, ctx, "typecheck");

    if !ctx.json {
        println!("\n👋 Stopped type-checking");
    }
    Ok(())
}
