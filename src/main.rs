//! frappe-build CLI - TypeScript build orchestration for Frappe apps
//!
//! Usage: frappe-build <COMMAND>
//!
//! Commands:
//!   build      Build every discovered unit once
//!   watch      Keep compilers running and rebuild on change
//!   typecheck  Run the TypeScript type-checker
//!   list       Show discovered units

mod cli;
mod commands;
mod ui;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use commands::Context;

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    // RUST_LOG wins over -v
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let ctx = Context::load(cli.root, cli.json)?;

    match cli.command {
        Commands::Build { args } => commands::build::cmd_build(&ctx.with_build_args(&args), &args),
        Commands::Watch { args } => commands::watch::cmd_watch(&ctx.with_build_args(&args), &args),
        Commands::Typecheck { watch } => commands::typecheck::cmd_typecheck(&ctx, watch),
        Commands::List => commands::list::cmd_list(&ctx),
    }
}
