use std::path::PathBuf;

use clap::{Parser, Subcommand};
use frappe_build::domain::value_objects::{AssetMode, ModuleFormat};

/// frappe-build - bundle and watch TypeScript in Frappe apps
#[derive(Parser, Debug)]
#[command(name = "frappe-build")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// App root to scan (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub root: Option<PathBuf>,

    /// Output NDJSON events instead of human-readable text
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Overrides shared by `build` and `watch`
#[derive(clap::Args, Debug, Clone, Default)]
pub struct BuildArgs {
    /// Keep building remaining units after a failure
    #[arg(long)]
    pub keep_going: bool,

    /// Run the type-checker alongside the build
    #[arg(long)]
    pub typecheck: bool,

    /// How public/ts folders are compiled
    #[arg(long, value_enum)]
    pub assets_mode: Option<AssetMode>,

    /// Module format for doctype bundles
    #[arg(long, value_enum)]
    pub format: Option<ModuleFormat>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build every discovered unit once
    Build {
        #[command(flatten)]
        args: BuildArgs,
    },

    /// Start the compiler in watch mode for every unit (Ctrl+C to stop)
    Watch {
        #[command(flatten)]
        args: BuildArgs,
    },

    /// Run the TypeScript type-checker without emitting output
    Typecheck {
        /// Keep checking on every change
        #[arg(long)]
        watch: bool,
    },

    /// List discovered units without building
    List,
}
