//! plank: composes bundler build plans for multi-application workspaces.

mod commands;
mod logging;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "plank", version, about = "Compose bundler build plans")]
struct Cli {
    /// Workspace root holding the applications/ directory
    #[arg(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Increase log verbosity (-v, -vv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compose a build plan and print it as JSON
    Plan {
        /// Application to build (falls back to PLANK_APP)
        #[arg(long)]
        app: Option<String>,

        /// Build mode: development or production (falls back to PLANK_MODE)
        #[arg(long)]
        mode: Option<String>,
    },
    /// List applications that carry an override declaration
    Apps,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match cli.command {
        Command::Plan { app, mode } => commands::plan(&cli.root, app, mode),
        Command::Apps => commands::apps(&cli.root),
    }
}
