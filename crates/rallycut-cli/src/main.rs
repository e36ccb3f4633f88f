use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod script;

use cli::{Cli, Command};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("rallycut=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Replay {
            script,
            format,
            convention,
            output,
            session,
        } => commands::replay::run(
            &script,
            format,
            convention.into(),
            output.as_deref(),
            session.as_deref(),
        ),
        Command::Timeline { segments, fps } => commands::timeline::run(&segments, fps),
        Command::Inspect { session } => commands::inspect::run(&session),
    }
}
