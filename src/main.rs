// ABOUTME: Entry point for the wocker CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use std::env;
use tracing_subscriber::EnvFilter;
use wocker::config::{self, Config};
use wocker::error::Result;
use wocker::output::{Output, OutputMode};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // --verbose wins; otherwise RUST_LOG, falling back to warnings only
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let mut output = Output::new(mode);

    if let Err(e) = run(cli, &mut output).await {
        output.error(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &mut Output) -> Result<()> {
    match cli.command {
        Commands::Image(args) => {
            let config = load_config(cli.config.as_deref())?;
            commands::image(args, config, output).await
        }
        Commands::Volume(args) => {
            let config = load_config(cli.config.as_deref())?;
            commands::volume(args, config, output).await
        }
        Commands::Version { only } => {
            commands::version(only, output);
            Ok(())
        }
        Commands::Init { force } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, force)?;
            output.success(&format!("Created {}", config::CONFIG_FILENAME));
            Ok(())
        }
    }
}

fn load_config(explicit: Option<&std::path::Path>) -> Result<Config> {
    let cwd = env::current_dir()?;
    Config::resolve(&cwd, explicit)
}
