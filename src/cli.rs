// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wocker")]
#[command(about = "Back up and restore Docker or Podman images and volumes")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print final results
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Configuration file (defaults to ./wocker.yml, or $WOCKER_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Back up or restore images (archives named after repository, tag and ID)
    Image(ArchiveArgs),

    /// Back up or restore named volumes
    Volume(ArchiveArgs),

    /// Print program version
    Version {
        /// Only print the version number
        #[arg(long)]
        only: bool,
    },

    /// Create a wocker.yml configuration file in the current directory
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("action").args(["list", "save", "load"])))]
pub struct ArchiveArgs {
    /// List what the engine has
    #[arg(short, long)]
    pub list: bool,

    /// Save the named entries ("all" for everything) to archive files
    #[arg(short, long)]
    pub save: bool,

    /// Load the given archive files
    #[arg(short = 'L', long)]
    pub load: bool,

    /// Directory archives are saved into
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Keep saving after a failed item
    #[arg(short, long)]
    pub keep_going: bool,

    /// Names, references or IDs to save; archive files to load
    #[arg(value_name = "ARGS")]
    pub args: Vec<String>,
}
