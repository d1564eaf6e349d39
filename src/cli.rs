use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "devcache",
    about = "Find and remove developer tool caches",
    version
)]
pub struct Cli {
    /// Treat this directory as the home directory and the filesystem root; the
    /// applications directory and Homebrew roots are looked up beneath it too
    #[arg(long, global = true)]
    pub home: Option<PathBuf>,

    /// Increase log verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// List every supported target and whether it applies on this machine
    List,

    /// Check whether a single target can be cleaned
    Check {
        /// Target id (see `devcache list`)
        id: String,
    },

    /// Re-run availability checks and show why targets are unavailable
    Refresh,

    /// Remove caches for the given targets
    Clean {
        /// Target ids to clean
        #[arg(required_unless_present = "all")]
        ids: Vec<String>,

        /// Clean every target
        #[arg(long, conflicts_with = "ids")]
        all: bool,

        /// Show what would be removed without deleting anything
        #[arg(long)]
        dry_run: bool,

        /// Clean targets concurrently
        #[arg(long)]
        parallel: bool,
    },
}
