use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::cmd::Commands;

/// Tabbed task tracker for the terminal.
/// Settings and logs live in ~/.tt or a directory passed via --dir.
#[derive(Parser)]
#[command(name = "tt", version, about = "Tabbed task tracker with search, CSV export and a creation form")]
pub struct Cli {
    /// Data directory holding config.json and the UI log.
    #[arg(long, global = true)]
    pub dir: Option<PathBuf>,

    /// Config file. Defaults to <dir>/config.json.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Seed file with the initial tasks, keyed by tab label.
    #[arg(long, global = true)]
    pub seed: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
