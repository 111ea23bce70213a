//! # tt - Tabbed Task Tracker
//!
//! A terminal task tracker. Tasks are split into four tabs by status
//! (Open, Pending, In Progress, Completed), each showing its count.
//!
//! ## Key Features
//!
//! - **Tabbed Table**: one partition per status, with live counts
//! - **Search**: case-insensitive substring search, across all columns or one
//! - **CSV Export**: the visible rows of a tab to `<Tab>_Tasks.csv`
//! - **Create Task Form**: validated entry with inline error messages
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the UI
//! tt
//!
//! # List a tab from the command line
//! tt list --status in-progress --search fix
//!
//! # Export a tab
//! tt export --status open
//! ```
//!
//! Tasks are loaded from a seed file (`--seed` or `seed` in `~/.tt/config.json`),
//! or from built-in sample data. Nothing is written back.

use clap::Parser;
use tracing::{debug, error};

pub mod cli;
pub mod cmd;
pub mod config;
pub mod fields;
pub mod form;
pub mod logging;
pub mod query;
pub mod seed;
pub mod store;
pub mod task;
pub mod view;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod task_form;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use config::{resolve_data_dir, Config, CONFIG_FILE};
use form::FormInput;
use seed::{load_seed, sample_seed};
use store::TaskStore;

const LOG_FILE: &str = "tt.log";

fn main() {
    let cli = Cli::parse();
    let command = match cli.command.unwrap_or(Commands::Ui) {
        Commands::Completions { shell } => {
            cmd_completions(shell);
            return;
        }
        other => other,
    };

    let data_dir = match resolve_data_dir(cli.dir.as_deref()) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Failed to create data directory: {e}");
            std::process::exit(1);
        }
    };

    let log_file = data_dir.join(LOG_FILE);
    let log_target = matches!(command, Commands::Ui).then_some(log_file.as_path());
    if let Err(e) = logging::init_tracing(cli.verbose, log_target) {
        eprintln!("Failed to initialise logging: {e}");
        std::process::exit(1);
    }

    let config_path = cli.config.unwrap_or_else(|| data_dir.join(CONFIG_FILE));
    let config = match Config::load(&config_path) {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "config not loaded");
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let seed_path = cli.seed.or_else(|| config.seed.clone());
    let seed = match seed_path.as_deref().map(load_seed) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        None => {
            debug!("no seed file, using sample data");
            sample_seed()
        }
    };

    let mut store = match TaskStore::initialize(seed) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    debug!(dir = %data_dir.display(), total = store.counts().total(), "store ready");

    match command {
        Commands::Ui => cmd_ui(store, &config),
        Commands::List { status, search, column } => cmd_list(&store, status, search, column),
        Commands::Counts => cmd_counts(&store),
        Commands::Export { status, search, column, output } => {
            cmd_export(&store, &config, status, search, column, output)
        }
        Commands::Add {
            name,
            email,
            phone,
            assigned_to,
            task_name,
            task_type,
            details,
            priority,
            status,
            engagement,
            start_date,
            end_date,
            remarks,
        } => {
            let input = FormInput {
                name,
                email,
                phone,
                assigned_to,
                task_name,
                task_type: task_type.label().to_string(),
                details,
                priority,
                status: status.label().to_string(),
                engagement,
                start_date,
                end_date,
                remarks,
            };
            cmd_add(&mut store, &config, input)
        }
        Commands::Completions { shell } => cmd_completions(shell),
    }
}
