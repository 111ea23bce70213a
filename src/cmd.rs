//! Command implementations for the CLI interface.
//!
//! Each handler works on a store built from the seed at startup. Nothing is
//! written back, so `add` only affects the run it is part of.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use clap::{Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use tracing::info;

use crate::config::Config;
use crate::fields::{Column, Priority, Status, TaskType};
use crate::form::{FormInput, FormSettings, ValidationErrors};
use crate::query::CSV_HEADERS;
use crate::store::{StoreError, TaskStore};
use crate::task::{Task, TaskIdGenerator};
use crate::tui::{app::App, run::run_tui};
use crate::view::{CsvExport, TaskView};

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive UI (default).
    Ui,

    /// List the tasks of one tab.
    List {
        /// Tab to list.
        #[arg(long, value_enum, default_value_t = Status::Open)]
        status: Status,
        /// Case-insensitive search text.
        #[arg(long, short)]
        search: Option<String>,
        /// Narrow the search to one column (`createdBy` and `created-by` both work).
        #[arg(long, value_parser = parse_column, default_value = "all")]
        column: Column,
    },

    /// Show the number of tasks in every tab.
    Counts,

    /// Export the (filtered) tasks of one tab to `<Tab>_Tasks.csv`.
    Export {
        /// Tab to export.
        #[arg(long, value_enum, default_value_t = Status::Open)]
        status: Status,
        /// Case-insensitive search text.
        #[arg(long, short)]
        search: Option<String>,
        /// Narrow the search to one column (`createdBy` and `created-by` both work).
        #[arg(long, value_parser = parse_column, default_value = "all")]
        column: Column,
        /// Output file. Defaults to `<Tab>_Tasks.csv` in the export directory.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Validate a task as the creation form would and add it.
    Add {
        /// Guest name.
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        /// Agent the task is assigned to.
        #[arg(long)]
        assigned_to: String,
        /// Task name.
        #[arg(long)]
        task_name: String,
        #[arg(long = "type", value_enum)]
        task_type: TaskType,
        /// Task details.
        #[arg(long)]
        details: String,
        #[arg(long, value_enum)]
        priority: Option<Priority>,
        #[arg(long, value_enum, default_value_t = Status::Open)]
        status: Status,
        /// Engagement; becomes the task's sub type.
        #[arg(long, default_value = "")]
        engagement: String,
        /// YYYY-MM-DD
        #[arg(long, default_value = "")]
        start_date: String,
        /// YYYY-MM-DD
        #[arg(long, default_value = "")]
        end_date: String,
        #[arg(long, default_value = "")]
        remarks: String,
    },

    /// Generate shell completion scripts.
    Completions {
        /// The shell to generate completions for.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Accept a column by its field name (`createdBy`) or its CLI name (`created-by`).
fn parse_column(s: &str) -> Result<Column, String> {
    Column::from_field_name(s)
        .or_else(|| Column::from_str(s, true).ok())
        .ok_or_else(|| format!("unknown column '{s}'"))
}

/// Why `add` did not store a task.
#[derive(Debug, thiserror::Error)]
pub enum AddError {
    #[error("{0}")]
    Invalid(#[from] ValidationErrors),
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn view_for(status: Status, search: Option<String>, column: Column) -> TaskView {
    let mut view = TaskView::new();
    view.select_tab(status);
    view.set_query(search.unwrap_or_default());
    view.set_column(column);
    view
}

/// Launch the terminal UI.
pub fn cmd_ui(store: TaskStore, config: &Config) {
    let app = App::new(store, config);
    if let Err(e) = run_tui(app) {
        eprintln!("UI error: {e}");
        std::process::exit(1);
    }
}

/// Print tasks as an aligned table.
pub fn print_table(tasks: &[&Task]) {
    println!(
        "{:<16} {:<8} {:<16} {:<12} {:<12} {}",
        CSV_HEADERS[0], CSV_HEADERS[1], CSV_HEADERS[2], CSV_HEADERS[3], CSV_HEADERS[4], CSV_HEADERS[5]
    );
    for t in tasks {
        println!(
            "{:<16} {:<8} {:<16} {:<12} {:<12} {}",
            t.id,
            t.priority.label(),
            t.created_by,
            t.task_type,
            t.sub_type,
            t.name
        );
    }
    println!("Total Records: {}", tasks.len());
}

/// List one tab, filtered by the optional search.
pub fn cmd_list(store: &TaskStore, status: Status, search: Option<String>, column: Column) {
    let view = view_for(status, search, column);
    let tasks = view.visible(store);
    if tasks.is_empty() {
        println!("No record found to display.");
        return;
    }
    print_table(&tasks);
}

/// Print per-tab counts.
pub fn cmd_counts(store: &TaskStore) {
    let counts = store.counts();
    for status in Status::ALL {
        println!("{:<12} {}", status.label(), counts.get(status));
    }
    println!("{:<12} {}", "Total", counts.total());
}

/// Write an export to `output`, or into `export_dir` under its default name.
/// Returns the written path.
pub fn write_export(export: &CsvExport, output: Option<&Path>, export_dir: &Path) -> io::Result<PathBuf> {
    let path = match output {
        Some(p) => p.to_path_buf(),
        None => export_dir.join(&export.file_name),
    };
    fs::write(&path, export.contents.as_bytes())?;
    info!(path = %path.display(), rows = export.rows, "csv exported");
    Ok(path)
}

/// Export one tab (after filtering) to CSV.
pub fn cmd_export(
    store: &TaskStore,
    config: &Config,
    status: Status,
    search: Option<String>,
    column: Column,
    output: Option<PathBuf>,
) {
    let view = view_for(status, search, column);
    let Some(export) = view.export(store) else {
        println!("Nothing to export: no {} tasks match.", status.label());
        return;
    };
    match write_export(&export, output.as_deref(), &config.export_dir()) {
        Ok(path) => println!("Exported {} task(s) to {}", export.rows, path.display()),
        Err(e) => {
            eprintln!("Failed to write CSV file: {e}");
            std::process::exit(1);
        }
    }
}

/// Validate a submission and insert the resulting task. Returns its id.
pub fn add_task(
    store: &mut TaskStore,
    settings: &FormSettings,
    ids: &mut TaskIdGenerator,
    input: &FormInput,
) -> Result<String, AddError> {
    let task = input.submit(settings, ids)?;
    let id = task.id.clone();
    store.insert(task)?;
    Ok(id)
}

/// Add a task and print its tab. Rejections are reported, not fatal.
pub fn cmd_add(store: &mut TaskStore, config: &Config, input: FormInput) {
    let mut ids = TaskIdGenerator::new();
    match add_task(store, &config.form_settings(), &mut ids, &input) {
        Ok(id) => {
            let status = Status::parse_label(&input.status).unwrap_or_default();
            println!("Task created successfully: {id} ({})", status.label());
            let tasks: Vec<&Task> = store.active_partition(status).iter().collect();
            print_table(&tasks);
        }
        Err(AddError::Invalid(errs)) => {
            println!("Task not created:");
            for (field, msg) in errs.iter() {
                println!("  {field}: {msg}");
            }
        }
        Err(AddError::Store(e)) => println!("Task not created: {e}"),
    }
}

/// Generate shell completion scripts.
pub fn cmd_completions(shell: Shell) {
    use crate::cli::Cli;
    use clap::CommandFactory;

    let mut app = Cli::command();
    let app_name = app.get_name().to_string();
    generate(shell, &mut app, app_name, &mut io::stdout());
}
