//! Search filtering and CSV serialisation over a single tab's tasks.
//!
//! Both operations are pure: they never touch the store or the filesystem.

use tracing::trace;

use crate::fields::{Column, Status};
use crate::task::Task;

/// Header row of the CSV export, in table column order.
pub const CSV_HEADERS: [&str; 6] = ["Task Id", "Priority", "Created By", "Type", "Sub Type", "Task Name"];

/// Value of one column of a task. `Column::All` has no single value.
fn column_value(task: &Task, column: Column) -> Option<&str> {
    match column {
        Column::All => None,
        Column::Id => Some(&task.id),
        Column::Priority => Some(task.priority.label()),
        Column::CreatedBy => Some(&task.created_by),
        Column::Type => Some(&task.task_type),
        Column::SubType => Some(&task.sub_type),
        Column::Name => Some(&task.name),
    }
}

/// Case-insensitive substring match of `needle` (already lowercased) against one task.
pub fn matches(task: &Task, needle: &str, column: Column) -> bool {
    match column {
        Column::All => task.field_values().iter().any(|v| v.to_lowercase().contains(needle)),
        col => column_value(task, col).is_some_and(|v| v.to_lowercase().contains(needle)),
    }
}

/// Filter tasks by a free-text query, optionally narrowed to one column.
///
/// A blank query keeps every task. Relative order is preserved.
pub fn filter<'a>(tasks: &'a [Task], query: &str, column: Option<Column>) -> Vec<&'a Task> {
    if query.trim().is_empty() {
        return tasks.iter().collect();
    }
    let needle = query.to_lowercase();
    let column = column.unwrap_or_default();
    let out: Vec<&Task> = tasks.iter().filter(|t| matches(t, &needle, column)).collect();
    trace!(query, ?column, kept = out.len(), of = tasks.len(), "filter applied");
    out
}

/// Quote a field when it contains a delimiter, quote or line break.
/// Embedded quotes are doubled.
fn escape_csv(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Serialise tasks as CSV: header row, then one row per task, `\n` separated.
///
/// Returns `None` when there is nothing to export.
pub fn to_csv<'a, I>(tasks: I) -> Option<String>
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut tasks = tasks.into_iter().peekable();
    tasks.peek()?;

    let mut csv_content = CSV_HEADERS.join(",");
    for task in tasks {
        csv_content.push('\n');
        let row: Vec<String> = task.field_values().iter().map(|v| escape_csv(v)).collect();
        csv_content.push_str(&row.join(","));
    }
    Some(csv_content)
}

/// File name used when exporting a tab, e.g. `In Progress_Tasks.csv`.
pub fn export_file_name(status: Status) -> String {
    format!("{}_Tasks.csv", status.label())
}
