//! Active tab selection and search state.
//!
//! `TaskView` is the selector the table is drawn from: which status tab is
//! active (Open on start, changed only by explicit selection), the free-text
//! search, and the column the search is narrowed to.

use crate::fields::{Column, Status};
use crate::query::{export_file_name, filter, to_csv};
use crate::store::TaskStore;
use crate::task::Task;

/// A CSV export ready to be written by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    pub file_name: String,
    pub contents: String,
    pub rows: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskView {
    active: Status,
    query: String,
    column: Column,
}

impl TaskView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_tab(&self) -> Status {
        self.active
    }

    pub fn select_tab(&mut self, status: Status) {
        self.active = status;
    }

    /// Select the tab to the right, wrapping around.
    pub fn next_tab(&mut self) {
        self.active = Status::ALL[(self.active.index() + 1) % Status::ALL.len()];
    }

    /// Select the tab to the left, wrapping around.
    pub fn prev_tab(&mut self) {
        self.active = Status::ALL[(self.active.index() + Status::ALL.len() - 1) % Status::ALL.len()];
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn column(&self) -> Column {
        self.column
    }

    pub fn set_column(&mut self, column: Column) {
        self.column = column;
    }

    /// Rows of the active tab that pass the current search.
    pub fn visible<'a>(&self, store: &'a TaskStore) -> Vec<&'a Task> {
        filter(store.active_partition(self.active), &self.query, Some(self.column))
    }

    /// CSV of the visible rows, or `None` when there are none.
    pub fn export(&self, store: &TaskStore) -> Option<CsvExport> {
        let rows = self.visible(store);
        let count = rows.len();
        to_csv(rows).map(|contents| CsvExport {
            file_name: export_file_name(self.active),
            contents,
            rows: count,
        })
    }
}
