//! Task data structure and id generation.
//!
//! This module defines the fixed-shape `Task` record shown in every tab, and
//! the generator that hands out `"T" + timestamp` ids for newly created tasks.

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::fields::{Priority, Status};

/// Placeholder shown when a task has no sub type.
pub const NO_SUB_TYPE: &str = "-";

fn default_sub_type() -> String {
    NO_SUB_TYPE.to_string()
}

/// A single unit of work. Tasks are never edited once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub priority: Priority,
    pub created_by: String,
    #[serde(rename = "type")]
    pub task_type: String,
    #[serde(default = "default_sub_type")]
    pub sub_type: String,
    pub name: String,
    #[serde(default)]
    pub status: Status,
}

impl Task {
    /// Field values in table column order.
    pub fn field_values(&self) -> [&str; 6] {
        [
            &self.id,
            self.priority.label(),
            &self.created_by,
            &self.task_type,
            &self.sub_type,
            &self.name,
        ]
    }
}

/// Hands out `T<millis>` ids. Ids are strictly increasing even when several
/// are requested within the same millisecond.
#[derive(Debug, Default)]
pub struct TaskIdGenerator {
    last: i64,
}

impl TaskIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Next id based on the current wall clock.
    pub fn next_id(&mut self) -> String {
        self.next_at(Utc::now().timestamp_millis())
    }

    /// Next id for a given clock reading in milliseconds.
    pub fn next_at(&mut self, now_millis: i64) -> String {
        let value = now_millis.max(self.last + 1);
        self.last = value;
        format!("T{value}")
    }
}
