//! Enumerations and field types for tasks.
//!
//! This module defines the structured values a task carries (status, priority,
//! task type) and the table columns that searches can be narrowed to.

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// Task status. Each status owns exactly one tab/partition.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Status {
    #[default]
    #[serde(alias = "open")]
    Open,
    #[serde(alias = "pending")]
    Pending,
    #[serde(rename = "In Progress", alias = "InProgress", alias = "in-progress")]
    InProgress,
    #[serde(alias = "completed")]
    Completed,
}

impl Status {
    /// All statuses in tab order.
    pub const ALL: [Status; 4] = [Status::Open, Status::Pending, Status::InProgress, Status::Completed];

    /// Tab label, as shown in the UI and used for export file names.
    pub fn label(self) -> &'static str {
        match self {
            Status::Open => "Open",
            Status::Pending => "Pending",
            Status::InProgress => "In Progress",
            Status::Completed => "Completed",
        }
    }

    /// Position of this status in [`Status::ALL`].
    pub fn index(self) -> usize {
        match self {
            Status::Open => 0,
            Status::Pending => 1,
            Status::InProgress => 2,
            Status::Completed => 3,
        }
    }

    /// Parse a status label. Blank input resolves to `Open`.
    pub fn parse_label(s: &str) -> Option<Status> {
        let s = s.trim();
        if s.is_empty() {
            return Some(Status::Open);
        }
        match s.to_lowercase().replace(['-', '_'], " ").as_str() {
            "open" => Some(Status::Open),
            "pending" => Some(Status::Pending),
            "in progress" | "inprogress" => Some(Status::InProgress),
            "completed" => Some(Status::Completed),
            _ => None,
        }
    }
}

/// Priority classification for task importance.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ValueEnum, PartialEq, Eq, Default)]
pub enum Priority {
    #[serde(alias = "low")]
    Low,
    #[default]
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "high")]
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn label(self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

/// Task types offered by the creation form.
///
/// Stored tasks keep their type as free text, so seed data may carry other
/// values (e.g. `Task`); only the form restricts input to this set.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum TaskType {
    Bug,
    Feature,
    Improvement,
}

impl TaskType {
    pub const ALL: [TaskType; 3] = [TaskType::Bug, TaskType::Feature, TaskType::Improvement];

    pub fn label(self) -> &'static str {
        match self {
            TaskType::Bug => "Bug",
            TaskType::Feature => "Feature",
            TaskType::Improvement => "Improvement",
        }
    }

    /// Exact, case-sensitive match against the form options.
    pub fn parse_label(s: &str) -> Option<TaskType> {
        TaskType::ALL.into_iter().find(|t| t.label() == s.trim())
    }
}

/// Column a search can be narrowed to. `All` searches every column.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq, Default)]
pub enum Column {
    #[default]
    All,
    Id,
    Priority,
    CreatedBy,
    Type,
    SubType,
    Name,
}

impl Column {
    /// Selector cycle order, `All` first.
    pub const CYCLE: [Column; 7] = [
        Column::All,
        Column::Id,
        Column::Priority,
        Column::CreatedBy,
        Column::Type,
        Column::SubType,
        Column::Name,
    ];

    /// Header text for this column. `All` has no header of its own.
    pub fn label(self) -> &'static str {
        match self {
            Column::All => "All",
            Column::Id => "Task Id",
            Column::Priority => "Priority",
            Column::CreatedBy => "Created By",
            Column::Type => "Type",
            Column::SubType => "Sub Type",
            Column::Name => "Task Name",
        }
    }

    /// Resolve a field name as the UI layer names it (`createdBy`, `subType`, ...).
    /// `"all"` and the empty string are the "no column" sentinel.
    pub fn from_field_name(s: &str) -> Option<Column> {
        match s.trim() {
            "" | "all" => Some(Column::All),
            "id" => Some(Column::Id),
            "priority" => Some(Column::Priority),
            "createdBy" => Some(Column::CreatedBy),
            "type" => Some(Column::Type),
            "subType" => Some(Column::SubType),
            "name" => Some(Column::Name),
            _ => None,
        }
    }

    pub fn next(self) -> Column {
        let idx = Column::CYCLE.iter().position(|&c| c == self).unwrap_or(0);
        Column::CYCLE[(idx + 1) % Column::CYCLE.len()]
    }

    pub fn prev(self) -> Column {
        let idx = Column::CYCLE.iter().position(|&c| c == self).unwrap_or(0);
        Column::CYCLE[(idx + Column::CYCLE.len() - 1) % Column::CYCLE.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_labels_round_trip() {
        for s in Status::ALL {
            assert_eq!(Status::parse_label(s.label()), Some(s));
            assert_eq!(Status::ALL[s.index()], s);
        }
        assert_eq!(Status::parse_label("   "), Some(Status::Open));
        assert_eq!(Status::parse_label("in-progress"), Some(Status::InProgress));
        assert_eq!(Status::parse_label("Archived"), None);
    }

    #[test]
    fn test_status_serde_uses_tab_labels() {
        let json = serde_json::to_string(&Status::InProgress).unwrap();
        assert_eq!(json, "\"In Progress\"");
        let parsed: Status = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(parsed, Status::InProgress);
    }

    #[test]
    fn test_task_type_is_a_fixed_set() {
        assert_eq!(TaskType::parse_label("Bug"), Some(TaskType::Bug));
        assert_eq!(TaskType::parse_label("Task"), None);
        assert_eq!(TaskType::parse_label(""), None);
    }

    #[test]
    fn test_column_cycle_wraps() {
        assert_eq!(Column::All.prev(), Column::Name);
        assert_eq!(Column::Name.next(), Column::All);
        assert_eq!(Column::from_field_name("createdBy"), Some(Column::CreatedBy));
        assert_eq!(Column::from_field_name("all"), Some(Column::All));
        assert_eq!(Column::from_field_name("assignee"), None);
    }
}
