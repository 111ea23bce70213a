//! Task creation form contract.
//!
//! `FormInput` is the raw record a form collector submits (the TUI form or the
//! `add` subcommand). Validation reports every failing field at once; a valid
//! submission becomes a [`Task`] with the documented defaults applied.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use tracing::debug;

use crate::fields::{Priority, Status, TaskType};
use crate::task::{Task, TaskIdGenerator, NO_SUB_TYPE};

/// Raw values entered into the creation form. Blank means "not provided".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormInput {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub assigned_to: String,
    pub task_name: String,
    pub task_type: String,
    pub details: String,
    pub priority: Option<Priority>,
    pub status: String,
    pub engagement: String,
    pub start_date: String,
    pub end_date: String,
    pub remarks: String,
}

/// Form fields that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    Name,
    Email,
    Phone,
    AssignedTo,
    TaskName,
    TaskType,
    Details,
    Status,
    StartDate,
    EndDate,
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FormField::Name => "name",
            FormField::Email => "email",
            FormField::Phone => "phone",
            FormField::AssignedTo => "assigned to",
            FormField::TaskName => "task name",
            FormField::TaskType => "task type",
            FormField::Details => "task details",
            FormField::Status => "status",
            FormField::StartDate => "start date",
            FormField::EndDate => "end date",
        };
        f.write_str(s)
    }
}

/// Per-field validation messages. Never empty when returned as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<FormField, String>,
}

impl ValidationErrors {
    fn add(&mut self, field: FormField, msg: &str) {
        self.errors.entry(field).or_insert_with(|| msg.to_string());
    }

    pub fn get(&self, field: FormField) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|(field, msg)| format!("{field}: {msg}")).collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Values the form does not ask the user for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSettings {
    /// Identity recorded as `created_by` on every new task.
    pub created_by: String,
    /// Agents a task can be assigned to.
    pub agents: Vec<String>,
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

fn phone_pattern() -> &'static Regex {
    static PHONE: OnceLock<Regex> = OnceLock::new();
    PHONE.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern is valid"))
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

impl FormInput {
    /// Check every field. Email and phone are alternatives: at least one is
    /// required, and whichever is filled in must be well formed.
    pub fn validate(&self, settings: &FormSettings) -> Result<(), ValidationErrors> {
        let mut errs = ValidationErrors::default();
        let email = self.email.trim();
        let phone = self.phone.trim();

        if self.name.trim().is_empty() {
            errs.add(FormField::Name, "Name is required");
        }

        if email.is_empty() && phone.is_empty() {
            errs.add(FormField::Email, "Email is required");
            errs.add(FormField::Phone, "Phone is required");
        }
        if !email.is_empty() && !email_pattern().is_match(email) {
            errs.add(FormField::Email, "Invalid email format");
        }
        if !phone.is_empty() && !phone_pattern().is_match(phone) {
            errs.add(FormField::Phone, "Invalid phone number");
        }

        let agent = self.assigned_to.trim();
        if agent.is_empty() || !settings.agents.iter().any(|a| a == agent) {
            errs.add(FormField::AssignedTo, "Please select an agent");
        }

        if self.task_name.trim().is_empty() {
            errs.add(FormField::TaskName, "Task name is required");
        }

        if self.task_type.trim().is_empty() {
            errs.add(FormField::TaskType, "Task type is required");
        } else if TaskType::parse_label(&self.task_type).is_none() {
            errs.add(FormField::TaskType, "Task type must be Bug, Feature or Improvement");
        }

        if self.details.trim().is_empty() {
            errs.add(FormField::Details, "Task details are required");
        }

        if Status::parse_label(&self.status).is_none() {
            errs.add(FormField::Status, "Unknown status");
        }

        for (field, value) in [(FormField::StartDate, &self.start_date), (FormField::EndDate, &self.end_date)] {
            let value = value.trim();
            if !value.is_empty() && parse_date(value).is_none() {
                errs.add(field, "Invalid date (use YYYY-MM-DD)");
            }
        }

        if errs.is_empty() {
            Ok(())
        } else {
            debug!(errors = %errs, "form rejected");
            Err(errs)
        }
    }

    /// Validate and turn the submission into a new task with a fresh id.
    pub fn submit(&self, settings: &FormSettings, ids: &mut TaskIdGenerator) -> Result<Task, ValidationErrors> {
        self.validate(settings)?;

        let engagement = self.engagement.trim();
        debug!(
            guest = self.name.trim(),
            assigned_to = self.assigned_to.trim(),
            start = self.start_date.trim(),
            end = self.end_date.trim(),
            has_remarks = !self.remarks.trim().is_empty(),
            "form accepted"
        );
        Ok(Task {
            id: ids.next_id(),
            priority: self.priority.unwrap_or_default(),
            created_by: settings.created_by.clone(),
            task_type: self.task_type.trim().to_string(),
            sub_type: if engagement.is_empty() { NO_SUB_TYPE.to_string() } else { engagement.to_string() },
            name: self.task_name.trim().to_string(),
            status: Status::parse_label(&self.status).unwrap_or_default(),
        })
    }
}
