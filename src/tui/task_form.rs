//! Task creation form state for the terminal user interface.
//!
//! `TaskForm` holds what the user has typed or selected so far, tracks the
//! focused field and keeps the last validation messages for inline display.
//! Submitting converts it into a [`FormInput`].

use crate::{
    fields::{Priority, Status, TaskType},
    form::{FormField, FormInput, FormSettings, ValidationErrors},
    tui::input::InputField,
};

/// Global order constants for form fields, in visual order.
pub const NAME_GLOBAL_ORDER: usize = 0;
pub const EMAIL_GLOBAL_ORDER: usize = 1;
pub const PHONE_GLOBAL_ORDER: usize = 2;
pub const ASSIGNED_TO_GLOBAL_ORDER: usize = 3;
pub const TASK_NAME_GLOBAL_ORDER: usize = 4;
pub const TASK_TYPE_GLOBAL_ORDER: usize = 5;
pub const DETAILS_GLOBAL_ORDER: usize = 6;
pub const PRIORITY_GLOBAL_ORDER: usize = 7;
pub const STATUS_GLOBAL_ORDER: usize = 8;
pub const ENGAGEMENT_GLOBAL_ORDER: usize = 9;
pub const START_DATE_GLOBAL_ORDER: usize = 10;
pub const END_DATE_GLOBAL_ORDER: usize = 11;
pub const REMARKS_GLOBAL_ORDER: usize = 12;

const FIELD_COUNT: usize = 13;

/// Step a selector index left or right, wrapping.
fn cycle(idx: usize, len: usize, right: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if right {
        (idx + 1) % len
    } else if idx == 0 {
        len - 1
    } else {
        idx - 1
    }
}

/// "Create Task" form
pub struct TaskForm {
    pub name: InputField,
    pub email: InputField,
    pub phone: InputField,
    pub task_name: InputField,
    pub details: InputField,
    pub engagement: InputField,
    pub start_date: InputField,
    pub end_date: InputField,
    pub remarks: InputField,
    /// Index into `agents` plus one; 0 is "Select Agent".
    pub assigned_to: usize,
    /// Index into `TaskType::ALL` plus one; 0 is "Select Type".
    pub task_type: usize,
    pub priority: usize,
    pub status: usize,
    pub current_field: usize,
    pub agents: Vec<String>,
    pub created_by: String,
    pub errors: ValidationErrors,
}

impl TaskForm {
    /// Empty form: Medium priority, Open status, nothing selected.
    pub fn new(settings: &FormSettings) -> Self {
        let mut form = Self {
            name: InputField::new(),
            email: InputField::new(),
            phone: InputField::new(),
            task_name: InputField::new(),
            details: InputField::new(),
            engagement: InputField::new(),
            start_date: InputField::new(),
            end_date: InputField::new(),
            remarks: InputField::new(),
            assigned_to: 0,
            task_type: 0,
            priority: Priority::ALL.iter().position(|&p| p == Priority::Medium).unwrap_or(0),
            status: Status::Open.index(),
            current_field: NAME_GLOBAL_ORDER,
            agents: settings.agents.clone(),
            created_by: settings.created_by.clone(),
            errors: ValidationErrors::default(),
        };
        form.update_active_field();
        form
    }

    /// Text input behind a field position, `None` for selectors.
    pub fn text_field(&self, order: usize) -> Option<&InputField> {
        match order {
            NAME_GLOBAL_ORDER => Some(&self.name),
            EMAIL_GLOBAL_ORDER => Some(&self.email),
            PHONE_GLOBAL_ORDER => Some(&self.phone),
            TASK_NAME_GLOBAL_ORDER => Some(&self.task_name),
            DETAILS_GLOBAL_ORDER => Some(&self.details),
            ENGAGEMENT_GLOBAL_ORDER => Some(&self.engagement),
            START_DATE_GLOBAL_ORDER => Some(&self.start_date),
            END_DATE_GLOBAL_ORDER => Some(&self.end_date),
            REMARKS_GLOBAL_ORDER => Some(&self.remarks),
            _ => None,
        }
    }

    fn text_field_mut(&mut self, order: usize) -> Option<&mut InputField> {
        match order {
            NAME_GLOBAL_ORDER => Some(&mut self.name),
            EMAIL_GLOBAL_ORDER => Some(&mut self.email),
            PHONE_GLOBAL_ORDER => Some(&mut self.phone),
            TASK_NAME_GLOBAL_ORDER => Some(&mut self.task_name),
            DETAILS_GLOBAL_ORDER => Some(&mut self.details),
            ENGAGEMENT_GLOBAL_ORDER => Some(&mut self.engagement),
            START_DATE_GLOBAL_ORDER => Some(&mut self.start_date),
            END_DATE_GLOBAL_ORDER => Some(&mut self.end_date),
            REMARKS_GLOBAL_ORDER => Some(&mut self.remarks),
            _ => None,
        }
    }

    /// Move to the next field in the form.
    pub fn next_field(&mut self) {
        self.current_field = (self.current_field + 1) % FIELD_COUNT;
        self.update_active_field();
    }

    /// Move to the previous field in the form.
    pub fn prev_field(&mut self) {
        self.current_field = cycle(self.current_field, FIELD_COUNT, false);
        self.update_active_field();
    }

    /// Mark only the focused text input as active.
    pub fn update_active_field(&mut self) {
        for order in 0..FIELD_COUNT {
            if let Some(field) = self.text_field_mut(order) {
                field.active = false;
            }
        }
        let current = self.current_field;
        if let Some(field) = self.text_field_mut(current) {
            field.active = true;
        }
    }

    /// Handle character input for the currently active field.
    pub fn handle_char(&mut self, c: char) {
        let current = self.current_field;
        if let Some(field) = self.text_field_mut(current) {
            field.handle_char(c);
        }
    }

    pub fn handle_backspace(&mut self) {
        let current = self.current_field;
        if let Some(field) = self.text_field_mut(current) {
            field.handle_backspace();
        }
    }

    pub fn handle_delete(&mut self) {
        let current = self.current_field;
        if let Some(field) = self.text_field_mut(current) {
            field.handle_delete();
        }
    }

    /// Left/right moves the cursor in text fields and changes selectors.
    pub fn handle_left_right(&mut self, right: bool) {
        match self.current_field {
            ASSIGNED_TO_GLOBAL_ORDER => self.assigned_to = cycle(self.assigned_to, self.agents.len() + 1, right),
            TASK_TYPE_GLOBAL_ORDER => self.task_type = cycle(self.task_type, TaskType::ALL.len() + 1, right),
            PRIORITY_GLOBAL_ORDER => self.priority = cycle(self.priority, Priority::ALL.len(), right),
            STATUS_GLOBAL_ORDER => self.status = cycle(self.status, Status::ALL.len(), right),
            current => {
                if let Some(field) = self.text_field_mut(current) {
                    if right {
                        field.move_cursor_right();
                    } else {
                        field.move_cursor_left();
                    }
                }
            }
        }
    }

    pub fn selected_agent(&self) -> Option<&str> {
        self.assigned_to.checked_sub(1).and_then(|i| self.agents.get(i)).map(String::as_str)
    }

    pub fn selected_task_type(&self) -> Option<TaskType> {
        self.task_type.checked_sub(1).and_then(|i| TaskType::ALL.get(i)).copied()
    }

    pub fn selected_priority(&self) -> Priority {
        Priority::ALL.get(self.priority).copied().unwrap_or_default()
    }

    pub fn selected_status(&self) -> Status {
        Status::ALL.get(self.status).copied().unwrap_or_default()
    }

    /// Snapshot of the form as a submission record.
    pub fn to_input(&self) -> FormInput {
        FormInput {
            name: self.name.value.clone(),
            email: self.email.value.clone(),
            phone: self.phone.value.clone(),
            assigned_to: self.selected_agent().unwrap_or_default().to_string(),
            task_name: self.task_name.value.clone(),
            task_type: self.selected_task_type().map(|t| t.label()).unwrap_or_default().to_string(),
            details: self.details.value.clone(),
            priority: Some(self.selected_priority()),
            status: self.selected_status().label().to_string(),
            engagement: self.engagement.value.clone(),
            start_date: self.start_date.value.clone(),
            end_date: self.end_date.value.clone(),
            remarks: self.remarks.value.clone(),
        }
    }

    /// Validation message for a field position, if any.
    pub fn error_for(&self, order: usize) -> Option<&str> {
        let field = match order {
            NAME_GLOBAL_ORDER => FormField::Name,
            EMAIL_GLOBAL_ORDER => FormField::Email,
            PHONE_GLOBAL_ORDER => FormField::Phone,
            ASSIGNED_TO_GLOBAL_ORDER => FormField::AssignedTo,
            TASK_NAME_GLOBAL_ORDER => FormField::TaskName,
            TASK_TYPE_GLOBAL_ORDER => FormField::TaskType,
            DETAILS_GLOBAL_ORDER => FormField::Details,
            STATUS_GLOBAL_ORDER => FormField::Status,
            START_DATE_GLOBAL_ORDER => FormField::StartDate,
            END_DATE_GLOBAL_ORDER => FormField::EndDate,
            _ => return None,
        };
        self.errors.get(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn settings() -> FormSettings {
        FormSettings {
            created_by: "Mohamed Rifthy".to_string(),
            agents: vec!["Agent A".to_string(), "Agent B".to_string()],
        }
    }

    fn type_text(form: &mut TaskForm, s: &str) {
        for c in s.chars() {
            form.handle_char(c);
        }
    }

    #[test]
    fn test_new_form_defaults() {
        let form = TaskForm::new(&settings());
        let input = form.to_input();
        assert_eq!(input.priority, Some(Priority::Medium));
        assert_eq!(input.status, "Open");
        assert_eq!(input.assigned_to, "");
        assert_eq!(input.task_type, "");
        assert!(form.name.active);
    }

    #[test]
    fn test_navigation_wraps_and_tracks_active_field() {
        let mut form = TaskForm::new(&settings());
        form.prev_field();
        assert_eq!(form.current_field, REMARKS_GLOBAL_ORDER);
        assert!(form.remarks.active);
        assert!(!form.name.active);
        form.next_field();
        assert_eq!(form.current_field, NAME_GLOBAL_ORDER);
    }

    #[test]
    fn test_typing_goes_to_focused_field_only() {
        let mut form = TaskForm::new(&settings());
        type_text(&mut form, "Jane");
        form.next_field();
        type_text(&mut form, "jane@example.com");
        form.current_field = ASSIGNED_TO_GLOBAL_ORDER;
        // selectors ignore characters
        type_text(&mut form, "xyz");

        let input = form.to_input();
        assert_eq!(input.name, "Jane");
        assert_eq!(input.email, "jane@example.com");
        assert_eq!(input.assigned_to, "");
    }

    #[test]
    fn test_selectors_cycle_through_none() {
        let mut form = TaskForm::new(&settings());
        form.current_field = TASK_TYPE_GLOBAL_ORDER;
        form.handle_left_right(true);
        assert_eq!(form.selected_task_type(), Some(TaskType::Bug));
        form.handle_left_right(false);
        form.handle_left_right(false);
        assert_eq!(form.selected_task_type(), Some(TaskType::Improvement));

        form.current_field = ASSIGNED_TO_GLOBAL_ORDER;
        form.handle_left_right(false);
        assert_eq!(form.selected_agent(), Some("Agent B"));
        form.handle_left_right(true);
        assert_eq!(form.selected_agent(), None);

        form.current_field = STATUS_GLOBAL_ORDER;
        form.handle_left_right(true);
        form.handle_left_right(true);
        assert_eq!(form.selected_status(), Status::InProgress);
    }

    #[test]
    fn test_errors_map_to_field_positions() {
        let mut form = TaskForm::new(&settings());
        form.errors = form.to_input().validate(&settings()).unwrap_err();
        assert_eq!(form.error_for(EMAIL_GLOBAL_ORDER), Some("Email is required"));
        assert_eq!(form.error_for(PHONE_GLOBAL_ORDER), Some("Phone is required"));
        assert_eq!(form.error_for(REMARKS_GLOBAL_ORDER), None);
        assert_eq!(form.error_for(PRIORITY_GLOBAL_ORDER), None);
    }
}
