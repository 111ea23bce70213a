//! Enumerations for TUI state management.

/// Which screen has keyboard focus.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AppState {
    TaskList,
    CreateTask,
    Help,
}

/// Whether keystrokes on the task list go to the search box.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputMode {
    None,
    Search,
}
