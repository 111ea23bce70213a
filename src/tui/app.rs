//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which owns the task store and the
//! tab/search view, handles key input, renders the tabbed table and the
//! "Create Task" form, and writes CSV exports.

use std::cell::Cell;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell as TableCell, Clear, Paragraph, Row, Table, TableState, Tabs, Wrap},
    Frame, Terminal,
};
use tracing::{info, warn};

use crate::{
    config::Config,
    fields::{Priority, Status, TaskType},
    form::FormSettings,
    query::CSV_HEADERS,
    store::TaskStore,
    task::{Task, TaskIdGenerator},
    tui::{
        colors::{priority_color, DARK_RED, GOLD, SLATE},
        enums::{AppState, InputMode},
        task_form::{
            TaskForm, ASSIGNED_TO_GLOBAL_ORDER, DETAILS_GLOBAL_ORDER, EMAIL_GLOBAL_ORDER,
            END_DATE_GLOBAL_ORDER, ENGAGEMENT_GLOBAL_ORDER, NAME_GLOBAL_ORDER, PHONE_GLOBAL_ORDER,
            PRIORITY_GLOBAL_ORDER, REMARKS_GLOBAL_ORDER, START_DATE_GLOBAL_ORDER, STATUS_GLOBAL_ORDER,
            TASK_NAME_GLOBAL_ORDER, TASK_TYPE_GLOBAL_ORDER,
        },
        utils::centered_rect,
    },
    view::TaskView,
};

/// Column of a text cursor `offset` chars into a bordered box, clamped to
/// the last inner cell.
fn cursor_x(area: Rect, offset: usize) -> u16 {
    let offset = u16::try_from(offset).unwrap_or(u16::MAX);
    area.x
        .saturating_add(1)
        .saturating_add(offset)
        .min(area.right().saturating_sub(2))
}

/// Main application state for the terminal user interface.
pub struct App {
    state: AppState,
    input_mode: InputMode,
    store: TaskStore,
    view: TaskView,
    /// Ids of the rows currently shown, in display order.
    visible_ids: Vec<String>,
    table_state: TableState,
    task_form: TaskForm,
    form_settings: FormSettings,
    ids: TaskIdGenerator,
    export_dir: PathBuf,
    status_message: String,
    store_changed: Rc<Cell<bool>>,
}

impl App {
    /// Create the app around an initialised store.
    pub fn new(mut store: TaskStore, config: &Config) -> Self {
        let store_changed = Rc::new(Cell::new(false));
        let flag = Rc::clone(&store_changed);
        store.subscribe(move |_| flag.set(true));

        let form_settings = config.form_settings();
        let mut app = App {
            state: AppState::TaskList,
            input_mode: InputMode::None,
            store,
            view: TaskView::new(),
            visible_ids: Vec::new(),
            table_state: TableState::default(),
            task_form: TaskForm::new(&form_settings),
            form_settings,
            ids: TaskIdGenerator::new(),
            export_dir: config.export_dir(),
            status_message: String::new(),
            store_changed,
        };
        app.store.load_partition(app.view.active_tab());
        app.update_visible_tasks();
        app
    }

    /// Recompute visible rows when the store reported a change.
    fn sync_with_store(&mut self) {
        if self.store_changed.replace(false) {
            self.update_visible_tasks();
        }
    }

    /// Apply the current tab and search to the store, keeping the selected
    /// row when it is still visible.
    fn update_visible_tasks(&mut self) {
        let old_selected_id = self
            .table_state
            .selected()
            .and_then(|idx| self.visible_ids.get(idx))
            .cloned();

        self.visible_ids = self.view.visible(&self.store).into_iter().map(|t| t.id.clone()).collect();

        let new_idx = old_selected_id
            .and_then(|id| self.visible_ids.iter().position(|v| *v == id))
            .or(if self.visible_ids.is_empty() { None } else { Some(0) });
        self.table_state.select(new_idx);
    }

    fn visible_tasks(&self) -> Vec<&Task> {
        let partition = self.store.active_partition(self.view.active_tab());
        self.visible_ids
            .iter()
            .filter_map(|id| partition.iter().find(|t| t.id == *id))
            .collect()
    }

    fn select_tab(&mut self, status: Status) {
        self.view.select_tab(status);
        self.store.load_partition(status);
        self.table_state.select(None);
        self.update_visible_tasks();
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    fn clear_status_message(&mut self) {
        self.status_message.clear();
    }

    fn open_create_form(&mut self) {
        self.task_form = TaskForm::new(&self.form_settings);
        self.state = AppState::CreateTask;
    }

    fn close_create_form(&mut self) {
        self.task_form = TaskForm::new(&self.form_settings);
        self.state = AppState::TaskList;
    }

    /// Validate the form and insert the new task.
    fn submit_form(&mut self) {
        let input = self.task_form.to_input();
        let task = match input.submit(&self.form_settings, &mut self.ids) {
            Ok(task) => task,
            Err(errs) => {
                self.set_status_message(format!("Please fix {} field(s)", errs.len()));
                self.task_form.errors = errs;
                return;
            }
        };
        let status = task.status;
        match self.store.insert(task) {
            Ok(()) => {
                self.close_create_form();
                self.set_status_message(format!("Task created successfully ({})", status.label()));
            }
            Err(e) => {
                warn!(error = %e, "task not created");
                self.set_status_message(format!("Task not created: {e}"));
            }
        }
    }

    /// Write the visible rows of the active tab to `<Tab>_Tasks.csv`.
    fn export_csv(&mut self) {
        let Some(export) = self.view.export(&self.store) else {
            self.set_status_message("Nothing to export".to_string());
            return;
        };
        let path = self.export_dir.join(&export.file_name);
        match fs::write(&path, export.contents.as_bytes()) {
            Ok(()) => {
                info!(path = %path.display(), rows = export.rows, "csv exported");
                self.set_status_message(format!("Exported {} task(s) to {}", export.rows, path.display()));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "csv export failed");
                self.set_status_message(format!("Failed to write CSV file: {e}"));
            }
        }
    }

    fn move_selection(&mut self, down: bool) {
        if self.visible_ids.is_empty() {
            self.table_state.select(None);
            return;
        }
        let last = self.visible_ids.len() - 1;
        let next = match self.table_state.selected() {
            Some(i) if down => (i + 1).min(last),
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.table_state.select(Some(next));
    }

    /// Handle keyboard input when in the task list view.
    ///
    /// Returns true if the application should quit.
    fn handle_task_list_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if self.input_mode == InputMode::Search {
            match key {
                KeyCode::Esc => {
                    self.input_mode = InputMode::None;
                    self.view.set_query("");
                    self.update_visible_tasks();
                }
                KeyCode::Enter => {
                    self.input_mode = InputMode::None;
                    if self.view.query().is_empty() {
                        self.set_status_message("Filter cleared".to_string());
                    } else {
                        self.set_status_message(format!(
                            "Filter applied: '{}' ({} tasks)",
                            self.view.query(),
                            self.visible_ids.len()
                        ));
                    }
                }
                KeyCode::Backspace => {
                    let mut q = self.view.query().to_string();
                    if q.pop().is_some() {
                        self.view.set_query(q);
                        self.update_visible_tasks();
                    }
                }
                KeyCode::Char(c) => {
                    let q = format!("{}{}", self.view.query(), c);
                    self.view.set_query(q);
                    self.update_visible_tasks();
                }
                _ => {}
            }
            return false;
        }

        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Char('q') => return true,
            KeyCode::Esc => {
                if self.view.query().is_empty() {
                    return true;
                }
                self.view.set_query("");
                self.update_visible_tasks();
            }
            KeyCode::Right | KeyCode::Tab => {
                self.view.next_tab();
                self.select_tab(self.view.active_tab());
            }
            KeyCode::Left | KeyCode::BackTab => {
                self.view.prev_tab();
                self.select_tab(self.view.active_tab());
            }
            KeyCode::Char(d @ '1'..='4') => {
                let idx = d as usize - '1' as usize;
                self.select_tab(Status::ALL[idx]);
            }
            KeyCode::Up | KeyCode::Char('k') => self.move_selection(false),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection(true),
            KeyCode::Char('/') => {
                self.input_mode = InputMode::Search;
            }
            KeyCode::Char('f') => {
                self.view.set_column(self.view.column().next());
                self.update_visible_tasks();
            }
            KeyCode::Char('F') => {
                self.view.set_column(self.view.column().prev());
                self.update_visible_tasks();
            }
            KeyCode::Char('c') | KeyCode::Char('a') => self.open_create_form(),
            KeyCode::Char('x') => self.export_csv(),
            KeyCode::Char('r') => {
                self.update_visible_tasks();
                self.set_status_message(format!("Refreshed: {} task(s)", self.visible_ids.len()));
            }
            KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::F(1) => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    /// Handle keyboard input when the create form is open.
    fn handle_form_input(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        match key {
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
            KeyCode::Esc => self.close_create_form(),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Tab | KeyCode::Down => self.task_form.next_field(),
            KeyCode::BackTab | KeyCode::Up => self.task_form.prev_field(),
            KeyCode::Left => self.task_form.handle_left_right(false),
            KeyCode::Right => self.task_form.handle_left_right(true),
            KeyCode::Backspace => self.task_form.handle_backspace(),
            KeyCode::Delete => self.task_form.handle_delete(),
            KeyCode::Char(c) => self.task_form.handle_char(c),
            _ => {}
        }
        false
    }

    /// Dispatch one key press. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind != KeyEventKind::Press {
            return false;
        }
        self.clear_status_message();
        let quit = match self.state {
            AppState::TaskList => self.handle_task_list_input(key.code, key.modifiers),
            AppState::CreateTask => self.handle_form_input(key.code, key.modifiers),
            AppState::Help => {
                self.state = AppState::TaskList;
                false
            }
        };
        self.sync_with_store();
        quit
    }

    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                return Ok(self.handle_key(key));
            }
        }
        Ok(false)
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let header = Paragraph::new(vec![Line::from(vec![
            Span::styled("TASKS", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled("Manage your tasks.", Style::default().fg(Color::Cyan).add_modifier(Modifier::ITALIC)),
            Span::raw("    "),
            Span::styled("[c] + Create", Style::default().fg(GOLD).add_modifier(Modifier::BOLD)),
        ])])
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_filter_row(&self, f: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(28)])
            .split(area);

        let searching = self.input_mode == InputMode::Search;
        let search_text = if self.view.query().is_empty() && !searching {
            Span::styled("Type to search", Style::default().fg(Color::DarkGray))
        } else {
            Span::raw(self.view.query())
        };
        let search_style = if searching { Style::default().fg(GOLD) } else { Style::default() };
        let search = Paragraph::new(Line::from(search_text)).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Filter (/)")
                .border_style(search_style),
        );
        f.render_widget(search, chunks[0]);

        let column = Paragraph::new(format!("< {} >", self.view.column().label()))
            .block(Block::default().borders(Borders::ALL).title("Column (f)"));
        f.render_widget(column, chunks[1]);

        if searching {
            let x = cursor_x(chunks[0], self.view.query().chars().count());
            f.set_cursor_position((x, chunks[0].y + 1));
        }
    }

    fn render_tabs(&self, f: &mut Frame, area: Rect) {
        let counts = self.store.counts();
        let titles: Vec<Line> = Status::ALL
            .iter()
            .map(|&s| Line::from(format!("{} {}", s.label(), counts.get(s))))
            .collect();
        let tabs = Tabs::new(titles)
            .select(self.view.active_tab().index())
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(GOLD).add_modifier(Modifier::BOLD))
            .divider("|");
        f.render_widget(tabs, area);
    }

    /// Render the table of visible tasks for the active tab.
    fn render_task_table(&mut self, f: &mut Frame, area: Rect) {
        let header_cells = CSV_HEADERS
            .iter()
            .map(|h| TableCell::from(*h).style(Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells)
            .style(Style::default().bg(SLATE).fg(Color::White))
            .height(1);

        let tasks = self.visible_tasks();
        let empty = tasks.is_empty();
        let rows: Vec<Row> = if empty {
            Vec::new()
        } else {
            tasks
                .iter()
                .map(|task| {
                    Row::new(vec![
                        TableCell::from(task.id.clone()),
                        TableCell::from(Span::styled(
                            task.priority.label(),
                            Style::default().fg(priority_color(task.priority)),
                        )),
                        TableCell::from(task.created_by.clone()),
                        TableCell::from(task.task_type.clone()),
                        TableCell::from(task.sub_type.clone()),
                        TableCell::from(task.name.clone()),
                    ])
                })
                .collect()
        };

        let widths = [
            Constraint::Length(16), // Task Id
            Constraint::Length(9),  // Priority
            Constraint::Length(16), // Created By
            Constraint::Length(12), // Type
            Constraint::Length(12), // Sub Type
            Constraint::Min(20),    // Task Name
        ];

        let title = format!("{} Tasks", self.view.active_tab().label());
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title))
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, area, &mut self.table_state);

        if empty {
            // below the border and the header row
            let inner = Rect {
                x: area.x.saturating_add(1),
                y: area.y.saturating_add(2),
                width: area.width.saturating_sub(2),
                height: area.height.saturating_sub(3),
            };
            let placeholder = Paragraph::new(Span::styled(
                "No record found to display.",
                Style::default().add_modifier(Modifier::ITALIC),
            ))
            .alignment(Alignment::Center);
            f.render_widget(placeholder, inner);
        }
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let footer = Paragraph::new(format!(" Total Records: {}", self.visible_ids.len()));
        f.render_widget(footer, area);
    }

    /// One form input box, with the validation message on its bottom border.
    fn render_form_box(&self, f: &mut Frame, area: Rect, order: usize, title: &str, content: String) {
        let focused = self.task_form.current_field == order;
        let error = self.task_form.error_for(order);
        let border_style = match (focused, error) {
            (true, _) => Style::default().fg(GOLD),
            (false, Some(_)) => Style::default().fg(Color::Red),
            (false, None) => Style::default(),
        };
        let mut block = Block::default()
            .borders(Borders::ALL)
            .title(title.to_string())
            .border_style(border_style);
        if let Some(msg) = error {
            block = block.title_bottom(Line::from(Span::styled(
                msg.to_string(),
                Style::default().fg(Color::White).bg(DARK_RED),
            )));
        }
        f.render_widget(Paragraph::new(content).block(block), area);

        if focused {
            if let Some(field) = self.task_form.text_field(order) {
                f.set_cursor_position((cursor_x(area, field.cursor), area.y + 1));
            }
        }
    }

    /// Render the "Create Task" form as a centred overlay.
    fn render_task_form(&self, f: &mut Frame, area: Rect) {
        let area = centered_rect(90, 95, area);
        f.render_widget(Clear, area);
        let outer = Block::default().borders(Borders::ALL).title("Create Task");
        let inner = outer.inner(area);
        f.render_widget(outer, area);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(21), Constraint::Length(3)])
            .split(inner);
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);
        let box_constraints = [Constraint::Length(3); 7];
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints(box_constraints)
            .split(columns[0]);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints(box_constraints)
            .split(columns[1]);

        let form = &self.task_form;
        let selector = |s: &str| format!("< {} >", s);

        // Guest details
        self.render_form_box(f, left[0], NAME_GLOBAL_ORDER, "Name *", form.name.value.clone());
        self.render_form_box(f, left[1], EMAIL_GLOBAL_ORDER, "Email", form.email.value.clone());
        self.render_form_box(f, left[2], PHONE_GLOBAL_ORDER, "Phone (email or phone required)", form.phone.value.clone());

        // Task details
        let created_by = Paragraph::new(form.created_by.as_str())
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title("Created By"));
        f.render_widget(created_by, left[3]);
        self.render_form_box(
            f,
            left[4],
            ASSIGNED_TO_GLOBAL_ORDER,
            "Assigned To *",
            selector(form.selected_agent().unwrap_or("Select Agent")),
        );
        self.render_form_box(f, left[5], TASK_NAME_GLOBAL_ORDER, "Task Name *", form.task_name.value.clone());
        self.render_form_box(
            f,
            left[6],
            TASK_TYPE_GLOBAL_ORDER,
            "Task Type *",
            selector(form.selected_task_type().map(TaskType::label).unwrap_or("Select Type")),
        );

        self.render_form_box(f, right[0], DETAILS_GLOBAL_ORDER, "Task Details *", form.details.value.clone());
        let priority = form.selected_priority();
        self.render_form_box(f, right[1], PRIORITY_GLOBAL_ORDER, "Priority", selector(Priority::label(priority)));
        self.render_form_box(f, right[2], STATUS_GLOBAL_ORDER, "Status", selector(form.selected_status().label()));
        self.render_form_box(f, right[3], ENGAGEMENT_GLOBAL_ORDER, "Engagement", form.engagement.value.clone());
        self.render_form_box(f, right[4], START_DATE_GLOBAL_ORDER, "Start Date (YYYY-MM-DD)", form.start_date.value.clone());
        self.render_form_box(f, right[5], END_DATE_GLOBAL_ORDER, "End Date (YYYY-MM-DD)", form.end_date.value.clone());
        self.render_form_box(f, right[6], REMARKS_GLOBAL_ORDER, "Remarks", form.remarks.value.clone());

        let instructions = Paragraph::new("Tab/↑↓: Navigate  ←→: Change selectors  Enter: Save  Esc: Cancel")
            .block(Block::default().borders(Borders::ALL).title("Instructions"))
            .wrap(Wrap { trim: true });
        f.render_widget(instructions, rows[1]);
    }

    /// Render the help screen with keyboard shortcuts.
    fn render_help(&self, f: &mut Frame, area: Rect) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let help_text = vec![
            Line::from(Span::styled("Task Tabs Help", bold)),
            Line::from(""),
            Line::from(Span::styled("Tabs & Table:", bold)),
            Line::from("  ←/→, Tab, 1-4   Switch tab (Open, Pending, In Progress, Completed)"),
            Line::from("  ↑/k, ↓/j        Move selection"),
            Line::from("  /               Search the active tab"),
            Line::from("  f / F           Cycle search column"),
            Line::from("  r               Refresh"),
            Line::from("  x               Export visible rows to <Tab>_Tasks.csv"),
            Line::from("  c / a           Create a task"),
            Line::from("  h/?/F1          Show this help"),
            Line::from("  q/Esc/Ctrl+C    Quit"),
            Line::from(""),
            Line::from(Span::styled("Create Task Form:", bold)),
            Line::from("  Tab/↑↓          Navigate between fields"),
            Line::from("  ←/→             Change selectors"),
            Line::from("  Enter           Save"),
            Line::from("  Esc             Cancel and reset"),
        ];

        let paragraph = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL).title("Help - Press any key to return"))
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    /// Render the status bar at the bottom of the screen.
    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let status_text = if !self.status_message.is_empty() {
            self.status_message.clone()
        } else if self.input_mode == InputMode::Search {
            format!("Search: {} (Esc to clear, Enter to confirm)", self.view.query())
        } else {
            match self.state {
                AppState::TaskList => format!(
                    "{}: {} | Press 'h' for help",
                    self.view.active_tab().label(),
                    self.store.counts().get(self.view.active_tab())
                ),
                AppState::CreateTask => "Create Task".to_string(),
                AppState::Help => "Help".to_string(),
            }
        };
        let status = Paragraph::new(status_text)
            .style(Style::default().bg(SLATE).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Main render function that dispatches to the active screen.
    pub fn render(&mut self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(f.area());

        match self.state {
            AppState::Help => self.render_help(f, chunks[0]),
            AppState::TaskList | AppState::CreateTask => {
                let body = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3), // header
                        Constraint::Length(3), // filter row
                        Constraint::Length(3), // tabs
                        Constraint::Min(3),    // table
                        Constraint::Length(1), // footer
                    ])
                    .split(chunks[0]);
                self.render_header(f, body[0]);
                self.render_filter_row(f, body[1]);
                self.render_tabs(f, body[2]);
                self.render_task_table(f, body[3]);
                self.render_footer(f, body[4]);
                if self.state == AppState::CreateTask {
                    self.render_task_form(f, chunks[0]);
                }
            }
        }

        self.render_status_bar(f, chunks[1]);
    }

    /// Main event loop for the TUI application.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.sync_with_store();
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::sample_seed;
    use crate::store::Seed;
    use pretty_assertions::assert_eq;
    use ratatui::backend::TestBackend;

    fn app() -> App {
        App::new(TaskStore::initialize(sample_seed()).unwrap(), &Config::default())
    }

    fn press(app: &mut App, code: KeyCode) -> bool {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut App, s: &str) {
        for c in s.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    /// Render into an in-memory buffer and return plain text.
    fn render_to_string(app: &mut App, w: u16, h: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(w, h)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buf = terminal.backend().buffer().clone();
        buf.content
            .chunks(buf.area.width as usize)
            .map(|row| row.iter().map(|c| c.symbol()).collect::<String>().trim_end().to_string())
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Fill every required field of the open form.
    fn fill_form(app: &mut App, task_name: &str) {
        type_text(app, "Jane Guest"); // name
        press(app, KeyCode::Tab);
        type_text(app, "jane@example.com"); // email
        press(app, KeyCode::Tab);
        press(app, KeyCode::Tab);
        press(app, KeyCode::Right); // Agent A
        press(app, KeyCode::Tab);
        type_text(app, task_name);
        press(app, KeyCode::Tab);
        press(app, KeyCode::Right); // Bug
        press(app, KeyCode::Tab);
        type_text(app, "details");
    }

    #[test]
    fn test_initial_render_shows_tab_counts_and_rows() {
        let mut app = app();
        let screen = render_to_string(&mut app, 120, 30);
        assert!(screen.contains("Open 2"));
        assert!(screen.contains("Pending 1"));
        assert!(screen.contains("In Progress 3"));
        assert!(screen.contains("Completed 1"));
        assert!(screen.contains("Fix navbar issue"));
        assert!(screen.contains("Total Records: 2"));
    }

    #[test]
    fn test_empty_tab_shows_placeholder() {
        let mut app = App::new(TaskStore::initialize(Seed::new()).unwrap(), &Config::default());
        let screen = render_to_string(&mut app, 120, 30);
        assert!(screen.contains("No record found to display."));
        assert!(screen.contains("Total Records: 0"));
    }

    #[test]
    fn test_search_without_matches_shows_full_placeholder() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "zzz");
        let screen = render_to_string(&mut app, 80, 24);
        assert!(screen.contains("No record found to display."));
        assert!(screen.contains("Task Id"));
    }

    #[test]
    fn test_cursor_x_clamps_to_box() {
        let area = Rect::new(10, 0, 20, 3);
        assert_eq!(cursor_x(area, 0), 11);
        assert_eq!(cursor_x(area, 5), 16);
        assert_eq!(cursor_x(area, 100_000), 28);
        let edge = Rect::new(u16::MAX - 5, 0, 5, 3);
        assert_eq!(cursor_x(edge, usize::MAX), edge.right().saturating_sub(2));
    }

    #[test]
    fn test_tab_switching_by_keys() {
        let mut app = app();
        press(&mut app, KeyCode::Char('3'));
        assert_eq!(app.view.active_tab(), Status::InProgress);
        assert_eq!(app.visible_ids, vec!["T020", "T021", "T022"]);
        press(&mut app, KeyCode::Right);
        assert_eq!(app.view.active_tab(), Status::Completed);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.view.active_tab(), Status::InProgress);
        assert_eq!(app.table_state.selected(), Some(0));
    }

    #[test]
    fn test_search_mode_filters_live() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "alice");
        assert_eq!(app.visible_ids, vec!["T001"]);
        press(&mut app, KeyCode::Enter);
        assert!(app.status_message.contains("Filter applied"));
        // column narrowed to Type: nobody has type "alice"
        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Char('f'));
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.view.column(), crate::fields::Column::Type);
        assert!(app.visible_ids.is_empty());
        // Esc clears the search before quitting
        assert!(!press(&mut app, KeyCode::Esc));
        assert_eq!(app.visible_ids.len(), 2);
        assert!(press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn test_invalid_submit_keeps_form_open_with_errors() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.state, AppState::CreateTask);
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state, AppState::CreateTask);
        assert_eq!(app.task_form.error_for(EMAIL_GLOBAL_ORDER), Some("Email is required"));
        assert_eq!(app.task_form.error_for(PHONE_GLOBAL_ORDER), Some("Phone is required"));
        assert_eq!(app.store.counts().get(Status::Open), 2);

        let screen = render_to_string(&mut app, 140, 40);
        assert!(screen.contains("Email is required"));
    }

    #[test]
    fn test_valid_submit_inserts_into_active_tab() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        fill_form(&mut app, "Crash on load");
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.state, AppState::TaskList);
        assert!(app.status_message.starts_with("Task created successfully"));
        assert_eq!(app.store.counts().get(Status::Open), 3);
        assert_eq!(app.visible_ids.len(), 3);
        let created = app.visible_tasks()[2].clone();
        assert_eq!(created.name, "Crash on load");
        assert_eq!(created.sub_type, "-");
        assert_eq!(created.task_type, "Bug");
        assert_eq!(created.created_by, "Mohamed Rifthy");
    }

    #[test]
    fn test_submit_into_other_tab_updates_count_only() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        fill_form(&mut app, "Later");
        press(&mut app, KeyCode::Tab); // priority
        press(&mut app, KeyCode::Tab); // status
        press(&mut app, KeyCode::Right); // Pending
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.store.counts().get(Status::Pending), 2);
        assert_eq!(app.visible_ids.len(), 2);
        press(&mut app, KeyCode::Char('2'));
        assert_eq!(app.visible_ids.last().map(String::as_str), app.store.active_partition(Status::Pending).last().map(|t| t.id.as_str()));
    }

    #[test]
    fn test_cancel_resets_form() {
        let mut app = app();
        press(&mut app, KeyCode::Char('c'));
        type_text(&mut app, "half typed");
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.state, AppState::TaskList);
        press(&mut app, KeyCode::Char('c'));
        assert_eq!(app.task_form.name.value, "");
    }

    #[test]
    fn test_export_writes_active_tab_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config { export_dir: Some(dir.path().to_path_buf()), ..Config::default() };
        let mut app = App::new(TaskStore::initialize(sample_seed()).unwrap(), &config);

        press(&mut app, KeyCode::Char('3'));
        press(&mut app, KeyCode::Char('x'));

        let written = fs::read_to_string(dir.path().join("In Progress_Tasks.csv")).unwrap();
        assert_eq!(written.lines().count(), 4);
        assert!(written.starts_with("Task Id,Priority,Created By,Type,Sub Type,Task Name\n"));
        assert!(app.status_message.starts_with("Exported 3 task(s)"));
    }

    #[test]
    fn test_export_of_empty_view_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config { export_dir: Some(dir.path().to_path_buf()), ..Config::default() };
        let mut app = App::new(TaskStore::initialize(sample_seed()).unwrap(), &config);

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "zzz");
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('x'));

        assert_eq!(app.status_message, "Nothing to export");
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
