use chrono::{DateTime, Local};
use crossterm::event::{KeyEvent, KeyEventKind};
use ratatui::widgets::TableState;

use crate::events::key_bindings::{containers_action, filter_action, logs_action, Action};
use crate::events::{AppEvent, Task};
use crate::filter::apply_filter;
use crate::types::{AppError, ContainerSnapshot, LifecycleOp, Result};

/// Header (3), status area (2) and footer (1) around the body pane.
const FRAME_ROWS: u16 = 6;
const PANE_BORDER_ROWS: u16 = 2;
const TABLE_HEADER_ROWS: u16 = 1;
const MIN_PANE_ROWS: u16 = 1;
const FILTER_CHAR_LIMIT: usize = 50;

fn table_rows(terminal_height: u16) -> u16 {
    terminal_height
        .saturating_sub(FRAME_ROWS + PANE_BORDER_ROWS + TABLE_HEADER_ROWS)
        .max(MIN_PANE_ROWS)
}

fn log_rows(terminal_height: u16) -> u16 {
    terminal_height
        .saturating_sub(FRAME_ROWS + PANE_BORDER_ROWS)
        .max(MIN_PANE_ROWS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Containers,
    Logs,
    Filter,
}

/// Scrollable log pane. `height` is the number of visible rows.
#[derive(Debug, Clone, Default)]
pub struct LogViewport {
    pub lines: Vec<String>,
    pub offset: usize,
    pub height: u16,
}

impl LogViewport {
    fn new(height: u16) -> Self {
        Self {
            height,
            ..Default::default()
        }
    }

    pub fn set_content(&mut self, text: &str) {
        self.lines = text.lines().map(str::to_string).collect();
        self.offset = 0;
    }

    pub fn clear(&mut self) {
        self.lines.clear();
        self.offset = 0;
    }

    fn max_offset(&self) -> usize {
        self.lines.len().saturating_sub(self.height as usize)
    }

    pub fn scroll_up(&mut self, n: usize) {
        self.offset = self.offset.saturating_sub(n);
    }

    pub fn scroll_down(&mut self, n: usize) {
        self.offset = (self.offset + n).min(self.max_offset());
    }

    pub fn goto_top(&mut self) {
        self.offset = 0;
    }

    pub fn goto_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    pub fn at_bottom(&self) -> bool {
        self.offset >= self.max_offset()
    }

    /// Follows the tail if it was showing it, otherwise keeps the offset
    /// in range.
    pub fn resize(&mut self, height: u16) {
        let follow = self.at_bottom();
        self.height = height.max(MIN_PANE_ROWS);
        if follow {
            self.goto_bottom();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }
}

/// Dashboard state. Only `update` mutates it, one event at a time; runtime
/// calls leave as `Task`s and come back as events.
pub struct App {
    pub view: View,
    /// Latest successful refresh, unfiltered.
    pub all_containers: Vec<ContainerSnapshot>,
    /// `all_containers` after the active filter; these are the table rows.
    pub containers: Vec<ContainerSnapshot>,
    pub table_state: TableState,
    pub selected_id: Option<String>,
    pub error: Option<AppError>,
    pub loading: bool,
    pending: usize,
    pub filter: String,
    pub filter_input: String,
    pub compact: bool,
    pub show_all: bool,
    pub show_help: bool,
    /// Visible table rows, used for paging.
    pub table_height: u16,
    pub log_view: LogViewport,
    pub log_target: Option<String>,
    pub log_tail_lines: usize,
    pub last_updated: Option<DateTime<Local>>,
    pub should_quit: bool,
    next_seq: u64,
    applied_seq: u64,
}

impl App {
    pub fn new(compact: bool, show_all: bool, log_tail_lines: usize) -> Self {
        Self {
            view: View::Containers,
            all_containers: Vec::new(),
            containers: Vec::new(),
            table_state: TableState::default(),
            selected_id: None,
            error: None,
            loading: false,
            pending: 0,
            filter: String::new(),
            filter_input: String::new(),
            compact,
            show_all,
            show_help: false,
            table_height: table_rows(24),
            log_view: LogViewport::new(log_rows(24)),
            log_target: None,
            log_tail_lines,
            last_updated: None,
            should_quit: false,
            next_seq: 0,
            applied_seq: 0,
        }
    }

    /// Tasks to run before the first event arrives.
    pub fn init(&mut self) -> Vec<Task> {
        vec![self.request_refresh()]
    }

    pub fn update(&mut self, event: AppEvent) -> Vec<Task> {
        match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::Resize { height } => {
                self.resize(height);
                Vec::new()
            }
            AppEvent::Tick => vec![self.request_refresh()],
            AppEvent::Refreshed { seq, result } => {
                self.finish();
                self.apply_refresh(seq, result);
                Vec::new()
            }
            AppEvent::CommandFinished { op, id, result } => {
                self.finish();
                self.command_finished(op, &id, result)
            }
            AppEvent::LogsLoaded { id, result } => {
                self.finish();
                self.logs_loaded(&id, result);
                Vec::new()
            }
        }
    }

    /// Running containers in the last refresh, ignoring the filter.
    pub fn running_count(&self) -> usize {
        self.all_containers.iter().filter(|c| c.is_running()).count()
    }

    fn begin(&mut self) {
        self.pending += 1;
        self.loading = true;
    }

    fn finish(&mut self) {
        self.pending = self.pending.saturating_sub(1);
        self.loading = self.pending > 0;
    }

    fn request_refresh(&mut self) -> Task {
        self.begin();
        self.next_seq += 1;
        Task::Refresh {
            seq: self.next_seq,
            include_stopped: self.show_all,
        }
    }

    fn apply_refresh(&mut self, seq: u64, result: Result<Vec<ContainerSnapshot>>) {
        if seq <= self.applied_seq {
            tracing::debug!(seq, applied = self.applied_seq, "discarding stale refresh");
            return;
        }
        self.applied_seq = seq;

        match result {
            Ok(snapshots) => {
                self.all_containers = snapshots;
                self.apply_current_filter();
                self.error = None;
                self.last_updated = Some(Local::now());
            }
            Err(e) => {
                tracing::warn!(error = %e, "refresh failed");
                self.error = Some(e);
            }
        }
    }

    fn apply_current_filter(&mut self) {
        self.containers = apply_filter(&self.all_containers, &self.filter);
        self.sync_selection();
    }

    /// Keeps the selection on the same container if it is still listed,
    /// otherwise clamps it to a row that exists.
    fn sync_selection(&mut self) {
        if self.containers.is_empty() {
            self.table_state.select(None);
            self.selected_id = None;
            return;
        }

        let last = self.containers.len() - 1;
        let index = self
            .selected_id
            .as_ref()
            .and_then(|id| self.containers.iter().position(|c| &c.id == id))
            .unwrap_or_else(|| self.table_state.selected().unwrap_or(0).min(last));

        self.select_index(index);
    }

    fn select_index(&mut self, index: usize) {
        self.table_state.select(Some(index));
        self.selected_id = self.containers.get(index).map(|c| c.id.clone());
    }

    fn command_finished(&mut self, op: LifecycleOp, id: &str, result: Result<()>) -> Vec<Task> {
        match result {
            Ok(()) => {
                tracing::info!(%op, container = id, "command succeeded");
                self.error = None;
                vec![self.request_refresh()]
            }
            Err(e) => {
                tracing::warn!(%op, container = id, error = %e, "command failed");
                self.error = Some(e);
                Vec::new()
            }
        }
    }

    fn logs_loaded(&mut self, id: &str, result: Result<String>) {
        if self.view != View::Logs || self.log_target.as_deref() != Some(id) {
            tracing::debug!(container = id, "discarding logs for a container no longer viewed");
            return;
        }
        match result {
            Ok(text) => {
                self.log_view.set_content(&text);
                self.log_view.goto_bottom();
                self.error = None;
            }
            Err(e) => {
                tracing::warn!(container = id, error = %e, "loading logs failed");
                self.error = Some(e);
            }
        }
    }

    fn resize(&mut self, height: u16) {
        self.table_height = table_rows(height);
        self.log_view.resize(log_rows(height));
    }

    fn handle_key(&mut self, key: KeyEvent) -> Vec<Task> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        match self.view {
            View::Containers => self.handle_containers_key(key),
            View::Logs => self.handle_logs_key(key),
            View::Filter => self.handle_filter_key(key),
        }
    }

    fn handle_containers_key(&mut self, key: KeyEvent) -> Vec<Task> {
        let Some(action) = containers_action(&key) else {
            return Vec::new();
        };

        if self.show_help {
            match action {
                Action::Quit => self.should_quit = true,
                Action::ToggleHelp | Action::Back => self.show_help = false,
                _ => {}
            }
            return Vec::new();
        }

        match action {
            Action::Quit => self.should_quit = true,
            Action::Up => self.previous(),
            Action::Down => self.next(),
            Action::Top => self.move_to(0),
            Action::Bottom => self.move_to(self.containers.len().saturating_sub(1)),
            Action::PageUp => self.page(-1),
            Action::PageDown => self.page(1),
            Action::Start => return self.dispatch(LifecycleOp::Start),
            Action::Stop => return self.dispatch(LifecycleOp::Stop),
            Action::Restart => return self.dispatch(LifecycleOp::Restart),
            Action::Remove => return self.dispatch(LifecycleOp::Remove),
            Action::ShowLogs => return self.open_logs(),
            Action::OpenFilter => {
                self.filter_input = self.filter.clone();
                self.view = View::Filter;
            }
            Action::Refresh => return vec![self.request_refresh()],
            Action::ToggleAll => {
                self.show_all = !self.show_all;
                return vec![self.request_refresh()];
            }
            Action::ToggleHelp => self.show_help = true,
            _ => {}
        }
        Vec::new()
    }

    fn handle_logs_key(&mut self, key: KeyEvent) -> Vec<Task> {
        let page = self.log_view.height.max(1) as usize;
        match logs_action(&key) {
            Some(Action::Quit) => self.should_quit = true,
            Some(Action::Back) => {
                self.view = View::Containers;
                self.log_view.clear();
                self.log_target = None;
            }
            Some(Action::Up) => self.log_view.scroll_up(1),
            Some(Action::Down) => self.log_view.scroll_down(1),
            Some(Action::PageUp) => self.log_view.scroll_up(page),
            Some(Action::PageDown) => self.log_view.scroll_down(page),
            Some(Action::Top) => self.log_view.goto_top(),
            Some(Action::Bottom) => self.log_view.goto_bottom(),
            _ => {}
        }
        Vec::new()
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Vec<Task> {
        match filter_action(&key) {
            Some(Action::Submit) => {
                self.filter = self.filter_input.trim().to_string();
                self.view = View::Containers;
                self.apply_current_filter();
                return vec![self.request_refresh()];
            }
            Some(Action::Back) => {
                self.filter_input = self.filter.clone();
                self.view = View::Containers;
            }
            Some(Action::Backspace) => {
                self.filter_input.pop();
            }
            Some(Action::ClearInput) => self.filter_input.clear(),
            Some(Action::Input(c)) => {
                if self.filter_input.chars().count() < FILTER_CHAR_LIMIT {
                    self.filter_input.push(c);
                }
            }
            _ => {}
        }
        Vec::new()
    }

    /// The id selection-dependent operations act on. It is captured when
    /// the task is built so a later refresh cannot redirect the call.
    fn capture_selection(&mut self) -> Option<String> {
        let id = self.selected_id.clone();
        if id.is_none() {
            self.error = Some(AppError::NoSelection);
        }
        id
    }

    fn dispatch(&mut self, op: LifecycleOp) -> Vec<Task> {
        let Some(id) = self.capture_selection() else {
            return Vec::new();
        };
        self.begin();
        tracing::info!(%op, container = %id, "dispatching");
        vec![Task::Lifecycle { op, id }]
    }

    fn open_logs(&mut self) -> Vec<Task> {
        let Some(id) = self.capture_selection() else {
            return Vec::new();
        };
        self.begin();
        tracing::info!(container = %id, "loading logs");
        self.view = View::Logs;
        self.log_view.clear();
        self.log_target = Some(id.clone());
        vec![Task::LoadLogs {
            id,
            tail: self.log_tail_lines,
        }]
    }

    fn next(&mut self) {
        let total = self.containers.len();
        if total == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(i) if i + 1 < total => i + 1,
            _ => 0,
        };
        self.select_index(i);
    }

    fn previous(&mut self) {
        let total = self.containers.len();
        if total == 0 {
            return;
        }
        let i = match self.table_state.selected() {
            Some(0) | None => total - 1,
            Some(i) => i - 1,
        };
        self.select_index(i);
    }

    fn move_to(&mut self, index: usize) {
        if self.containers.is_empty() {
            return;
        }
        self.select_index(index.min(self.containers.len() - 1));
    }

    fn page(&mut self, direction: i8) {
        let step = self.table_height.max(1) as usize;
        let current = self.table_state.selected().unwrap_or(0);
        let target = if direction < 0 {
            current.saturating_sub(step)
        } else {
            current + step
        };
        self.move_to(target);
    }
}
