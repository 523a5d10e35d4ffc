use std::io::{self, IsTerminal};
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::board::BoardSnapshot;
use crate::config::ViewMode;
use crate::detail::TaskDetail;
use crate::error::{Error, Result};
use crate::store::{DragTracker, DropOutcome, TaskStore};
use crate::task::{Lane, TaskRecord};

use super::model;
use super::view;

const EVENT_POLL_MS: u64 = 120;

#[derive(Clone, Copy)]
pub(crate) enum StatusKind {
    Error,
    Info,
}

/// What the detail screen is showing.
pub(crate) enum DetailScreen {
    Open(TaskDetail),
    Missing(u32),
}

pub struct AppState {
    pub(crate) store: TaskStore,
    pub(crate) drag: DragTracker,
    pub(crate) snapshot: BoardSnapshot,
    pub(crate) search: String,
    pub(crate) search_active: bool,
    pub(crate) view: ViewMode,
    pub(crate) lane: Lane,
    pub(crate) row: usize,
    pub(crate) detail: Option<DetailScreen>,
    pub(crate) comment_active: bool,
    pub(crate) show_help: bool,
    info_message: Option<String>,
    status_message: Option<String>,
    timestamp_format: String,
}

impl AppState {
    pub(crate) fn new(
        store: TaskStore,
        view: ViewMode,
        search: String,
        timestamp_format: String,
    ) -> Self {
        let snapshot = store.snapshot(&search);
        Self {
            store,
            drag: DragTracker::new(),
            snapshot,
            search,
            search_active: false,
            view,
            lane: Lane::ToDo,
            row: 0,
            detail: None,
            comment_active: false,
            show_help: false,
            info_message: None,
            status_message: None,
            timestamp_format,
        }
    }

    pub(crate) fn visible_rows(&self) -> &[TaskRecord] {
        model::visible_rows(&self.snapshot, self.view, self.lane)
    }

    pub(crate) fn selected_task(&self) -> Option<&TaskRecord> {
        model::selected_task(&self.snapshot, self.view, self.lane, self.row)
    }

    pub(crate) fn status_line(&self) -> Option<(String, StatusKind)> {
        if let Some(message) = self.status_message.as_ref() {
            return Some((message.clone(), StatusKind::Error));
        }
        if let Some(info) = self.info_message.as_ref() {
            return Some((info.clone(), StatusKind::Info));
        }
        if let Some(drag) = self.drag.in_flight() {
            return Some((
                format!("dragging task {} from {}", drag.task_id, drag.from.title()),
                StatusKind::Info,
            ));
        }
        if !self.search.is_empty() {
            return Some((format!("search: {}", self.search), StatusKind::Info));
        }
        None
    }

    pub(crate) fn footer_hint(&self) -> String {
        if let Some(detail) = self.detail.as_ref() {
            if self.comment_active {
                return "type comment  enter post  backspace delete  esc done".to_string();
            }
            if matches!(detail, DetailScreen::Open(_)) {
                return "c/i comment  ? help  esc/q back".to_string();
            }
            return "esc/q back".to_string();
        }
        if self.search_active {
            return "type search  backspace delete  enter done  esc clear".to_string();
        }
        if self.drag.in_flight().is_some() {
            return "h/l choose lane  space drop  esc cancel drag".to_string();
        }
        match self.view {
            ViewMode::Board => {
                "h/l lane  j/k move  space drag  / search  v list view  enter details  ? help  q quit"
                    .to_string()
            }
            ViewMode::List => {
                "j/k move  / search  v board view  enter details  ? help  q quit".to_string()
            }
        }
    }

    pub(crate) fn count_summary(&self) -> String {
        let counts: Vec<String> = self
            .snapshot
            .status_counts()
            .into_iter()
            .map(|(status, count)| format!("{status} {count}"))
            .collect();
        format!(
            "{}  |  {} of {} tasks",
            counts.join("  "),
            self.snapshot.filtered.len(),
            self.store.len()
        )
    }

    /// Re-derive both views after the store or search term changed.
    fn refresh(&mut self) {
        let previous = self.selected_task().map(|task| task.id);
        self.snapshot = self.store.snapshot(&self.search);
        self.row = model::select_by_id(self.visible_rows(), previous, self.row);
    }

    fn move_row(&mut self, delta: isize) {
        self.row = model::move_row(self.row, delta, self.visible_rows().len());
    }

    fn move_lane(&mut self, delta: isize) {
        if self.view != ViewMode::Board {
            return;
        }
        self.lane = model::step_lane(self.lane, delta);
        self.row = model::clamp_row(self.row, self.visible_rows().len());
    }

    fn toggle_view(&mut self) {
        let previous = self.selected_task().map(|task| task.id);
        self.view = match self.view {
            ViewMode::Board => ViewMode::List,
            ViewMode::List => ViewMode::Board,
        };
        if self.view == ViewMode::Board {
            if let Some(task) = previous.and_then(|id| self.store.get(id)) {
                self.lane = task.lane();
            }
        }
        self.row = model::select_by_id(self.visible_rows(), previous, self.row);
    }

    fn pick_up_or_drop(&mut self) {
        if self.view != ViewMode::Board {
            self.set_error("switch to board view to move tasks".to_string());
            return;
        }
        if self.drag.in_flight().is_some() {
            let outcome = self.drag.drop_on_lane(&mut self.store, self.lane);
            self.apply_drop(outcome);
            return;
        }
        let Some(task) = self.selected_task() else {
            self.set_error("no task selected".to_string());
            return;
        };
        let (id, from) = (task.id, task.lane());
        self.drag.start(id, from);
        self.set_info(format!("picked up task {id}"));
    }

    fn apply_drop(&mut self, outcome: DropOutcome) {
        self.refresh();
        if let DropOutcome::Moved { task_id, to, .. } = &outcome {
            self.lane = *to;
            self.row = model::select_by_id(self.visible_rows(), Some(*task_id), 0);
        }
        self.set_info(outcome.message());
    }

    fn open_detail(&mut self) {
        let Some(id) = self.selected_task().map(|task| task.id) else {
            self.set_error("no task selected".to_string());
            return;
        };
        self.detail = Some(
            match TaskDetail::open_with_format(&self.store, id, &self.timestamp_format) {
                Some(detail) => DetailScreen::Open(detail),
                None => DetailScreen::Missing(id),
            },
        );
        self.comment_active = false;
    }

    fn close_detail(&mut self) {
        self.detail = None;
        self.comment_active = false;
    }

    fn open_detail_mut(&mut self) -> Option<&mut TaskDetail> {
        match self.detail.as_mut() {
            Some(DetailScreen::Open(detail)) => Some(detail),
            _ => None,
        }
    }

    fn submit_comment(&mut self) {
        let Some(detail) = self.open_detail_mut() else {
            return;
        };
        if detail.submit().is_some() {
            self.info_message = Some("comment added".to_string());
            self.status_message = None;
        }
    }

    fn set_error(&mut self, message: String) {
        self.status_message = Some(message);
        self.info_message = None;
    }

    fn set_info(&mut self, message: String) {
        self.info_message = Some(message);
        self.status_message = None;
    }

    fn clear_messages(&mut self) {
        self.info_message = None;
        self.status_message = None;
    }
}

pub fn run(
    store: TaskStore,
    view: ViewMode,
    search: String,
    timestamp_format: String,
) -> Result<()> {
    if !io::stdout().is_terminal() {
        return Err(Error::OperationFailed(
            "the board viewer needs an interactive terminal".to_string(),
        ));
    }
    tracing::debug!(tasks = store.len(), ?view, "starting board viewer");
    let mut app = AppState::new(store, view, search, timestamp_format);
    run_terminal(&mut app)
}

fn run_terminal(app: &mut AppState) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    let mut dirty = true;
    loop {
        if dirty {
            terminal.draw(|frame| view::render(frame, app))?;
            dirty = false;
        }

        if event::poll(Duration::from_millis(EVENT_POLL_MS))? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    if handle_key(app, key) {
                        break;
                    }
                    dirty = true;
                }
                Event::Resize(_, _) => dirty = true,
                _ => {}
            }
        }
    }
    Ok(())
}

/// Returns true when the viewer should exit.
pub(crate) fn handle_key(app: &mut AppState, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return true;
    }

    if app.show_help {
        app.show_help = false;
        return false;
    }

    if app.detail.is_some() {
        handle_detail_key(app, key);
        return false;
    }

    if app.search_active {
        match key.code {
            KeyCode::Esc => {
                app.search.clear();
                app.search_active = false;
            }
            KeyCode::Enter => app.search_active = false,
            KeyCode::Backspace => {
                app.search.pop();
            }
            KeyCode::Char(ch) => {
                if key.modifiers.contains(KeyModifiers::CONTROL) {
                    return false;
                }
                if !ch.is_control() {
                    app.search.push(ch);
                }
            }
            _ => {}
        }
        app.refresh();
        return false;
    }

    if key.code == KeyCode::Char('?') {
        app.show_help = true;
        return false;
    }

    app.clear_messages();
    match key.code {
        KeyCode::Esc if app.drag.in_flight().is_some() => {
            app.drag.cancel();
            app.set_info("drag cancelled".to_string());
            false
        }
        KeyCode::Char('q') | KeyCode::Esc => true,
        KeyCode::Char('h') | KeyCode::Left => {
            app.move_lane(-1);
            false
        }
        KeyCode::Char('l') | KeyCode::Right => {
            app.move_lane(1);
            false
        }
        KeyCode::Char('j') | KeyCode::Down => {
            app.move_row(1);
            false
        }
        KeyCode::Char('k') | KeyCode::Up => {
            app.move_row(-1);
            false
        }
        KeyCode::Char('/') => {
            app.search_active = true;
            false
        }
        KeyCode::Char('v') | KeyCode::Tab => {
            app.toggle_view();
            false
        }
        KeyCode::Char(' ') => {
            app.pick_up_or_drop();
            false
        }
        KeyCode::Enter => {
            app.open_detail();
            false
        }
        _ => false,
    }
}

fn handle_detail_key(app: &mut AppState, key: KeyEvent) {
    if app.comment_active {
        match key.code {
            KeyCode::Esc => app.comment_active = false,
            KeyCode::Enter => app.submit_comment(),
            KeyCode::Backspace => {
                if let Some(detail) = app.open_detail_mut() {
                    detail.pop_input();
                }
            }
            KeyCode::Char(ch)
                if !key.modifiers.contains(KeyModifiers::CONTROL) && !ch.is_control() =>
            {
                if let Some(detail) = app.open_detail_mut() {
                    detail.push_input(ch);
                }
            }
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Char('c') | KeyCode::Char('i')
            if matches!(app.detail, Some(DetailScreen::Open(_))) =>
        {
            app.comment_active = true;
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Backspace => app.close_detail(),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::TaskStatus;

    fn app() -> AppState {
        AppState::new(
            TaskStore::seeded(),
            ViewMode::Board,
            String::new(),
            crate::detail::DEFAULT_TIMESTAMP_FORMAT.to_string(),
        )
    }

    fn press(app: &mut AppState, code: KeyCode) -> bool {
        handle_key(app, KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn type_text(app: &mut AppState, text: &str) {
        for ch in text.chars() {
            press(app, KeyCode::Char(ch));
        }
    }

    #[test]
    fn drag_across_board_moves_task() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.drag.in_flight().map(|drag| drag.task_id), Some(1));

        for _ in 0..3 {
            press(&mut app, KeyCode::Char('l'));
        }
        press(&mut app, KeyCode::Char(' '));

        assert!(app.drag.in_flight().is_none());
        assert_eq!(
            app.store.get(1).map(|task| task.status),
            Some(TaskStatus::Completed)
        );
        assert_eq!(app.snapshot.lane_count(Lane::ToDo), 2);
        assert_eq!(app.snapshot.lane_count(Lane::Completed), 4);
        assert_eq!(app.lane, Lane::Completed);
        assert_eq!(app.selected_task().map(|task| task.id), Some(1));
    }

    #[test]
    fn dropping_on_source_lane_changes_nothing() {
        let mut app = app();
        let before = app.store.clone();
        press(&mut app, KeyCode::Char(' '));
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.store, before);
        assert!(app.drag.in_flight().is_none());
    }

    #[test]
    fn esc_cancels_drag_before_quitting() {
        let mut app = app();
        press(&mut app, KeyCode::Char(' '));
        assert!(!press(&mut app, KeyCode::Esc));
        assert!(app.drag.in_flight().is_none());
        assert!(press(&mut app, KeyCode::Esc));
    }

    #[test]
    fn search_filters_both_views() {
        let mut app = app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "nothing like this");
        press(&mut app, KeyCode::Enter);
        assert!(!app.search_active);
        assert!(app.snapshot.filtered.is_empty());
        assert!(app.selected_task().is_none());

        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.search, "");
        assert_eq!(app.snapshot.filtered.len(), 12);
    }

    #[test]
    fn view_toggle_keeps_selected_task() {
        let mut app = app();
        press(&mut app, KeyCode::Char('l'));
        press(&mut app, KeyCode::Char('j'));
        assert_eq!(app.selected_task().map(|task| task.id), Some(5));

        press(&mut app, KeyCode::Char('v'));
        assert_eq!(app.view, ViewMode::List);
        assert_eq!(app.selected_task().map(|task| task.id), Some(5));

        press(&mut app, KeyCode::Char('j'));
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.view, ViewMode::Board);
        assert_eq!(app.lane, Lane::InProgress);
        assert_eq!(app.selected_task().map(|task| task.id), Some(6));
    }

    #[test]
    fn list_view_refuses_drag() {
        let mut app = app();
        press(&mut app, KeyCode::Char('v'));
        press(&mut app, KeyCode::Char(' '));
        assert!(app.drag.in_flight().is_none());
        assert!(matches!(app.status_line(), Some((_, StatusKind::Error))));
    }

    #[test]
    fn detail_comments_are_session_local() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('c'));
        type_text(&mut app, "   ");
        press(&mut app, KeyCode::Enter);
        let Some(DetailScreen::Open(detail)) = app.detail.as_ref() else {
            panic!("detail not open");
        };
        assert!(detail.comments().is_empty());

        if let Some(DetailScreen::Open(detail)) = app.detail.as_mut() {
            detail.set_input("");
        }
        type_text(&mut app, "hello");
        press(&mut app, KeyCode::Enter);
        let Some(DetailScreen::Open(detail)) = app.detail.as_ref() else {
            panic!("detail not open");
        };
        assert_eq!(detail.comments().len(), 1);
        assert_eq!(detail.comment_count(), 13);

        press(&mut app, KeyCode::Esc);
        press(&mut app, KeyCode::Esc);
        assert!(app.detail.is_none());
        press(&mut app, KeyCode::Enter);
        let Some(DetailScreen::Open(detail)) = app.detail.as_ref() else {
            panic!("detail not open");
        };
        assert!(detail.comments().is_empty());
        assert_eq!(app.store.get(1).map(|task| task.comments), Some(12));
    }

    #[test]
    fn q_in_comment_input_is_text() {
        let mut app = app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('i'));
        assert!(!press(&mut app, KeyCode::Char('q')));
        let Some(DetailScreen::Open(detail)) = app.detail.as_ref() else {
            panic!("detail not open");
        };
        assert_eq!(detail.input(), "q");
    }

    #[test]
    fn help_overlay_swallows_next_key() {
        let mut app = app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);

        assert!(!press(&mut app, KeyCode::Char('q')));
        assert!(!app.show_help);

        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Char(' '));
        assert!(!app.show_help);
        assert!(app.drag.in_flight().is_none());

        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('?'));
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
        assert!(matches!(app.detail, Some(DetailScreen::Open(_))));
    }
}
