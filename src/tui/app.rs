use std::io;
use std::time::Duration;

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseButton,
    MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::io::storage::{FileStore, KeyValueStore};
use crate::model::{PositionGroup, UiConfig};
use crate::store::RosterStore;

use super::focus::PillFocus;
use super::input;
use super::nav::NavController;
use super::render;
use super::theme::Theme;

/// Current interaction mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Navigate,
    /// Typing a number into the edit field
    Edit,
    /// Waiting for y/n on a destructive action
    Confirm,
}

/// What the edit field is editing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    SrTr { pos_id: String },
    Target { pos_id: String },
    NewPlayer { pos_id: String },
}

impl EditTarget {
    pub fn prompt(&self) -> &'static str {
        match self {
            EditTarget::SrTr { .. } => "departing",
            EditTarget::Target { .. } => "target",
            EditTarget::NewPlayer { .. } => "new player ovr",
        }
    }
}

/// Main application state
pub struct App<S: KeyValueStore = FileStore> {
    pub store: RosterStore<S>,
    pub nav: NavController,
    pub focus: PillFocus,
    pub mode: Mode,
    pub theme: Theme,
    pub should_quit: bool,
    pub edit_target: Option<EditTarget>,
    pub edit_buffer: String,
    pub show_help: bool,
    pub show_key_hints: bool,
    /// Transient message shown in the status row
    pub status_message: Option<String>,
    pub status_is_error: bool,
    /// First visible grid row
    pub scroll_offset: usize,
    /// Screen row of each rendered group, for mouse hit-testing
    pub row_hits: Vec<(u16, String)>,
}

impl<S: KeyValueStore> App<S> {
    pub fn new(store: RosterStore<S>, ui: &UiConfig) -> Self {
        let mut focus = PillFocus::new();
        focus.sync(store.state());
        App {
            store,
            nav: NavController::new(),
            focus,
            mode: Mode::Navigate,
            theme: Theme::from_config(ui),
            should_quit: false,
            edit_target: None,
            edit_buffer: String::new(),
            show_help: false,
            show_key_hints: ui.show_key_hints,
            status_message: None,
            status_is_error: false,
            scroll_offset: 0,
            row_hits: Vec::new(),
        }
    }

    /// The group whose row has focus
    pub fn focused_group(&self) -> Option<&PositionGroup> {
        let id = self.nav.focused_row_id()?;
        self.store.state().position(id)
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
        self.status_is_error = false;
    }

    /// Move a failed save into the status row
    pub fn report_persist_error(&mut self) {
        if let Some(err) = self.store.take_persist_error() {
            self.status_message = Some(format!("not saved: {}", err));
            self.status_is_error = true;
        }
    }

    /// Keep `scroll_offset` so that `row_index` is visible in `height` rows,
    /// moving by the smallest amount.
    pub fn scroll_to_row(&mut self, row_index: usize, height: usize) {
        if height == 0 {
            return;
        }
        if row_index < self.scroll_offset {
            self.scroll_offset = row_index;
        } else if row_index >= self.scroll_offset + height {
            self.scroll_offset = row_index + 1 - height;
        }
    }
}

/// Run the TUI application
pub fn run<S: KeyValueStore>(
    store: RosterStore<S>,
    ui: &UiConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut app = App::new(store, ui);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Install panic hook to restore terminal on panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen);
        original_hook(panic_info);
    }));

    let result = run_event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}

fn run_event_loop<S: KeyValueStore>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<S>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|frame| render::render(frame, app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    input::handle_key(app, key);
                }
                Event::Mouse(mouse)
                    if matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) =>
                {
                    input::handle_click(app, mouse.row);
                }
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::storage::MemoryStore;
    use crate::model::BuiltinDefaults;

    fn app() -> App<MemoryStore> {
        let store = RosterStore::open(MemoryStore::new(), "k", Box::new(BuiltinDefaults));
        App::new(store, &UiConfig::default())
    }

    #[test]
    fn starts_without_row_focus() {
        let app = app();
        assert!(app.focused_group().is_none());
        assert_eq!(app.mode, Mode::Navigate);
    }

    #[test]
    fn scroll_moves_minimally() {
        let mut app = app();
        app.scroll_to_row(3, 5);
        assert_eq!(app.scroll_offset, 0);
        app.scroll_to_row(7, 5);
        assert_eq!(app.scroll_offset, 3);
        app.scroll_to_row(5, 5);
        assert_eq!(app.scroll_offset, 3);
        app.scroll_to_row(1, 5);
        assert_eq!(app.scroll_offset, 1);
    }
}
