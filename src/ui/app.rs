use crate::auth::AuthContext;
use crate::config::config::Config;
use crate::data::list_view::{ListView, PAGE_SIZES};
use crate::data::records::RecordSet;
use crate::domain::{ListKind, RateCard};
use crate::logging::LogBuffer;
use crate::ui::carousel::{Carousel, CarouselPhase};
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io;
use std::time::Duration;
use tracing::{info, warn};
use tui_input::{backend::crossterm::EventHandler, Input};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Search,
    Rows,
}

/// One open list: its kind plus the view state that survives tab switches.
pub struct ListTab {
    pub kind: ListKind,
    pub view: ListView,
}

pub struct App {
    pub auth: AuthContext,
    pub config: Config,
    pub tabs: Vec<ListTab>,
    pub active_tab: usize,
    pub focus: Focus,
    pub search: Input,
    pub selected_row: usize,
    pub banner: Carousel,
    pub rates: Vec<RateCard>,
    pub log_buffer: LogBuffer,
    pub show_logs: bool,
    pub show_help: bool,
    pub status_message: String,
    ticks_since_rotation: u64,
    should_quit: bool,
}

impl App {
    /// Build the app for one signed-in user. `records` carries one record
    /// set per list the user may see, in tab order.
    pub fn new(
        auth: AuthContext,
        config: Config,
        records: Vec<(ListKind, RecordSet)>,
        rates: Vec<RateCard>,
        log_buffer: LogBuffer,
    ) -> Self {
        let tabs: Vec<ListTab> = records
            .into_iter()
            .map(|(kind, set)| {
                let mut view = ListView::new(set)
                    .with_case_sensitive_sort(!config.behavior.case_insensitive_sort);
                if let Err(e) = view.set_page_size(config.behavior.default_page_size) {
                    warn!("Ignoring configured page size: {}", e);
                }
                ListTab { kind, view }
            })
            .collect();

        let banner = Carousel::new(rates.len());
        let status_message = format!(
            "{} signed in as {} | / search | 1-9 sort | F1 help",
            auth.username,
            auth.role.label()
        );

        Self {
            auth,
            config,
            tabs,
            active_tab: 0,
            focus: Focus::Rows,
            search: Input::default(),
            selected_row: 0,
            banner,
            rates,
            log_buffer,
            show_logs: false,
            show_help: false,
            status_message,
            ticks_since_rotation: 0,
            should_quit: false,
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        info!("Opening portal with {} tabs", self.tabs.len());
        loop {
            terminal.draw(|f| crate::ui::render::draw(f, self))?;

            // Poll so the banner keeps rotating while the keyboard is idle.
            if event::poll(Duration::from_millis(200))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            } else {
                self.on_tick();
            }

            if self.should_quit {
                return Ok(());
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // An open overlay swallows everything until dismissed.
        if self.show_help {
            if matches!(key.code, KeyCode::F(1) | KeyCode::Esc | KeyCode::Char('q')) {
                self.show_help = false;
            }
            return;
        }
        if self.show_logs {
            if matches!(key.code, KeyCode::F(12) | KeyCode::Esc | KeyCode::Char('q')) {
                self.show_logs = false;
            }
            return;
        }

        match self.focus {
            Focus::Search => self.handle_search_key(key),
            Focus::Rows => self.handle_rows_key(key),
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Enter => self.focus = Focus::Rows,
            KeyCode::F(1) => self.show_help = true,
            KeyCode::F(12) => self.show_logs = true,
            KeyCode::Tab => self.next_tab(),
            KeyCode::BackTab => self.previous_tab(),
            _ => {
                let before = self.search.value().to_string();
                self.search.handle_event(&Event::Key(key));
                if self.search.value() != before {
                    let query = self.search.value().to_string();
                    self.active_view_mut().set_search(query);
                    self.selected_row = 0;
                }
            }
        }
    }

    fn handle_rows_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::F(1) => self.show_help = true,
            KeyCode::F(12) => self.show_logs = true,
            KeyCode::Tab => self.next_tab(),
            KeyCode::BackTab => self.previous_tab(),
            KeyCode::Char('j') | KeyCode::Down => self.select_next_row(),
            KeyCode::Char('k') | KeyCode::Up => self.select_previous_row(),
            KeyCode::Char(']') | KeyCode::PageDown | KeyCode::Right => self.next_page(),
            KeyCode::Char('[') | KeyCode::PageUp | KeyCode::Left => self.previous_page(),
            KeyCode::Char('+') | KeyCode::Char('=') => self.grow_page_size(),
            KeyCode::Char('-') => self.shrink_page_size(),
            KeyCode::Char('c') => self.clear_search(),
            KeyCode::Char('y') => self.yank_selected_row(),
            KeyCode::Char(c @ '1'..='9') => {
                self.sort_by_column(c as usize - '1' as usize);
            }
            _ => {}
        }
    }

    /// Advance the banner clock. Transitions take one tick; the snap after
    /// a wrap resolves on the same tick it is entered, so the viewer never
    /// sees the repositioning.
    pub fn on_tick(&mut self) {
        if !self.config.display.show_banner || self.rates.len() <= 1 {
            return;
        }
        match self.banner.phase() {
            CarouselPhase::SteadyAt(_) => {
                self.ticks_since_rotation += 1;
                if self.ticks_since_rotation >= self.config.behavior.banner_interval_ticks {
                    self.banner.advance();
                    self.ticks_since_rotation = 0;
                }
            }
            CarouselPhase::TransitioningTo { .. } => {
                self.banner.animation_finished();
                self.banner.finish_snap();
            }
            CarouselPhase::SnappingTo(_) => self.banner.finish_snap(),
        }
    }

    // --- tab and view plumbing ---

    pub fn active_kind(&self) -> ListKind {
        self.tabs[self.active_tab].kind
    }

    pub fn active_view(&self) -> &ListView {
        &self.tabs[self.active_tab].view
    }

    pub fn active_view_mut(&mut self) -> &mut ListView {
        &mut self.tabs[self.active_tab].view
    }

    fn next_tab(&mut self) {
        if self.tabs.len() > 1 {
            self.active_tab = (self.active_tab + 1) % self.tabs.len();
            self.after_tab_switch();
        }
    }

    fn previous_tab(&mut self) {
        if self.tabs.len() > 1 {
            self.active_tab = (self.active_tab + self.tabs.len() - 1) % self.tabs.len();
            self.after_tab_switch();
        }
    }

    fn after_tab_switch(&mut self) {
        // Each tab keeps its own query; the search box follows along.
        self.search = Input::from(self.active_view().search_query().to_string());
        self.selected_row = 0;
        self.set_status(format!("Viewing {}", self.active_kind().title()));
    }

    fn select_next_row(&mut self) {
        let rows = self.active_view().page_view().rows.len();
        if rows > 0 && self.selected_row + 1 < rows {
            self.selected_row += 1;
        }
    }

    fn select_previous_row(&mut self) {
        self.selected_row = self.selected_row.saturating_sub(1);
    }

    fn next_page(&mut self) {
        self.active_view_mut().next_page();
        self.selected_row = 0;
    }

    fn previous_page(&mut self) {
        self.active_view_mut().previous_page();
        self.selected_row = 0;
    }

    fn grow_page_size(&mut self) {
        let current = self.active_view().page_size();
        if let Some(idx) = PAGE_SIZES.iter().position(|&s| s == current) {
            if idx + 1 < PAGE_SIZES.len() {
                self.apply_page_size(PAGE_SIZES[idx + 1]);
            }
        }
    }

    fn shrink_page_size(&mut self) {
        let current = self.active_view().page_size();
        if let Some(idx) = PAGE_SIZES.iter().position(|&s| s == current) {
            if idx > 0 {
                self.apply_page_size(PAGE_SIZES[idx - 1]);
            }
        }
    }

    fn apply_page_size(&mut self, size: usize) {
        match self.active_view_mut().set_page_size(size) {
            Ok(()) => {
                self.selected_row = 0;
                self.set_status(format!("Page size {}", size));
            }
            Err(e) => self.set_status(e.to_string()),
        }
    }

    fn clear_search(&mut self) {
        if !self.search.value().is_empty() {
            self.search = Input::default();
            self.active_view_mut().set_search("");
            self.selected_row = 0;
            self.set_status("Search cleared");
        }
    }

    fn sort_by_column(&mut self, column: usize) {
        let field = self
            .active_view()
            .records()
            .fields
            .get(column)
            .map(|f| f.name.clone());
        if let Some(field) = field {
            self.active_view_mut().toggle_sort(field);
            if let Some(spec) = self.active_view().sort_spec() {
                self.set_status(format!("Sort {} {}", spec.field, spec.order.indicator()));
            }
        }
    }

    fn yank_selected_row(&mut self) {
        let page = self.active_view().page_view();
        let Some(record) = page.rows.get(self.selected_row) else {
            return;
        };
        let line = record
            .values
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join("\t");

        // Clipboard trouble is worth a status line, never a crash.
        match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(line)) {
            Ok(()) => self.set_status("Row copied to clipboard"),
            Err(e) => self.set_status(format!("Clipboard error: {}", e)),
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
    }
}

/// Set up the terminal, run the app, and put the terminal back the way we
/// found it even when the app errors out.
pub fn run_tui(
    auth: AuthContext,
    config: Config,
    records: Vec<(ListKind, RecordSet)>,
    rates: Vec<RateCard>,
    log_buffer: LogBuffer,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(auth, config, records, rates, log_buffer);
    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err);
    }

    Ok(())
}
