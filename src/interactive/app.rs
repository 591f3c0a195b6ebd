//! TUI application state and logic

use super::terminal_view::{PageLayout, TerminalView, card_area, card_at};
use crate::config::{ConfigError, GameConfig};
use crate::core::Deck;
use crate::game::{ClickOutcome, MonotonicClock, Session, TimerQueue};
use crate::output::formatters::grid_columns;
use anyhow::Result;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend, layout::Rect};
use std::io;
use std::time::Duration;

/// Longest wait between two redraws
const FRAME_INTERVAL: Duration = Duration::from_millis(250);

#[derive(Debug, Clone)]
pub struct Message {
    pub text: String,
    pub style: MessageStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    Info,
    Success,
    Error,
}

/// Application state
pub struct App {
    pub session: Session,
    pub view: TerminalView,
    pub timers: TimerQueue,
    clock: MonotonicClock,
    /// Placement position of the highlighted card
    pub cursor: usize,
    /// Regions of the last drawn frame, used for mouse hit-testing
    pub layout: PageLayout,
    pub messages: Vec<Message>,
    pub should_quit: bool,
}

impl App {
    /// Create the app without dealing a round
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration does not fit the deck.
    pub fn new(config: GameConfig, deck: Deck) -> Result<Self, ConfigError> {
        let view = TerminalView::new(config.cheat);
        let session = Session::new(config, deck)?;

        Ok(Self {
            session,
            view,
            timers: TimerQueue::new(),
            clock: MonotonicClock::start(),
            cursor: 0,
            layout: PageLayout::default(),
            messages: vec![
                Message {
                    text: "Welcome! Find every pair of matching cards.".to_string(),
                    style: MessageStyle::Info,
                },
                Message {
                    text: "Press 's' or click Start to deal.".to_string(),
                    style: MessageStyle::Info,
                },
            ],
            should_quit: false,
        })
    }

    /// Advance the timer queue to the wall clock and fire what is due
    pub fn sync_timers(&mut self) {
        self.timers.advance_to(self.clock.now());
        self.session.dispatch_due(&mut self.timers, &mut self.view);
    }

    pub fn start_round(&mut self) {
        self.sync_timers();
        match self.session.start(&mut self.view, &mut self.timers) {
            Ok(()) => {
                self.cursor = 0;
                self.add_message(
                    &format!(
                        "Round {} dealt: {} pairs",
                        self.session.rounds_started(),
                        self.session.config().pair_count
                    ),
                    MessageStyle::Info,
                );
            }
            Err(err) => {
                tracing::error!(%err, "failed to deal a round");
                self.add_message(&format!("Cannot deal: {err}"), MessageStyle::Error);
            }
        }
    }

    /// Click the card at a placement position
    pub fn click_position(&mut self, position: usize) {
        let Some(element) = self.view.element_at(position) else {
            return;
        };
        self.sync_timers();

        let outcome = self.session.click(element, &mut self.view, &mut self.timers);
        match outcome {
            ClickOutcome::Matched => self.add_message("Match!", MessageStyle::Success),
            ClickOutcome::Completed => {
                let round = self.session.round();
                let clicks = round.map_or(0, crate::game::Round::clicks);
                self.add_message(
                    &format!(
                        "🎉 All pairs found in {} with {clicks} clicks!",
                        self.view.timer_text()
                    ),
                    MessageStyle::Success,
                );
                self.add_message("Press 'n' for a new round or 'q' to quit.", MessageStyle::Info);
            }
            ClickOutcome::Revealed | ClickOutcome::Ignored => {}
        }
    }

    pub fn click_cursor(&mut self) {
        self.click_position(self.cursor);
    }

    /// Move the cursor by whole cells, staying on the grid
    pub fn move_cursor(&mut self, dx: isize, dy: isize) {
        let count = self.view.placed().len();
        if count == 0 {
            return;
        }
        let columns = grid_columns(count) as isize;
        let target = self.cursor as isize + dx + dy * columns;
        let same_row =
            dy != 0 || target.div_euclid(columns) == (self.cursor as isize).div_euclid(columns);

        if (0..count as isize).contains(&target) && same_row {
            self.cursor = target as usize;
        }
    }

    pub fn toggle_cheat(&mut self) {
        self.view.toggle_cheat();
        let state = if self.view.cheat() { "on" } else { "off" };
        tracing::debug!(cheat = self.view.cheat(), "cheat toggled");
        self.add_message(&format!("Cheat mode {state}"), MessageStyle::Info);
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Only process key press events (fixes Windows double-input bug)
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char('s' | 'n') => self.start_round(),
            KeyCode::Char('c') => self.toggle_cheat(),
            KeyCode::Left | KeyCode::Char('h') => self.move_cursor(-1, 0),
            KeyCode::Right | KeyCode::Char('l') => self.move_cursor(1, 0),
            KeyCode::Up | KeyCode::Char('k') => self.move_cursor(0, -1),
            KeyCode::Down | KeyCode::Char('j') => self.move_cursor(0, 1),
            KeyCode::Enter if self.session.round().is_none() => self.start_round(),
            KeyCode::Enter | KeyCode::Char(' ') => self.click_cursor(),
            _ => {}
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let (column, row) = (mouse.column, mouse.row);

        if contains(self.layout.start_button, column, row) {
            self.start_round();
        } else if contains(self.layout.cheat, column, row) {
            self.toggle_cheat();
        } else if contains(self.layout.cards, column, row) {
            let count = self.view.placed().len();
            let area = card_area(self.layout.cards);
            if let Some(position) = card_at(area, count, grid_columns(count), column, row) {
                self.cursor = position;
                self.click_position(position);
            }
        }
    }

    pub fn add_message(&mut self, text: &str, style: MessageStyle) {
        self.messages.push(Message {
            text: text.to_string(),
            style,
        });

        // Keep only last 5 messages
        if self.messages.len() > 5 {
            self.messages.remove(0);
        }
    }

    /// How long the event loop may block before the next timer is due
    #[must_use]
    pub fn poll_timeout(&self) -> Duration {
        self.timers
            .next_deadline()
            .map_or(FRAME_INTERVAL, |deadline| {
                deadline.saturating_sub(self.clock.now()).min(FRAME_INTERVAL)
            })
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Run the TUI application
///
/// # Errors
///
/// Returns an error if terminal setup/cleanup fails, the terminal is too
/// small for a screen region, or there's an I/O error during rendering or
/// event handling.
pub fn run_tui(app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

fn terminal_area<B: ratatui::backend::Backend>(terminal: &Terminal<B>) -> Result<Rect> {
    let size = terminal.size()?;
    Ok(Rect::new(0, 0, size.width, size.height))
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<()> {
    // Every region must exist before the game can be played
    app.layout = PageLayout::compute(terminal_area(terminal)?);
    app.layout.require_all()?;
    tracing::info!(layout = ?app.layout, "screen regions located");

    loop {
        app.sync_timers();
        app.layout = PageLayout::compute(terminal_area(terminal)?);
        terminal.draw(|f| super::rendering::ui(f, &app))?;

        if event::poll(app.poll_timeout())? {
            match event::read()? {
                Event::Key(key) => app.handle_key(key),
                Event::Mouse(mouse) => app.handle_mouse(mouse),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
