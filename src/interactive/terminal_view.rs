//! Terminal view and screen regions
//!
//! [`TerminalView`] keeps what the TUI draws. [`PageLayout`] splits the
//! terminal into named regions that are looked up by id, the way a page
//! would look up its elements.

use crate::core::ElementId;
use crate::output::formatters::format_clock;
use crate::view::{GameView, HeadlessCard, HeadlessView};
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::widgets::{Block, Borders};
use thiserror::Error;

/// Regions every frame needs, in lookup order
pub const REGION_IDS: [&str; 5] = ["cards", "btn-start", "timer", "applause", "cheat"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ViewError {
    #[error("screen region `{0}` is missing; the terminal is too small")]
    MissingElement(String),
}

/// Named screen regions for one terminal size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageLayout {
    pub header: Rect,
    pub cards: Rect,
    pub timer: Rect,
    pub start_button: Rect,
    pub cheat: Rect,
    pub applause: Rect,
    pub status: Rect,
}

impl PageLayout {
    #[must_use]
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(8),    // Board
                Constraint::Length(3), // Status bar
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
            .split(rows[1]);

        let side = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
            ])
            .split(columns[1]);

        Self {
            header: rows[0],
            cards: columns[0],
            timer: side[0],
            start_button: side[1],
            cheat: side[2],
            applause: side[3],
            status: rows[2],
        }
    }

    /// Region by id
    ///
    /// # Errors
    /// Returns `ViewError::MissingElement` for an unknown id or a region too
    /// small to draw.
    pub fn locate(&self, id: &str) -> Result<Rect, ViewError> {
        let (rect, min_width, min_height) = match id {
            "cards" => (self.cards, 20, 8),
            "btn-start" => (self.start_button, 12, 3),
            "timer" => (self.timer, 12, 3),
            "applause" => (self.applause, 12, 3),
            "cheat" => (self.cheat, 12, 3),
            _ => return Err(ViewError::MissingElement(id.to_string())),
        };

        if rect.width < min_width || rect.height < min_height {
            return Err(ViewError::MissingElement(id.to_string()));
        }
        Ok(rect)
    }

    /// Check every region in [`REGION_IDS`]
    ///
    /// # Errors
    /// Returns the first region that is missing.
    pub fn require_all(&self) -> Result<(), ViewError> {
        for id in REGION_IDS {
            self.locate(id)?;
        }
        Ok(())
    }
}

/// Inside of the bordered card panel
#[must_use]
pub fn card_area(region: Rect) -> Rect {
    Block::default().borders(Borders::ALL).inner(region)
}

/// Card cells for `count` cards in `columns` columns, in placement order
#[must_use]
pub fn card_rects(area: Rect, count: usize, columns: usize) -> Vec<Rect> {
    if count == 0 || area.width == 0 || area.height == 0 {
        return Vec::new();
    }
    let columns = columns.max(1);
    let rows = count.div_ceil(columns);
    let cell_width = (area.width / columns as u16).max(1);
    let cell_height = (area.height / rows as u16).max(1);

    (0..count)
        .map(|i| {
            let column = (i % columns) as u16;
            let row = (i / columns) as u16;
            Rect::new(
                area.x + column * cell_width,
                area.y + row * cell_height,
                cell_width.saturating_sub(1).max(1),
                cell_height,
            )
            .intersection(area)
        })
        .collect()
}

/// Position of the card cell under a terminal cell
#[must_use]
pub fn card_at(area: Rect, count: usize, columns: usize, column: u16, row: u16) -> Option<usize> {
    card_rects(area, count, columns).iter().position(|rect| {
        column >= rect.x
            && column < rect.x + rect.width
            && row >= rect.y
            && row < rect.y + rect.height
    })
}

/// What the TUI draws: the in-memory view plus the cheat toggle
#[derive(Debug, Clone)]
pub struct TerminalView {
    inner: HeadlessView,
    cheat: bool,
}

impl TerminalView {
    #[must_use]
    pub fn new(cheat: bool) -> Self {
        Self {
            inner: HeadlessView::new(),
            cheat,
        }
    }

    #[must_use]
    pub fn tile(&self, element: ElementId) -> Option<&HeadlessCard> {
        self.inner.element(element)
    }

    /// Cards in placement order
    pub fn tiles(&self) -> impl Iterator<Item = &HeadlessCard> + '_ {
        self.inner.cards()
    }

    #[must_use]
    pub fn placed(&self) -> &[ElementId] {
        self.inner.placed()
    }

    #[must_use]
    pub fn element_at(&self, position: usize) -> Option<ElementId> {
        self.inner.element_at(position)
    }

    #[must_use]
    pub fn timer_text(&self) -> String {
        format_clock(self.inner.timer_seconds())
    }

    #[must_use]
    pub const fn applause_visible(&self) -> bool {
        self.inner.applause_visible()
    }

    #[must_use]
    pub const fn cheat(&self) -> bool {
        self.cheat
    }

    pub fn toggle_cheat(&mut self) {
        self.cheat = !self.cheat;
    }
}

impl GameView for TerminalView {
    fn create_card(&mut self, text: &str) -> ElementId {
        self.inner.create_card(text)
    }

    fn hide(&mut self, element: ElementId) {
        self.inner.hide(element);
    }

    fn reveal(&mut self, element: ElementId) {
        self.inner.reveal(element);
    }

    fn solve(&mut self, element: ElementId) {
        self.inner.solve(element);
    }

    fn enable_clicks(&mut self, element: ElementId) {
        self.inner.enable_clicks(element);
    }

    fn append_card(&mut self, element: ElementId) {
        self.inner.append_card(element);
    }

    fn clear_cards(&mut self) {
        self.inner.clear_cards();
    }

    fn update_timer(&mut self, seconds: u64) {
        self.inner.update_timer(seconds);
    }

    fn show_applause(&mut self) {
        self.inner.show_applause();
    }

    fn hide_applause(&mut self) {
        self.inner.hide_applause();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_terminal_has_every_region() {
        let layout = PageLayout::compute(Rect::new(0, 0, 80, 24));
        assert!(layout.require_all().is_ok());
        assert_eq!(layout.locate("cards").unwrap(), layout.cards);
        assert_eq!(layout.locate("btn-start").unwrap(), layout.start_button);
    }

    #[test]
    fn tiny_terminal_reports_missing_region() {
        let layout = PageLayout::compute(Rect::new(0, 0, 30, 6));
        assert_eq!(
            layout.require_all(),
            Err(ViewError::MissingElement("cards".to_string()))
        );
    }

    #[test]
    fn unknown_region_is_missing() {
        let layout = PageLayout::compute(Rect::new(0, 0, 80, 24));
        assert_eq!(
            layout.locate("scoreboard"),
            Err(ViewError::MissingElement("scoreboard".to_string()))
        );
    }

    #[test]
    fn card_rects_fill_rows_left_to_right() {
        let rects = card_rects(Rect::new(0, 0, 40, 20), 6, 3);
        assert_eq!(rects.len(), 6);
        assert_eq!(rects[0].x, 0);
        assert_eq!(rects[1].x, 13);
        assert_eq!(rects[3].y, 10);
        assert_eq!(rects[3].x, 0);
    }

    #[test]
    fn card_rects_empty_cases() {
        assert!(card_rects(Rect::new(0, 0, 40, 20), 0, 3).is_empty());
        assert!(card_rects(Rect::new(0, 0, 0, 0), 4, 2).is_empty());
    }

    #[test]
    fn hit_test_matches_card_rects() {
        let area = Rect::new(2, 3, 40, 20);
        assert_eq!(card_at(area, 4, 2, 2, 3), Some(0));
        assert_eq!(card_at(area, 4, 2, 25, 3), Some(1));
        assert_eq!(card_at(area, 4, 2, 2, 14), Some(2));
        // Gap between columns
        assert_eq!(card_at(area, 4, 2, 21, 3), None);
        assert_eq!(card_at(area, 4, 2, 0, 0), None);
    }

    #[test]
    fn view_mirrors_card_flags() {
        let mut view = TerminalView::new(false);
        let a = view.create_card("🐙");
        let b = view.create_card("🐙");
        view.enable_clicks(a);
        view.append_card(a);
        view.append_card(b);

        view.reveal(a);
        assert!(view.tile(a).unwrap().face_up);
        view.hide(a);
        assert!(!view.tile(a).unwrap().face_up);
        view.solve(b);
        assert!(view.tile(b).unwrap().solved);
        assert!(view.tile(a).unwrap().clickable);
        assert_eq!(view.tiles().count(), 2);
    }

    #[test]
    fn new_round_replaces_tiles() {
        let mut view = TerminalView::new(false);
        let a = view.create_card("x");
        view.append_card(a);
        view.clear_cards();
        assert!(view.placed().is_empty());
        assert!(view.tile(a).is_none());

        let b = view.create_card("y");
        view.append_card(b);
        assert_ne!(a, b);
        assert_eq!(view.tiles().count(), 1);
    }

    #[test]
    fn timer_and_applause() {
        let mut view = TerminalView::new(true);
        assert_eq!(view.timer_text(), "00:00");
        view.update_timer(83);
        assert_eq!(view.timer_text(), "01:23");

        view.show_applause();
        assert!(view.applause_visible());
        view.hide_applause();
        assert!(!view.applause_visible());

        assert!(view.cheat());
        view.toggle_cheat();
        assert!(!view.cheat());
    }
}
