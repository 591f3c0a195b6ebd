//! In-memory view
//!
//! Records what a screen would show. Used by the line mode, the simulator and tests.

use super::GameView;
use crate::core::ElementId;

/// Display state of one card element
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessCard {
    pub text: String,
    pub face_up: bool,
    pub solved: bool,
    pub clickable: bool,
}

/// A view without a screen
#[derive(Debug, Clone, Default)]
pub struct HeadlessView {
    /// Cards of the current round; index 0 holds id `first_id`
    elements: Vec<HeadlessCard>,
    first_id: u32,
    container: Vec<ElementId>,
    timer_seconds: u64,
    applause: bool,
    /// Times the timer display was pushed, including resets
    timer_updates: usize,
}

impl HeadlessView {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Element state, or `None` for an id that is not on the table
    #[must_use]
    pub fn element(&self, element: ElementId) -> Option<&HeadlessCard> {
        let index = element.raw().checked_sub(self.first_id)?;
        self.elements.get(index as usize)
    }

    /// Cards in container order
    pub fn cards(&self) -> impl Iterator<Item = &HeadlessCard> + '_ {
        self.container.iter().filter_map(|&element| self.element(element))
    }

    /// Card elements currently held
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Elements in container order
    #[must_use]
    pub fn placed(&self) -> &[ElementId] {
        &self.container
    }

    /// Element at a container position
    #[must_use]
    pub fn element_at(&self, position: usize) -> Option<ElementId> {
        self.container.get(position).copied()
    }

    #[must_use]
    pub const fn timer_seconds(&self) -> u64 {
        self.timer_seconds
    }

    #[must_use]
    pub const fn timer_updates(&self) -> usize {
        self.timer_updates
    }

    #[must_use]
    pub const fn applause_visible(&self) -> bool {
        self.applause
    }

    fn element_mut(&mut self, element: ElementId) -> Option<&mut HeadlessCard> {
        let index = element.raw().checked_sub(self.first_id)?;
        self.elements.get_mut(index as usize)
    }
}

impl GameView for HeadlessView {
    fn create_card(&mut self, text: &str) -> ElementId {
        let id = ElementId::new(self.first_id + self.elements.len() as u32);
        self.elements.push(HeadlessCard {
            text: text.to_string(),
            face_up: false,
            solved: false,
            clickable: false,
        });
        id
    }

    fn hide(&mut self, element: ElementId) {
        if let Some(card) = self.element_mut(element) {
            card.face_up = false;
        }
    }

    fn reveal(&mut self, element: ElementId) {
        if let Some(card) = self.element_mut(element) {
            card.face_up = true;
        }
    }

    fn solve(&mut self, element: ElementId) {
        if let Some(card) = self.element_mut(element) {
            card.face_up = true;
            card.solved = true;
        }
    }

    fn enable_clicks(&mut self, element: ElementId) {
        if let Some(card) = self.element_mut(element) {
            card.clickable = true;
        }
    }

    fn append_card(&mut self, element: ElementId) {
        self.container.push(element);
    }

    fn clear_cards(&mut self) {
        // Ids keep counting so a stale id never resolves to a new card
        self.first_id += self.elements.len() as u32;
        self.elements.clear();
        self.container.clear();
    }

    fn update_timer(&mut self, seconds: u64) {
        self.timer_seconds = seconds;
        self.timer_updates += 1;
    }

    fn show_applause(&mut self) {
        self.applause = true;
    }

    fn hide_applause(&mut self) {
        self.applause = false;
    }
}
