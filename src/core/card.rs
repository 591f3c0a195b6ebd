//! Card representation
//!
//! A card carries its face value, its state in the round, a link to the other
//! card of its pair and the handles of its visual element and pending hide timer.

use super::handle::{CardId, ElementId, TimerHandle};

/// State of a single card within a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardState {
    /// Face down
    Hidden,
    /// Face up, waiting for either a match or its hide timer
    Pending,
    /// Matched; stays face up for the rest of the round
    Solved,
}

/// A card in a round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    value: String,
    state: CardState,
    paired: CardId,
    element: ElementId,
    hide_timer: Option<TimerHandle>,
}

impl Card {
    /// Create a face-down card linked to its counterpart
    #[must_use]
    pub fn new(value: impl Into<String>, paired: CardId, element: ElementId) -> Self {
        Self {
            value: value.into(),
            state: CardState::Hidden,
            paired,
            element,
            hide_timer: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> CardState {
        self.state
    }

    /// The other card carrying the same value
    #[inline]
    #[must_use]
    pub const fn paired(&self) -> CardId {
        self.paired
    }

    #[inline]
    #[must_use]
    pub const fn element(&self) -> ElementId {
        self.element
    }

    #[inline]
    #[must_use]
    pub const fn hide_timer(&self) -> Option<TimerHandle> {
        self.hide_timer
    }

    #[inline]
    #[must_use]
    pub const fn is_hidden(&self) -> bool {
        matches!(self.state, CardState::Hidden)
    }

    #[inline]
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self.state, CardState::Pending)
    }

    #[inline]
    #[must_use]
    pub const fn is_solved(&self) -> bool {
        matches!(self.state, CardState::Solved)
    }

    /// Whether the face is currently visible
    #[inline]
    #[must_use]
    pub const fn is_face_up(&self) -> bool {
        !self.is_hidden()
    }

    pub(crate) fn reveal(&mut self) {
        debug_assert!(self.is_hidden(), "only hidden cards can be revealed");
        self.state = CardState::Pending;
    }

    pub(crate) fn hide(&mut self) {
        debug_assert!(!self.is_solved(), "solved cards never hide");
        self.state = CardState::Hidden;
        self.hide_timer = None;
    }

    pub(crate) fn solve(&mut self) {
        self.state = CardState::Solved;
        self.hide_timer = None;
    }

    pub(crate) fn arm(&mut self, handle: TimerHandle) {
        self.hide_timer = Some(handle);
    }

    pub(crate) fn take_timer(&mut self) -> Option<TimerHandle> {
        self.hide_timer.take()
    }
}
