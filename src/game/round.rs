//! Round controller
//!
//! A round owns its cards, their placement order and the single "last revealed"
//! tracker. Clicks arrive as element handles; the round maps them back to cards
//! and runs the reveal / match / auto-hide state machine.

use super::timer::{TimerEvent, TimerService};
use crate::core::{Card, CardId, ElementId, TimerHandle, generate_cards, shuffle};
use crate::view::GameView;
use rand::Rng;
use rustc_hash::FxHashMap;
use std::time::Duration;

/// Result of a click
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Nothing changed
    Ignored,
    /// The card was turned up without completing a pair
    Revealed,
    /// The card completed a pair
    Matched,
    /// The card completed the last pair; reported once per round
    Completed,
}

/// One playthrough from dealing to the last solved pair
#[derive(Debug)]
pub struct Round {
    /// Arena in generation order, indexed by `CardId`
    cards: Vec<Card>,
    /// Placement order on screen
    order: Vec<CardId>,
    elements: FxHashMap<ElementId, CardId>,
    last_revealed: Option<CardId>,
    solved_pairs: usize,
    pair_count: usize,
    hide_delay: Duration,
    completed: bool,
    clicks: u32,
    mismatches: u32,
}

impl Round {
    /// Deal a round: two cards per face, placement shuffled
    #[must_use]
    pub fn deal<V, R>(faces: &[String], hide_delay: Duration, view: &mut V, rng: &mut R) -> Self
    where
        V: GameView + ?Sized,
        R: Rng + ?Sized,
    {
        let cards = generate_cards(faces, view);
        let mut order: Vec<CardId> = (0..cards.len()).map(CardId::new).collect();
        shuffle(&mut order, rng);

        let elements = cards
            .iter()
            .enumerate()
            .map(|(index, card)| (card.element(), CardId::new(index)))
            .collect();

        tracing::debug!(pairs = faces.len(), "round dealt");

        Self {
            cards,
            order,
            elements,
            last_revealed: None,
            solved_pairs: 0,
            pair_count: faces.len(),
            hide_delay,
            completed: faces.is_empty(),
            clicks: 0,
            mismatches: 0,
        }
    }

    /// Append every card to the container in placement order and wire up clicks
    pub fn place<V: GameView + ?Sized>(&self, view: &mut V) {
        for &id in &self.order {
            let element = self.cards[id.index()].element();
            view.enable_clicks(element);
            view.append_card(element);
        }
    }

    /// Handle a click on a card element
    pub fn click<V, T>(&mut self, element: ElementId, view: &mut V, timers: &mut T) -> ClickOutcome
    where
        V: GameView + ?Sized,
        T: TimerService + ?Sized,
    {
        let Some(&id) = self.elements.get(&element) else {
            tracing::debug!(element = element.raw(), "click on unknown element");
            return ClickOutcome::Ignored;
        };
        self.click_card(id, view, timers)
    }

    /// Handle a click on a card by id
    pub fn click_card<V, T>(&mut self, id: CardId, view: &mut V, timers: &mut T) -> ClickOutcome
    where
        V: GameView + ?Sized,
        T: TimerService + ?Sized,
    {
        if self.completed {
            return ClickOutcome::Ignored;
        }
        let Some(card) = self.cards.get(id.index()) else {
            return ClickOutcome::Ignored;
        };
        // Solved and pending cards both ignore clicks; a pending card waits for its own timer
        if !card.is_hidden() {
            tracing::trace!(%id, state = ?card.state(), "click ignored");
            return ClickOutcome::Ignored;
        }

        self.clicks += 1;
        self.cards[id.index()].reveal();
        view.reveal(self.cards[id.index()].element());

        let value = self.cards[id.index()].value();
        match self.last_revealed {
            Some(previous) if self.cards[previous.index()].value() == value => {
                debug_assert_eq!(self.cards[previous.index()].paired(), id);
                self.resolve_match(previous, id, view, timers)
            }
            tracked => {
                if tracked.is_some() {
                    self.mismatches += 1;
                }
                self.track(id, timers);
                ClickOutcome::Revealed
            }
        }
    }

    fn resolve_match<V, T>(
        &mut self,
        previous: CardId,
        current: CardId,
        view: &mut V,
        timers: &mut T,
    ) -> ClickOutcome
    where
        V: GameView + ?Sized,
        T: TimerService + ?Sized,
    {
        if let Some(handle) = self.cards[previous.index()].take_timer() {
            timers.cancel(handle);
        }

        for id in [previous, current] {
            let card = &mut self.cards[id.index()];
            card.solve();
            view.solve(card.element());
        }

        self.last_revealed = None;
        self.solved_pairs += 1;
        tracing::debug!(
            value = self.cards[current.index()].value(),
            solved = self.solved_pairs,
            of = self.pair_count,
            "pair matched"
        );

        if self.solved_pairs == self.pair_count {
            self.completed = true;
            tracing::info!(clicks = self.clicks, mismatches = self.mismatches, "round complete");
            ClickOutcome::Completed
        } else {
            ClickOutcome::Matched
        }
    }

    fn track<T: TimerService + ?Sized>(&mut self, id: CardId, timers: &mut T) {
        let handle = timers.schedule(self.hide_delay, TimerEvent::HideCard(id));
        self.cards[id.index()].arm(handle);
        self.last_revealed = Some(id);
    }

    /// Hide timer fired for `id`
    ///
    /// Returns true if the card was turned face down. Stale handles and cards
    /// that were solved in the meantime are left alone.
    pub fn on_hide_timer<V: GameView + ?Sized>(
        &mut self,
        id: CardId,
        handle: TimerHandle,
        view: &mut V,
    ) -> bool {
        let Some(card) = self.cards.get_mut(id.index()) else {
            return false;
        };
        if !card.is_pending() || card.hide_timer() != Some(handle) {
            tracing::trace!(%id, "stale hide timer");
            return false;
        }

        card.hide();
        view.hide(card.element());
        if self.last_revealed == Some(id) {
            self.last_revealed = None;
        }
        true
    }

    /// Cancel every pending hide timer and forget the element mapping
    pub fn teardown<T: TimerService + ?Sized>(&mut self, timers: &mut T) {
        for card in &mut self.cards {
            if let Some(handle) = card.take_timer() {
                timers.cancel(handle);
            }
        }
        self.elements.clear();
        self.last_revealed = None;
    }

    /// Card behind an element, if it belongs to this round
    #[must_use]
    pub fn card_for(&self, element: ElementId) -> Option<CardId> {
        self.elements.get(&element).copied()
    }

    /// # Panics
    /// Panics if `id` does not belong to this round
    #[must_use]
    pub fn card(&self, id: CardId) -> &Card {
        &self.cards[id.index()]
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Card ids in on-screen order
    #[must_use]
    pub fn order(&self) -> &[CardId] {
        &self.order
    }

    #[must_use]
    pub const fn last_revealed(&self) -> Option<CardId> {
        self.last_revealed
    }

    #[must_use]
    pub const fn solved_pairs(&self) -> usize {
        self.solved_pairs
    }

    /// Solved cards, two per solved pair
    #[must_use]
    pub const fn solved_cards(&self) -> usize {
        self.solved_pairs * 2
    }

    #[must_use]
    pub const fn pair_count(&self) -> usize {
        self.pair_count
    }

    #[must_use]
    pub const fn is_complete(&self) -> bool {
        self.completed
    }

    /// Clicks that turned a card up
    #[must_use]
    pub const fn clicks(&self) -> u32 {
        self.clicks
    }

    /// Reveals that failed to match the tracked card
    #[must_use]
    pub const fn mismatches(&self) -> u32 {
        self.mismatches
    }
}
