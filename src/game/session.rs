//! Session controller
//!
//! Owns the active round, the round's start time and the recurring display
//! tick. Starting again replaces the round; completing it stops the tick and
//! shows the celebration.

use super::round::{ClickOutcome, Round};
use super::timer::{TimerEvent, TimerQueue, TimerService};
use crate::config::{ConfigError, GameConfig};
use crate::core::{Deck, DeckError, ElementId, TimerHandle};
use crate::view::GameView;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;

/// Game lifecycle across rounds
#[derive(Debug)]
pub struct Session {
    config: GameConfig,
    deck: Deck,
    rng: StdRng,
    round: Option<Round>,
    started_at: Duration,
    finished_at: Option<Duration>,
    tick: Option<TimerHandle>,
    rounds_started: u32,
    rounds_completed: u32,
}

impl Session {
    /// Create a session without a round
    ///
    /// # Errors
    /// Returns `ConfigError` if the configuration does not fit the deck.
    pub fn new(config: GameConfig, deck: Deck) -> Result<Self, ConfigError> {
        config.validate(&deck)?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        Ok(Self {
            config,
            deck,
            rng,
            round: None,
            started_at: Duration::ZERO,
            finished_at: None,
            tick: None,
            rounds_started: 0,
            rounds_completed: 0,
        })
    }

    /// Start a new round, replacing the current one
    ///
    /// # Errors
    /// Returns `DeckError` if the deck cannot supply the configured pairs.
    pub fn start<V, T>(&mut self, view: &mut V, timers: &mut T) -> Result<(), DeckError>
    where
        V: GameView + ?Sized,
        T: TimerService + ?Sized,
    {
        self.stop(timers);
        view.clear_cards();
        view.hide_applause();
        view.update_timer(0);

        let faces = self.deck.draw(self.config.pair_count, &mut self.rng)?;
        let round = Round::deal(&faces, self.config.hide_delay, view, &mut self.rng);
        round.place(view);

        self.round = Some(round);
        self.started_at = timers.now();
        self.finished_at = None;
        self.tick = Some(timers.schedule(self.config.tick_interval, TimerEvent::Tick));
        self.rounds_started += 1;

        tracing::info!(
            round = self.rounds_started,
            pairs = self.config.pair_count,
            "round started"
        );
        Ok(())
    }

    /// Cancel the running round's timers without celebrating
    pub fn stop<T: TimerService + ?Sized>(&mut self, timers: &mut T) {
        if let Some(handle) = self.tick.take() {
            timers.cancel(handle);
        }
        if let Some(round) = self.round.as_mut() {
            round.teardown(timers);
        }
    }

    /// Route a click to the active round
    pub fn click<V, T>(&mut self, element: ElementId, view: &mut V, timers: &mut T) -> ClickOutcome
    where
        V: GameView + ?Sized,
        T: TimerService + ?Sized,
    {
        let Some(round) = self.round.as_mut() else {
            return ClickOutcome::Ignored;
        };

        let outcome = round.click(element, view, timers);
        if outcome == ClickOutcome::Completed {
            self.finish(view, timers);
        }
        outcome
    }

    fn finish<V, T>(&mut self, view: &mut V, timers: &mut T)
    where
        V: GameView + ?Sized,
        T: TimerService + ?Sized,
    {
        if let Some(handle) = self.tick.take() {
            timers.cancel(handle);
        }

        let now = timers.now();
        self.finished_at = Some(now);
        self.rounds_completed += 1;

        let seconds = self.elapsed_seconds(now);
        view.update_timer(seconds);
        view.show_applause();

        tracing::info!(seconds, completed = self.rounds_completed, "round won");
    }

    /// Handle a fired timer
    pub fn on_timer<V, T>(
        &mut self,
        handle: TimerHandle,
        event: TimerEvent,
        view: &mut V,
        timers: &mut T,
    ) where
        V: GameView + ?Sized,
        T: TimerService + ?Sized,
    {
        match event {
            TimerEvent::HideCard(id) => {
                if let Some(round) = self.round.as_mut() {
                    round.on_hide_timer(id, handle, view);
                }
            }
            TimerEvent::Tick => {
                if self.tick != Some(handle) {
                    return;
                }
                view.update_timer(self.elapsed_seconds(timers.now()));
                self.tick = Some(timers.schedule(self.config.tick_interval, TimerEvent::Tick));
            }
        }
    }

    /// Fire every timer due at the queue's current time; returns how many fired
    pub fn dispatch_due<V: GameView + ?Sized>(
        &mut self,
        timers: &mut TimerQueue,
        view: &mut V,
    ) -> usize {
        let mut fired = 0;
        while let Some((handle, event)) = timers.pop_due() {
            self.on_timer(handle, event, view, timers);
            fired += 1;
        }
        fired
    }

    /// Whole seconds since the round started, frozen once it is won
    #[must_use]
    pub fn elapsed_seconds(&self, now: Duration) -> u64 {
        if self.round.is_none() {
            return 0;
        }
        let end = self.finished_at.unwrap_or(now);
        end.saturating_sub(self.started_at).as_secs()
    }

    #[must_use]
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    /// A round is dealt and not yet won
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.round.as_ref().is_some_and(|round| !round.is_complete())
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.finished_at.is_some()
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub const fn rounds_started(&self) -> u32 {
        self.rounds_started
    }

    #[must_use]
    pub const fn rounds_completed(&self) -> u32 {
        self.rounds_completed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CardId;
    use crate::view::HeadlessView;

    fn session(pairs: usize) -> Session {
        let config = GameConfig {
            pair_count: pairs,
            seed: Some(3),
            ..GameConfig::default()
        };
        Session::new(config, Deck::numbered(pairs)).unwrap()
    }

    fn advance(
        session: &mut Session,
        timers: &mut TimerQueue,
        view: &mut HeadlessView,
        millis: u64,
    ) {
        let now = timers.now() + Duration::from_millis(millis);
        timers.advance_to(now);
        session.dispatch_due(timers, view);
    }

    /// Elements of the cards with generation index `index`
    fn element(session: &Session, index: usize) -> ElementId {
        session.round().unwrap().card(CardId::new(index)).element()
    }

    fn solve_all(
        session: &mut Session,
        timers: &mut TimerQueue,
        view: &mut HeadlessView,
    ) -> Vec<ClickOutcome> {
        let count = session.round().unwrap().cards().len();
        (0..count)
            .map(|index| {
                let el = element(session, index);
                session.click(el, view, timers)
            })
            .collect()
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = GameConfig {
            pair_count: 6,
            ..GameConfig::default()
        };
        assert!(matches!(
            Session::new(config, Deck::numbered(5)),
            Err(ConfigError::TooManyPairs { .. })
        ));
    }

    #[test]
    fn start_deals_and_resets_display() {
        let mut session = session(3);
        let mut view = HeadlessView::new();
        let mut timers = TimerQueue::new();

        session.start(&mut view, &mut timers).unwrap();

        assert!(session.is_running());
        assert_eq!(view.placed().len(), 6);
        assert_eq!(view.timer_seconds(), 0);
        assert!(!view.applause_visible());
        assert_eq!(timers.len(), 1, "only the tick is pending");
    }

    #[test]
    fn click_before_start_is_ignored() {
        let mut session = session(2);
        let mut view = HeadlessView::new();
        let mut timers = TimerQueue::new();
        assert_eq!(
            session.click(ElementId::new(0), &mut view, &mut timers),
            ClickOutcome::Ignored
        );
    }

    #[test]
    fn tick_updates_elapsed_seconds() {
        let mut session = session(2);
        let mut view = HeadlessView::new();
        let mut timers = TimerQueue::new();
        session.start(&mut view, &mut timers).unwrap();

        advance(&mut session, &mut timers, &mut view, 1000);
        assert_eq!(view.timer_seconds(), 1);

        advance(&mut session, &mut timers, &mut view, 1500);
        assert_eq!(view.timer_seconds(), 2);
        assert_eq!(session.elapsed_seconds(timers.now()), 2);
    }

    #[test]
    fn winning_stops_tick_and_shows_applause() {
        let mut session = session(2);
        let mut view = HeadlessView::new();
        let mut timers = TimerQueue::new();
        session.start(&mut view, &mut timers).unwrap();
        advance(&mut session, &mut timers, &mut view, 4200);

        let outcomes = solve_all(&mut session, &mut timers, &mut view);
        let completions = outcomes
            .iter()
            .filter(|o| **o == ClickOutcome::Completed)
            .count();
        assert_eq!(completions, 1);

        assert!(session.is_won());
        assert!(!session.is_running());
        assert!(view.applause_visible());
        assert_eq!(view.timer_seconds(), 4);
        assert!(timers.is_empty());

        let updates = view.timer_updates();
        advance(&mut session, &mut timers, &mut view, 10_000);
        assert_eq!(view.timer_updates(), updates, "tick stopped");
        assert_eq!(session.elapsed_seconds(timers.now()), 4);
        assert_eq!(session.rounds_completed(), 1);
    }

    #[test]
    fn restart_replaces_round_and_cancels_timers() {
        let mut session = session(2);
        let mut view = HeadlessView::new();
        let mut timers = TimerQueue::new();
        session.start(&mut view, &mut timers).unwrap();

        let first = element(&session, 0);
        session.click(first, &mut view, &mut timers);
        assert_eq!(timers.len(), 2);

        session.start(&mut view, &mut timers).unwrap();
        assert_eq!(timers.len(), 1, "old hide timer and tick are gone");
        assert_eq!(view.placed().len(), 4);
        assert!(!view.placed().contains(&first));
        assert_eq!(session.rounds_started(), 2);

        // Elements of the old round no longer map to anything
        assert_eq!(
            session.click(first, &mut view, &mut timers),
            ClickOutcome::Ignored
        );
    }

    #[test]
    fn restart_after_win_hides_applause() {
        let mut session = session(1);
        let mut view = HeadlessView::new();
        let mut timers = TimerQueue::new();
        session.start(&mut view, &mut timers).unwrap();
        solve_all(&mut session, &mut timers, &mut view);
        assert!(view.applause_visible());

        advance(&mut session, &mut timers, &mut view, 5000);
        session.start(&mut view, &mut timers).unwrap();
        assert!(!view.applause_visible());
        assert!(!session.is_won());
        assert_eq!(view.timer_seconds(), 0);
        assert_eq!(session.elapsed_seconds(timers.now()), 0);
    }

    #[test]
    fn hide_timer_routes_to_round() {
        let mut session = session(2);
        let mut view = HeadlessView::new();
        let mut timers = TimerQueue::new();
        session.start(&mut view, &mut timers).unwrap();

        let el = element(&session, 0);
        session.click(el, &mut view, &mut timers);
        assert!(view.element(el).unwrap().face_up);

        advance(&mut session, &mut timers, &mut view, 3000);
        assert!(!view.element(el).unwrap().face_up);
    }

    #[test]
    fn seeded_sessions_deal_identically() {
        let mut a = session(5);
        let mut b = session(5);
        let (mut va, mut vb) = (HeadlessView::new(), HeadlessView::new());
        let (mut ta, mut tb) = (TimerQueue::new(), TimerQueue::new());
        a.start(&mut va, &mut ta).unwrap();
        b.start(&mut vb, &mut tb).unwrap();

        assert_eq!(a.round().unwrap().order(), b.round().unwrap().order());
    }
}
