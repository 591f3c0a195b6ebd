//! Simulate command
//!
//! Plays rounds headlessly with a bot on virtual time and reports how many
//! clicks and seconds each round took.

use crate::config::{ConfigError, GameConfig};
use crate::core::{Deck, DeckError, ElementId};
use crate::game::{ClickOutcome, Session, TimerQueue, TimerService};
use crate::view::HeadlessView;
use rand::SeedableRng;
use rand::prelude::IndexedRandom;
use rand::rngs::StdRng;
use rustc_hash::FxHashMap;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Clicks allowed per card before a round counts as stuck
const CLICK_BUDGET_PER_CARD: usize = 200;

/// How the bot picks its next card
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotKind {
    /// Remembers every face it has seen
    Memory,
    /// Clicks a random face-down card
    Random,
}

impl BotKind {
    /// Create a bot kind from its name
    ///
    /// Supported names: "memory", "random". Defaults to memory if unrecognized.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "random" => Self::Random,
            _ => Self::Memory,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Random => "random",
        }
    }
}

/// Simulation parameters
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub rounds: usize,
    pub bot: BotKind,
    /// Virtual time between two clicks
    pub click_interval: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            rounds: 20,
            bot: BotKind::Memory,
            click_interval: Duration::from_millis(700),
        }
    }
}

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Deck(#[from] DeckError),

    #[error("round {round} did not finish within {clicks} clicks")]
    Stalled { round: usize, clicks: usize },
}

/// One simulated round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundReport {
    pub seconds: u64,
    pub clicks: u32,
    pub mismatches: u32,
}

/// Result of a simulation run
#[derive(Debug, Clone)]
pub struct SimulationResult {
    pub bot: BotKind,
    pub pair_count: usize,
    pub rounds: Vec<RoundReport>,
    pub average_clicks: f64,
    pub average_seconds: f64,
    pub min_clicks: u32,
    pub max_clicks: u32,
    /// Rounds solved without a single mismatch
    pub flawless_rounds: usize,
    pub duration: Duration,
}

/// Run `sim.rounds` rounds with the configured bot
///
/// # Errors
///
/// Returns `SimulationError` if the configuration does not fit the deck or a
/// round exceeds its click budget.
pub fn run_simulation(
    game: &GameConfig,
    deck: &Deck,
    sim: &SimulationConfig,
) -> Result<SimulationResult, SimulationError> {
    let started = Instant::now();
    let mut session = Session::new(game.clone(), deck.clone())?;
    let mut view = HeadlessView::new();
    let mut timers = TimerQueue::new();
    let mut rng = match game.seed {
        Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(1)),
        None => StdRng::from_os_rng(),
    };

    let mut rounds = Vec::with_capacity(sim.rounds);

    for round_number in 1..=sim.rounds {
        session.start(&mut view, &mut timers)?;
        let mut bot = Bot::new(sim.bot);
        let budget = view.placed().len() * CLICK_BUDGET_PER_CARD;
        let mut attempts = 0;

        while session.is_running() {
            if attempts >= budget {
                return Err(SimulationError::Stalled {
                    round: round_number,
                    clicks: attempts,
                });
            }
            attempts += 1;

            timers.advance_to(timers.now() + sim.click_interval);
            session.dispatch_due(&mut timers, &mut view);

            let Some(element) = bot.choose(&view, &mut rng) else {
                continue;
            };
            let outcome = session.click(element, &mut view, &mut timers);
            bot.observe(&view, element, outcome);
        }

        let round = session
            .round()
            .map(|round| RoundReport {
                seconds: session.elapsed_seconds(timers.now()),
                clicks: round.clicks(),
                mismatches: round.mismatches(),
            })
            .unwrap_or_default();
        tracing::debug!(round = round_number, ?round, "simulated round finished");
        rounds.push(round);
    }

    Ok(summarize(sim.bot, game.pair_count, rounds, started.elapsed()))
}

fn summarize(
    bot: BotKind,
    pair_count: usize,
    rounds: Vec<RoundReport>,
    duration: Duration,
) -> SimulationResult {
    let count = rounds.len().max(1) as f64;
    let total_clicks: u64 = rounds.iter().map(|r| u64::from(r.clicks)).sum();
    let total_seconds: u64 = rounds.iter().map(|r| r.seconds).sum();

    SimulationResult {
        bot,
        pair_count,
        average_clicks: total_clicks as f64 / count,
        average_seconds: total_seconds as f64 / count,
        min_clicks: rounds.iter().map(|r| r.clicks).min().unwrap_or(0),
        max_clicks: rounds.iter().map(|r| r.clicks).max().unwrap_or(0),
        flawless_rounds: rounds.iter().filter(|r| r.mismatches == 0).count(),
        rounds,
        duration,
    }
}

/// A player that only sees what the view shows
struct Bot {
    kind: BotKind,
    /// Faces seen on cards that are not solved yet
    seen: FxHashMap<ElementId, String>,
    /// Card turned up by the previous click, if it is still waiting for a partner
    open: Option<ElementId>,
}

impl Bot {
    fn new(kind: BotKind) -> Self {
        Self {
            kind,
            seen: FxHashMap::default(),
            open: None,
        }
    }

    fn choose(&mut self, view: &HeadlessView, rng: &mut StdRng) -> Option<ElementId> {
        let face_down: Vec<ElementId> = view
            .placed()
            .iter()
            .copied()
            .filter(|&el| view.element(el).is_some_and(|card| card.clickable && !card.face_up))
            .collect();

        match self.kind {
            BotKind::Random => face_down.choose(rng).copied(),
            BotKind::Memory => self.recall(view, &face_down).or_else(|| {
                let unseen: Vec<ElementId> = face_down
                    .iter()
                    .copied()
                    .filter(|el| !self.seen.contains_key(el))
                    .collect();
                unseen.choose(rng).or_else(|| face_down.choose(rng)).copied()
            }),
        }
    }

    /// A face-down card whose partner is known
    fn recall(&self, view: &HeadlessView, face_down: &[ElementId]) -> Option<ElementId> {
        // Finish the open card first
        let still_open =
            |el: &ElementId| view.element(*el).is_some_and(|c| c.face_up && !c.solved);
        if let Some(open) = self.open.filter(still_open) {
            let value = self.seen.get(&open)?;
            return face_down
                .iter()
                .copied()
                .find(|el| *el != open && self.seen.get(el) == Some(value));
        }

        // Otherwise start a pair where both faces are known
        face_down.iter().copied().find(|el| {
            self.seen.get(el).is_some_and(|value| {
                face_down
                    .iter()
                    .any(|other| other != el && self.seen.get(other) == Some(value))
            })
        })
    }

    fn observe(&mut self, view: &HeadlessView, clicked: ElementId, outcome: ClickOutcome) {
        match outcome {
            ClickOutcome::Ignored => {}
            ClickOutcome::Revealed => {
                if let Some(card) = view.element(clicked) {
                    self.seen.insert(clicked, card.text.clone());
                }
                self.open = Some(clicked);
            }
            ClickOutcome::Matched | ClickOutcome::Completed => {
                if let Some(card) = view.element(clicked) {
                    let value = card.text.clone();
                    self.seen.retain(|_, seen| *seen != value);
                }
                self.open = None;
            }
        }
    }
}
