//! Core domain types for the memory game
//!
//! Cards, their identities, decks of faces and the shuffle. Nothing here knows
//! about timers or rounds.

mod card;
mod deck;
mod handle;
mod shuffle;

pub use card::{Card, CardState};
pub use deck::{Deck, DeckError, generate_cards};
pub use handle::{CardId, ElementId, TimerHandle};
pub use shuffle::shuffle;
