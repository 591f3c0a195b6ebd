//! Card decks
//!
//! Provides the embedded emoji deck compiled into the binary, and the
//! `--deck` selection logic shared by every front end.

mod embedded;
pub mod loader;

pub use embedded::{SYMBOLS, SYMBOLS_COUNT};

use crate::core::{Deck, DeckError};

/// Resolve a `--deck` argument
///
/// - "symbols": the embedded emoji deck
/// - "numbers": faces "1" through `pair_count`
/// - anything else: path to a deck file
///
/// # Errors
///
/// Returns `DeckError` if a deck file cannot be read or is invalid.
pub fn select(name: &str, pair_count: usize) -> Result<Deck, DeckError> {
    match name {
        "symbols" => loader::deck_from_slice(SYMBOLS),
        "numbers" => Ok(Deck::numbered(pair_count)),
        path => loader::load_from_file(path),
    }
}
