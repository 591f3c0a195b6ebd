//! Deck loading utilities
//!
//! Provides functions to load decks from files or use embedded constants.

use crate::core::{Deck, DeckError};
use std::fs;
use std::path::Path;

/// Load a deck from a file
///
/// One face per line. Blank lines and lines starting with `#` are skipped.
///
/// # Errors
///
/// Returns `DeckError::Io` if the file cannot be read, or any validation error
/// from [`Deck::new`].
///
/// # Examples
/// ```no_run
/// use memory_match::decks::loader::load_from_file;
///
/// let deck = load_from_file("data/symbols.txt").unwrap();
/// println!("Loaded {} faces", deck.len());
/// ```
pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Deck, DeckError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| DeckError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let deck = parse_deck(&content)?;
    tracing::debug!(path = %path.display(), faces = deck.len(), "deck loaded");
    Ok(deck)
}

/// Parse deck text in the file format
///
/// # Errors
///
/// Returns a validation error from [`Deck::new`].
pub fn parse_deck(content: &str) -> Result<Deck, DeckError> {
    Deck::new(
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#')),
    )
}

/// Convert an embedded string slice to a deck
///
/// # Errors
///
/// Returns a validation error from [`Deck::new`].
///
/// # Examples
/// ```
/// use memory_match::decks::loader::deck_from_slice;
/// use memory_match::decks::SYMBOLS;
///
/// let deck = deck_from_slice(SYMBOLS).unwrap();
/// assert_eq!(deck.len(), SYMBOLS.len());
/// ```
pub fn deck_from_slice(slice: &[&str]) -> Result<Deck, DeckError> {
    Deck::new(slice.iter().copied())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_skips_comments_and_blanks() {
        let deck = parse_deck("# fruit\n🍎\n\n  🍐  \n# more\n🍊\n").unwrap();
        assert_eq!(deck.faces(), &["🍎", "🍐", "🍊"]);
    }

    #[test]
    fn parse_rejects_duplicates() {
        assert!(matches!(
            parse_deck("a\nb\na\n"),
            Err(DeckError::DuplicateFace(_))
        ));
    }

    #[test]
    fn parse_rejects_comment_only_file() {
        assert!(matches!(parse_deck("# nothing here\n\n"), Err(DeckError::Empty)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_from_file("definitely/not/here.txt").unwrap_err();
        assert!(matches!(err, DeckError::Io { .. }));
        assert!(err.to_string().contains("definitely/not/here.txt"));
    }

    #[test]
    fn deck_from_embedded_symbols() {
        use crate::decks::SYMBOLS;

        let deck = deck_from_slice(SYMBOLS).unwrap();
        assert_eq!(deck.len(), SYMBOLS.len());
    }
}
