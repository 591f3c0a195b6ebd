//! Card faces and pair generation
//!
//! A [`Deck`] is the pool of distinct faces a round draws its pair values from.
//! [`generate_cards`] turns the drawn faces into linked card pairs.

use super::card::Card;
use super::handle::CardId;
use crate::view::GameView;
use rand::Rng;
use rustc_hash::FxHashSet;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors building or drawing from a deck
#[derive(Debug, Error)]
pub enum DeckError {
    #[error("deck has no faces")]
    Empty,

    #[error("deck face at position {0} is blank")]
    BlankFace(usize),

    #[error("deck face {0:?} appears more than once")]
    DuplicateFace(String),

    #[error("{requested} pairs requested but the deck only has {available} faces")]
    TooSmall { requested: usize, available: usize },

    #[error("failed to read deck file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A non-empty list of distinct card faces
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    faces: Vec<String>,
}

impl Deck {
    /// Build a deck from faces, trimming surrounding whitespace
    ///
    /// # Errors
    /// Returns `DeckError` if the list is empty, a face is blank, or a face repeats.
    ///
    /// # Examples
    /// ```
    /// use memory_match::core::Deck;
    ///
    /// let deck = Deck::new(["🐶", "🐱"]).unwrap();
    /// assert_eq!(deck.len(), 2);
    ///
    /// assert!(Deck::new(["🐶", "🐶"]).is_err());
    /// ```
    pub fn new<I, S>(faces: I) -> Result<Self, DeckError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = FxHashSet::default();
        let mut collected = Vec::new();

        for (position, face) in faces.into_iter().enumerate() {
            let face = face.as_ref().trim();
            if face.is_empty() {
                return Err(DeckError::BlankFace(position));
            }
            if !seen.insert(face.to_string()) {
                return Err(DeckError::DuplicateFace(face.to_string()));
            }
            collected.push(face.to_string());
        }

        if collected.is_empty() {
            return Err(DeckError::Empty);
        }

        Ok(Self { faces: collected })
    }

    /// Faces `"1"` through `"n"`
    ///
    /// A zero count still yields a single face so the deck stays non-empty.
    #[must_use]
    pub fn numbered(count: usize) -> Self {
        Self {
            faces: (1..=count.max(1)).map(|n| n.to_string()).collect(),
        }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.faces.len()
    }

    /// Always false; kept for API symmetry with `len`
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn faces(&self) -> &[String] {
        &self.faces
    }

    /// Pick `pair_count` distinct faces at random, preserving deck order
    ///
    /// # Errors
    /// Returns `DeckError::TooSmall` if the deck has fewer faces than requested.
    pub fn draw<R: Rng + ?Sized>(
        &self,
        pair_count: usize,
        rng: &mut R,
    ) -> Result<Vec<String>, DeckError> {
        if pair_count > self.faces.len() {
            return Err(DeckError::TooSmall {
                requested: pair_count,
                available: self.faces.len(),
            });
        }

        if pair_count == self.faces.len() {
            return Ok(self.faces.clone());
        }

        let mut picked = rand::seq::index::sample(rng, self.faces.len(), pair_count).into_vec();
        picked.sort_unstable();

        Ok(picked.into_iter().map(|i| self.faces[i].clone()).collect())
    }
}

/// Create two linked cards per face, in generation order
///
/// Cards `2k` and `2k + 1` carry `faces[k]` and point at each other. Each card
/// gets its own element from the view. An empty face list yields no cards.
pub fn generate_cards<V: GameView + ?Sized>(faces: &[String], view: &mut V) -> Vec<Card> {
    let mut cards = Vec::with_capacity(faces.len() * 2);

    for (pair, face) in faces.iter().enumerate() {
        let first = CardId::new(pair * 2);
        let second = CardId::new(pair * 2 + 1);

        cards.push(Card::new(face.as_str(), second, view.create_card(face)));
        cards.push(Card::new(face.as_str(), first, view.create_card(face)));
    }

    cards
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::HeadlessView;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use rustc_hash::FxHashMap;

    fn faces(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn deck_trims_faces() {
        let deck = Deck::new([" a ", "b"]).unwrap();
        assert_eq!(deck.faces(), &["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn deck_rejects_bad_input() {
        assert!(matches!(Deck::new(Vec::<&str>::new()), Err(DeckError::Empty)));
        assert!(matches!(Deck::new(["a", "  "]), Err(DeckError::BlankFace(1))));
        assert!(matches!(
            Deck::new(["a", "b", "a"]),
            Err(DeckError::DuplicateFace(face)) if face == "a"
        ));
    }

    #[test]
    fn numbered_deck_counts_from_one() {
        let deck = Deck::numbered(3);
        assert_eq!(deck.faces(), &faces(&["1", "2", "3"]));
        assert_eq!(Deck::numbered(0).len(), 1);
    }

    #[test]
    fn draw_whole_deck_keeps_order() {
        let deck = Deck::numbered(5);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(deck.draw(5, &mut rng).unwrap(), deck.faces());
    }

    #[test]
    fn draw_subset_is_distinct_and_ordered() {
        let deck = Deck::numbered(20);
        let mut rng = StdRng::seed_from_u64(7);
        let drawn = deck.draw(6, &mut rng).unwrap();

        assert_eq!(drawn.len(), 6);
        let positions: Vec<usize> = drawn
            .iter()
            .map(|face| deck.faces().iter().position(|f| f == face).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn draw_too_many_fails() {
        let deck = Deck::numbered(3);
        let mut rng = StdRng::seed_from_u64(0);
        assert!(matches!(
            deck.draw(4, &mut rng),
            Err(DeckError::TooSmall {
                requested: 4,
                available: 3
            })
        ));
    }

    #[test]
    fn generate_cards_makes_two_per_face() {
        let mut view = HeadlessView::new();
        let cards = generate_cards(&faces(&["a", "b", "c", "d"]), &mut view);

        assert_eq!(cards.len(), 8);
        let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
        for card in &cards {
            *counts.entry(card.value()).or_default() += 1;
        }
        assert_eq!(counts.len(), 4);
        assert!(counts.values().all(|&n| n == 2));
    }

    #[test]
    fn generate_cards_links_pairs_mutually() {
        let mut view = HeadlessView::new();
        let cards = generate_cards(&faces(&["x", "y", "z"]), &mut view);

        for (index, card) in cards.iter().enumerate() {
            let partner = &cards[card.paired().index()];
            assert_ne!(card.paired().index(), index);
            assert_eq!(partner.paired().index(), index);
            assert_eq!(partner.value(), card.value());
        }
    }

    #[test]
    fn generate_cards_creates_one_element_per_card() {
        let mut view = HeadlessView::new();
        let cards = generate_cards(&faces(&["x", "y"]), &mut view);

        let mut elements: Vec<_> = cards.iter().map(Card::element).collect();
        elements.sort();
        elements.dedup();
        assert_eq!(elements.len(), 4);
        for card in &cards {
            assert_eq!(view.element(card.element()).unwrap().text, card.value());
        }
    }

    #[test]
    fn generate_cards_without_faces_is_empty() {
        let mut view = HeadlessView::new();
        assert!(generate_cards(&[], &mut view).is_empty());
    }
}
