//! Memory Match
//!
//! A memory-matching card game: cards are dealt face down, turned up one at a
//! time, and pairs with equal faces stay up. An unmatched card flips back after
//! a delay; finding every pair stops the clock.
//!
//! # Quick Start
//!
//! ```rust
//! use memory_match::config::GameConfig;
//! use memory_match::core::Deck;
//! use memory_match::game::{Session, TimerQueue};
//! use memory_match::view::HeadlessView;
//!
//! let config = GameConfig {
//!     pair_count: 3,
//!     seed: Some(7),
//!     ..GameConfig::default()
//! };
//! let mut session = Session::new(config, Deck::numbered(3)).unwrap();
//! let mut view = HeadlessView::new();
//! let mut timers = TimerQueue::new();
//!
//! session.start(&mut view, &mut timers).unwrap();
//! assert_eq!(view.placed().len(), 6);
//! ```

// Core domain types
pub mod core;

// Game configuration
pub mod config;

// Embedded and file decks
pub mod decks;

// Round, session and timers
pub mod game;

// Display adapters
pub mod view;

// Command implementations
pub mod commands;

// Terminal output formatting
pub mod output;

// Interactive TUI interface
pub mod interactive;
