//! Display adapters
//!
//! The round and the session drive the screen through [`GameView`]. A view holds
//! display state only, keyed by the [`ElementId`]s it hands out; it never decides
//! anything about the game.

mod headless;

pub use headless::{HeadlessCard, HeadlessView};

use crate::core::ElementId;

/// Capability set the game needs from a display
pub trait GameView {
    /// Create a face-down card element showing `text` once revealed
    fn create_card(&mut self, text: &str) -> ElementId;

    /// Turn the element face down
    fn hide(&mut self, element: ElementId);

    /// Turn the element face up
    fn reveal(&mut self, element: ElementId);

    /// Mark the element as part of a solved pair
    fn solve(&mut self, element: ElementId) {
        self.reveal(element);
    }

    /// Make the element report clicks
    fn enable_clicks(&mut self, element: ElementId);

    /// Append the element to the card container, after the ones already placed
    fn append_card(&mut self, element: ElementId);

    /// Remove every card element
    fn clear_cards(&mut self);

    /// Show the elapsed round time
    fn update_timer(&mut self, seconds: u64);

    fn show_applause(&mut self);

    fn hide_applause(&mut self);
}
