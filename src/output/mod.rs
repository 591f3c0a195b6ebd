//! Terminal output formatting
//!
//! Display utilities for the line mode and pretty-printing.

pub mod display;
pub mod formatters;

pub use display::{print_applause, print_board, print_simulation_result, print_timer};
