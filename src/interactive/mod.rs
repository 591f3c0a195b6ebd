//! Interactive TUI interface

pub mod app;
pub mod rendering;
pub mod terminal_view;

pub use app::{App, run_tui};
pub use terminal_view::{PageLayout, REGION_IDS, TerminalView, ViewError};
