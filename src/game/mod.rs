//! Game controllers
//!
//! The round state machine, the session that hosts it, and the timer queue both
//! of them schedule on.

pub mod round;
pub mod session;
pub mod timer;

pub use round::{ClickOutcome, Round};
pub use session::Session;
pub use timer::{MonotonicClock, TimerEvent, TimerQueue, TimerService};
