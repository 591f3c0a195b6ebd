//! Command implementations

pub mod simple;
pub mod simulate;

pub use simple::run_simple;
pub use simulate::{
    BotKind, RoundReport, SimulationConfig, SimulationError, SimulationResult, run_simulation,
};
