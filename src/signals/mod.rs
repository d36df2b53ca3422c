//! Signal evaluation interfaces.

pub mod categories;
pub mod engine;
pub mod scoring;

pub use categories::*;
pub use engine::{SignalEngine, MIN_CANDLES};
pub use scoring::*;
