//! Domain types for SignalRadar

pub mod history;
pub mod limit;
pub mod signal;

pub use history::{HistoryPoint, HistorySnapshot};
pub use limit::Limit;
pub use signal::{tags, SignalRow, SignalsSnapshot};
