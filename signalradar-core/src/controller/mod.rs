//! Controllers that own the two view state slots.

pub mod dispatch;
pub mod history;
pub mod signals;

pub use dispatch::{Dispatch, InlineDispatcher, Job, ManualDispatcher, ThreadDispatcher};
pub use history::HistoryController;
pub use signals::RequestController;
