//! View states and the scaffolding shared by both controllers.
//!
//! - `GenerationGuard`: per-slot monotonically increasing request counter
//! - `Observable`: current value plus subscribers notified on every change
//! - `RequestSlot`: guard + observable + completion channel for one state slot

pub mod generation;
pub mod observable;
pub mod slot;
pub mod view;

pub use generation::{Generation, GenerationGuard};
pub use observable::{Observable, SubscriptionId};
pub use slot::{Completion, RequestSlot};
pub use view::{MainViewState, ModalViewState};
