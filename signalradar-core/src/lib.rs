//! SignalRadar Core — client-side pipeline for a ranked signal screener.
//!
//! This crate contains:
//! - Domain types (signal rows, snapshots, history, row limit)
//! - The filter engine (pure, stable, clamped criteria)
//! - Custom symbol normalization
//! - The scoring-service client (error taxonomy, wire normalization, reqwest)
//! - Generation-guarded state slots with explicit subscriptions
//! - Request and history controllers, bundled by the `Radar` facade
//! - Configuration (defaults, TOML file, environment)

pub mod config;
pub mod controller;
pub mod data;
pub mod domain;
pub mod filter;
pub mod radar;
pub mod state;
pub mod symbols;

pub use config::{ConfigError, RadarConfig};
pub use controller::{
    Dispatch, HistoryController, InlineDispatcher, ManualDispatcher, RequestController,
    ThreadDispatcher,
};
pub use data::{ApiError, HttpSignalApi, SignalApi, SignalsQuery};
pub use domain::{HistoryPoint, HistorySnapshot, Limit, SignalRow, SignalsSnapshot};
pub use filter::FilterCriteria;
pub use radar::Radar;
pub use state::{MainViewState, ModalViewState};
