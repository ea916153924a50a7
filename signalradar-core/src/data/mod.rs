//! Scoring service access: error taxonomy, API trait, wire format, HTTP client.

pub mod http;
pub mod provider;
pub mod wire;

pub use http::HttpSignalApi;
pub use provider::{ApiError, SignalApi, SignalsQuery};
