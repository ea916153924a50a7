//! Signal API trait and structured error types.
//!
//! The SignalApi trait abstracts over the scoring service so controllers can
//! run against the HTTP client in production and a scripted fake in tests.

use thiserror::Error;

use crate::domain::{HistorySnapshot, Limit, SignalsSnapshot};
use crate::symbols::symbols_param;

/// Failure of a single API request.
///
/// Displayed as-is in both CLI and TUI; the controllers reduce it to its
/// message when committing a `Failed` state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request could not be sent or the response could not be read.
    #[error("network error: {0}")]
    Transport(String),

    /// The service answered with a non-success status code.
    #[error("API error: {0}")]
    Http(u16),

    /// The body did not match the expected schema.
    #[error("unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

/// Parameters of one signals request, already normalized.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignalsQuery {
    pub limit: Limit,
    /// Comma-joined uppercase symbols; `None` omits the parameter.
    pub tickers: Option<String>,
}

impl SignalsQuery {
    /// Build a query from a raw limit and free-form symbol text.
    pub fn new(limit: i64, symbols: Option<&str>) -> Self {
        Self {
            limit: Limit::new(limit),
            tickers: symbols.and_then(symbols_param),
        }
    }
}

/// Source of signals and history.
///
/// Calls block; the controllers run them off the control thread.
pub trait SignalApi: Send + Sync {
    /// Human-readable name of this source.
    fn name(&self) -> &str;

    /// Fetch the ranked signals for `query`.
    fn fetch_signals(&self, query: &SignalsQuery) -> Result<SignalsSnapshot, ApiError>;

    /// Fetch `days` of daily closes for `ticker`.
    fn fetch_history(&self, ticker: &str, days: u32) -> Result<HistorySnapshot, ApiError>;
}
