//! HTTP client for the scoring service.
//!
//! `GET {base}/signals?limit=N[&tickers=A,B]` and
//! `GET {base}/history/{ticker}?days=N`. One attempt per call: no retries,
//! the user re-triggers the action instead. Every request carries the
//! configured timeout.

use std::time::Duration;

use reqwest::Url;

use super::provider::{ApiError, SignalApi, SignalsQuery};
use super::wire::{decode_history, decode_signals};
use crate::config::RadarConfig;
use crate::domain::{HistorySnapshot, SignalsSnapshot};

/// Blocking reqwest client bound to one base URL.
pub struct HttpSignalApi {
    client: reqwest::blocking::Client,
    base: Url,
}

impl HttpSignalApi {
    pub fn new(base: Url, timeout: Duration) -> Result<Self, ApiError> {
        if base.cannot_be_a_base() {
            return Err(ApiError::Transport(format!("'{base}' cannot be used as a base URL")));
        }
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("signalradar/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ApiError::Transport(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, base })
    }

    pub fn from_config(config: &RadarConfig) -> Result<Self, ApiError> {
        let base = config
            .base_url()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::new(base, config.timeout())
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// `{base}/{segments...}`, keeping any path prefix on the base.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    /// URL for a signals request. The comma in `tickers` is percent-encoded.
    pub fn signals_url(&self, query: &SignalsQuery) -> Url {
        let mut url = self.endpoint(&["signals"]);
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("limit", &query.limit.to_string());
            if let Some(tickers) = &query.tickers {
                pairs.append_pair("tickers", tickers);
            }
        }
        url
    }

    /// URL for a history request; the ticker is a single path segment.
    pub fn history_url(&self, ticker: &str, days: u32) -> Url {
        let mut url = self.endpoint(&["history", ticker]);
        url.query_pairs_mut().append_pair("days", &days.to_string());
        url
    }

    /// Execute a GET and return the body of a successful response.
    fn get_body(&self, url: Url) -> Result<String, ApiError> {
        tracing::debug!(%url, "GET");
        let resp = self
            .client
            .get(url.clone())
            .send()
            .map_err(|e| ApiError::Transport(describe(&e)))?;

        let status = resp.status();
        if !status.is_success() {
            tracing::debug!(%url, status = status.as_u16(), "non-success response");
            return Err(ApiError::Http(status.as_u16()));
        }

        resp.text().map_err(|e| ApiError::Transport(describe(&e)))
    }
}

impl SignalApi for HttpSignalApi {
    fn name(&self) -> &str {
        "http"
    }

    fn fetch_signals(&self, query: &SignalsQuery) -> Result<SignalsSnapshot, ApiError> {
        let body = self.get_body(self.signals_url(query))?;
        decode_signals(&body)
    }

    fn fetch_history(&self, ticker: &str, days: u32) -> Result<HistorySnapshot, ApiError> {
        let body = self.get_body(self.history_url(ticker, days))?;
        decode_history(ticker, &body)
    }
}

fn describe(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        "request timed out".to_string()
    } else if e.is_connect() {
        format!("could not connect: {e}")
    } else {
        e.to_string()
    }
}
