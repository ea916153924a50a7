//! Wire payloads of the scoring service and their normalization into domain types.
//!
//! Every inbound row passes through `normalize_row` exactly once, at parse
//! time. That is the only place a missing or `null` numeric becomes `0.0`; the
//! filter engine and render surface never see an absent value.

use chrono::NaiveDate;
use serde::Deserialize;

use super::provider::ApiError;
use crate::domain::{HistoryPoint, HistorySnapshot, SignalRow, SignalsSnapshot};

/// `GET /signals` response body.
#[derive(Debug, Deserialize)]
pub struct SignalsPayload {
    #[serde(default)]
    pub tickers: Vec<String>,
    pub results: Vec<SignalRecord>,
    #[serde(default)]
    pub count: Option<usize>,
}

/// One result entry, exactly as sent.
#[derive(Debug, Deserialize)]
pub struct SignalRecord {
    pub ticker: String,
    pub score: Option<f64>,
    pub close: Option<f64>,
    pub rsi: Option<f64>,
    pub vol_ratio: Option<f64>,
    pub atr_pct: Option<f64>,
    pub ret_5d: Option<f64>,
    pub ret_20d: Option<f64>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// `GET /history/{ticker}` response body.
#[derive(Debug, Deserialize)]
pub struct HistoryPayload {
    #[serde(default)]
    pub ticker: Option<String>,
    pub points: Vec<PointRecord>,
}

#[derive(Debug, Deserialize)]
pub struct PointRecord {
    pub date: String,
    pub close: Option<f64>,
}

/// Missing numerics default to zero.
pub fn normalize_row(record: SignalRecord) -> SignalRow {
    SignalRow {
        ticker: record.ticker,
        score: record.score.unwrap_or(0.0),
        close: record.close.unwrap_or(0.0),
        rsi: record.rsi.unwrap_or(0.0),
        vol_ratio: record.vol_ratio.unwrap_or(0.0),
        atr_pct: record.atr_pct.unwrap_or(0.0),
        ret_5d: record.ret_5d.unwrap_or(0.0),
        ret_20d: record.ret_20d.unwrap_or(0.0),
        tags: record.tags.unwrap_or_default(),
        notes: record.notes.unwrap_or_default(),
    }
}

/// Rows keep server order.
pub fn normalize_signals(payload: SignalsPayload) -> SignalsSnapshot {
    if let Some(count) = payload.count {
        if count != payload.results.len() {
            tracing::debug!(
                count,
                rows = payload.results.len(),
                "signals count field disagrees with results length"
            );
        }
    }
    SignalsSnapshot {
        universe: payload.tickers,
        rows: payload.results.into_iter().map(normalize_row).collect(),
    }
}

/// Points without a close are dropped; an unparseable date fails the whole payload.
pub fn normalize_history(
    requested: &str,
    payload: HistoryPayload,
) -> Result<HistorySnapshot, ApiError> {
    let mut points = Vec::with_capacity(payload.points.len());
    for record in payload.points {
        let date = NaiveDate::parse_from_str(&record.date, "%Y-%m-%d").map_err(|e| {
            ApiError::Decode(format!("invalid history date '{}': {e}", record.date))
        })?;
        match record.close {
            Some(close) => points.push(HistoryPoint { date, close }),
            None => tracing::debug!(ticker = requested, %date, "dropping history point without close"),
        }
    }
    Ok(HistorySnapshot {
        ticker: payload.ticker.unwrap_or_else(|| requested.to_string()),
        points,
    })
}

/// Parse and normalize a signals body.
pub fn decode_signals(body: &str) -> Result<SignalsSnapshot, ApiError> {
    let payload: SignalsPayload = serde_json::from_str(body)
        .map_err(|e| ApiError::Decode(format!("signals payload: {e}")))?;
    Ok(normalize_signals(payload))
}

/// Parse and normalize a history body.
pub fn decode_history(requested: &str, body: &str) -> Result<HistorySnapshot, ApiError> {
    let payload: HistoryPayload = serde_json::from_str(body)
        .map_err(|e| ApiError::Decode(format!("history payload: {e}")))?;
    normalize_history(requested, payload)
}
