//! One ranked entry from the scoring service.

use serde::{Deserialize, Serialize};

/// Tag vocabulary emitted by the scoring service.
///
/// Rows may carry tags outside this list; those are kept verbatim.
pub mod tags {
    pub const ABOVE_MA50: &str = "Above MA50";
    pub const ABOVE_MA200: &str = "Above MA200";
    pub const STRONG_UPTREND: &str = "Strong Uptrend";
    pub const BULLISH_MOMENTUM: &str = "Bullish Momentum";
    pub const BUILDING_MOMENTUM: &str = "Building Momentum";
    pub const OVERBOUGHT: &str = "Overbought";
    pub const OVERSOLD: &str = "Oversold";
    pub const HIGH_VOLUME: &str = "High Volume";
    pub const LOW_VOLUME: &str = "Low Volume";
    pub const TRADABLE_VOLATILITY: &str = "Tradable Volatility";
    pub const VERY_VOLATILE: &str = "Very Volatile";
    pub const VERY_QUIET: &str = "Very Quiet";
}

/// A single scored symbol.
///
/// Numeric fields are already normalized: anything the service omitted or sent
/// as `null` is `0.0` here. `atr_pct`, `ret_5d` and `ret_20d` are fractions
/// (0.02 means 2%).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalRow {
    pub ticker: String,
    pub score: f64,
    pub close: f64,
    pub rsi: f64,
    pub vol_ratio: f64,
    pub atr_pct: f64,
    pub ret_5d: f64,
    pub ret_20d: f64,
    pub tags: Vec<String>,
    #[serde(default)]
    pub notes: String,
}

impl SignalRow {
    /// Row with the given ticker and every numeric field at its default.
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            score: 0.0,
            close: 0.0,
            rsi: 0.0,
            vol_ratio: 0.0,
            atr_pct: 0.0,
            ret_5d: 0.0,
            ret_20d: 0.0,
            tags: Vec::new(),
            notes: String::new(),
        }
    }

    /// Tags are compared exactly (case-sensitive), as emitted by the service.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// The ranked result of one signals request.
///
/// `rows` are in server-rank order and are never re-sorted on the client.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SignalsSnapshot {
    /// Symbols the service evaluated (the custom set, or its default universe).
    pub universe: Vec<String>,
    pub rows: Vec<SignalRow>,
}

impl SignalsSnapshot {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
