//! Local, pure predicates over the ranked rows.
//!
//! `apply` is a stable filter: it never reorders, never mutates its input and
//! has no failure mode. Criteria are only changed through their mutators, which
//! keep `0 <= rsi_min <= rsi_max <= 100` after every single call.

use serde::{Deserialize, Serialize};

use crate::domain::{tags, SignalRow};

pub const RSI_FLOOR: f64 = 0.0;
pub const RSI_CEIL: f64 = 100.0;

/// User-selected filter state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    min_score: f64,
    rsi_min: f64,
    rsi_max: f64,
    require_bullish: bool,
    require_uptrend: bool,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            min_score: 0.0,
            rsi_min: RSI_FLOOR,
            rsi_max: RSI_CEIL,
            require_bullish: false,
            require_uptrend: false,
        }
    }
}

impl FilterCriteria {
    pub fn min_score(&self) -> f64 {
        self.min_score
    }

    pub fn rsi_min(&self) -> f64 {
        self.rsi_min
    }

    pub fn rsi_max(&self) -> f64 {
        self.rsi_max
    }

    pub fn require_bullish(&self) -> bool {
        self.require_bullish
    }

    pub fn require_uptrend(&self) -> bool {
        self.require_uptrend
    }

    /// Non-finite values are ignored.
    pub fn set_min_score(&mut self, value: f64) {
        if value.is_finite() {
            self.min_score = value;
        }
    }

    /// Clamped to `[0, rsi_max]`.
    pub fn set_rsi_min(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.rsi_min = value.clamp(RSI_FLOOR, RSI_CEIL).min(self.rsi_max);
    }

    /// Clamped to `[rsi_min, 100]`.
    pub fn set_rsi_max(&mut self, value: f64) {
        if !value.is_finite() {
            return;
        }
        self.rsi_max = value.clamp(RSI_FLOOR, RSI_CEIL).max(self.rsi_min);
    }

    pub fn set_require_bullish(&mut self, on: bool) {
        self.require_bullish = on;
    }

    pub fn set_require_uptrend(&mut self, on: bool) {
        self.require_uptrend = on;
    }

    pub fn toggle_bullish(&mut self) {
        self.require_bullish = !self.require_bullish;
    }

    pub fn toggle_uptrend(&mut self) {
        self.require_uptrend = !self.require_uptrend;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when every criterion is at its default.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// The per-row predicate. All conditions must hold.
    pub fn matches(&self, row: &SignalRow) -> bool {
        row.score >= self.min_score
            && row.rsi >= self.rsi_min
            && row.rsi <= self.rsi_max
            && (!self.require_bullish || row.has_tag(tags::BULLISH_MOMENTUM))
            && (!self.require_uptrend || row.has_tag(tags::STRONG_UPTREND))
    }

    /// Compact one-line description, e.g. `score>=10 rsi 30-70 +bullish`.
    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!("score>={}", self.min_score),
            format!("rsi {}-{}", self.rsi_min, self.rsi_max),
        ];
        if self.require_bullish {
            parts.push("+bullish".into());
        }
        if self.require_uptrend {
            parts.push("+uptrend".into());
        }
        parts.join(" ")
    }
}

/// Rows that pass `criteria`, in input order, each with its 1-based
/// position in `rows` (the server rank).
pub fn ranked<'a>(
    rows: &'a [SignalRow],
    criteria: &'a FilterCriteria,
) -> impl Iterator<Item = (usize, &'a SignalRow)> + 'a {
    rows.iter()
        .enumerate()
        .filter(move |(_, row)| criteria.matches(row))
        .map(|(i, row)| (i + 1, row))
}

/// Rows that pass `criteria`, borrowed, in input order.
pub fn matching<'a>(
    rows: &'a [SignalRow],
    criteria: &'a FilterCriteria,
) -> impl Iterator<Item = &'a SignalRow> + 'a {
    ranked(rows, criteria).map(|(_, row)| row)
}

/// Stable filter over `rows`.
pub fn apply(rows: &[SignalRow], criteria: &FilterCriteria) -> Vec<SignalRow> {
    matching(rows, criteria).cloned().collect()
}
