//! Price history for the chart modal.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One daily close.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoryPoint {
    pub date: NaiveDate,
    pub close: f64,
}

/// Chronological closes for one ticker, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistorySnapshot {
    pub ticker: String,
    pub points: Vec<HistoryPoint>,
}

impl HistorySnapshot {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&HistoryPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&HistoryPoint> {
        self.points.last()
    }

    /// Lowest and highest close, or `None` when there are no points.
    pub fn close_range(&self) -> Option<(f64, f64)> {
        if self.points.is_empty() {
            return None;
        }
        let (lo, hi) = self
            .points
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| {
                (lo.min(p.close), hi.max(p.close))
            });
        Some((lo, hi))
    }

    /// Fractional change from the first to the last close.
    pub fn change_pct(&self) -> Option<f64> {
        let first = self.first()?.close;
        let last = self.last()?.close;
        if first == 0.0 {
            return None;
        }
        Some(last / first - 1.0)
    }
}
