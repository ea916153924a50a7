//! Plain-text and JSON renderings of command results.

use std::fmt::Write;

use serde_json::{json, Value};

use signalradar_core::domain::{HistorySnapshot, SignalRow};
use signalradar_core::filter::FilterCriteria;

/// Fixed-width table, one line per row, `rank` being the server rank.
pub fn signals_table(rows: &[(usize, &SignalRow)]) -> String {
    if rows.is_empty() {
        return "No results.\n".to_string();
    }

    let header = format!(
        "{:<4} {:<6} {:>6} {:>10} {:>6} {:>8} {:>8} {:>8} {:>8}  Tags",
        "Rank", "Ticker", "Score", "Price", "RSI", "VolxAvg", "ATR%", "5d%", "20d%"
    );
    let mut out = String::new();
    let _ = writeln!(out, "=== Top Signals ===");
    let _ = writeln!(out, "{header}");
    let _ = writeln!(out, "{}", "-".repeat(header.len()));

    for (rank, r) in rows {
        let tags = if r.tags.is_empty() {
            "-".to_string()
        } else {
            r.tags.join(",")
        };
        let _ = writeln!(
            out,
            "{:<4} {:<6} {:>6.1} {:>10.2} {:>6.1} {:>8.2} {:>8.2} {:>8.2} {:>8.2}  {}",
            rank,
            r.ticker,
            r.score,
            r.close,
            r.rsi,
            r.vol_ratio,
            r.atr_pct * 100.0,
            r.ret_5d * 100.0,
            r.ret_20d * 100.0,
            tags
        );
    }
    out
}

/// Footer under the table: how many rows survived the local filters.
pub fn filter_footer(shown: usize, total: usize, criteria: &FilterCriteria) -> String {
    if criteria.is_default() {
        format!("{shown} rows")
    } else {
        format!("{shown} of {total} rows match {}", criteria.summary())
    }
}

pub fn signals_json(universe: &[String], rows: &[SignalRow], criteria: &FilterCriteria) -> Value {
    json!({
        "count": rows.len(),
        "tickers": universe,
        "criteria": criteria,
        "results": rows,
    })
}

pub fn history_table(history: &HistorySnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "=== {} ({} closes) ===", history.ticker, history.points.len());
    for p in &history.points {
        let _ = writeln!(out, "{}  {:>10.2}", p.date.format("%Y-%m-%d"), p.close);
    }
    if let (Some((lo, hi)), Some(change)) = (history.close_range(), history.change_pct()) {
        let _ = writeln!(out, "range {lo:.2} - {hi:.2}, change {:+.2}%", change * 100.0);
    }
    out
}

pub fn history_json(history: &HistorySnapshot) -> Value {
    json!({
        "ticker": history.ticker,
        "points": history.points,
    })
}
