//! Shared fixtures for the integration tests: a scripted `SignalApi` and a
//! one-shot HTTP server.
#![allow(dead_code)]

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::Mutex;
use std::thread::{self, JoinHandle};

use chrono::NaiveDate;
use signalradar_core::data::{ApiError, SignalApi, SignalsQuery};
use signalradar_core::domain::{HistoryPoint, HistorySnapshot, SignalRow, SignalsSnapshot};

// ── Rows ─────────────────────────────────────────────────────────────

pub fn row(ticker: &str, score: f64, rsi: f64, tags: &[&str]) -> SignalRow {
    SignalRow {
        score,
        rsi,
        close: 100.0,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        ..SignalRow::new(ticker)
    }
}

/// Deterministic response for a query: one row per requested ticker, or
/// `R1..Rn` for the default universe, truncated to the limit.
pub fn echo_signals(query: &SignalsQuery) -> SignalsSnapshot {
    let universe: Vec<String> = match &query.tickers {
        Some(list) => list.split(',').map(String::from).collect(),
        None => (1..=50).map(|i| format!("R{i}")).collect(),
    };
    let rows = universe
        .iter()
        .take(query.limit.get() as usize)
        .enumerate()
        .map(|(i, t)| row(t, 90.0 - i as f64, 50.0, &[]))
        .collect();
    SignalsSnapshot { universe, rows }
}

/// Three daily closes whose last value encodes the ticker length, so
/// responses for different tickers are distinguishable.
pub fn echo_history(ticker: &str, _days: u32) -> HistorySnapshot {
    let start = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
    let points = (0..3)
        .map(|i| HistoryPoint {
            date: start + chrono::Duration::days(i),
            close: 100.0 + i as f64 + ticker.len() as f64,
        })
        .collect();
    HistorySnapshot {
        ticker: ticker.to_string(),
        points,
    }
}

// ── Scripted API ─────────────────────────────────────────────────────

type SignalsFn = Box<dyn Fn(&SignalsQuery) -> Result<SignalsSnapshot, ApiError> + Send + Sync>;
type HistoryFn = Box<dyn Fn(&str, u32) -> Result<HistorySnapshot, ApiError> + Send + Sync>;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Signals(SignalsQuery),
    History(String, u32),
}

/// `SignalApi` whose answers are computed from the request, so the result
/// does not depend on the order jobs run in.
pub struct StubApi {
    signals: SignalsFn,
    history: HistoryFn,
    calls: Mutex<Vec<Call>>,
}

impl StubApi {
    pub fn new() -> Self {
        Self {
            signals: Box::new(|q| Ok(echo_signals(q))),
            history: Box::new(|t, d| Ok(echo_history(t, d))),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_signals<F>(mut self, f: F) -> Self
    where
        F: Fn(&SignalsQuery) -> Result<SignalsSnapshot, ApiError> + Send + Sync + 'static,
    {
        self.signals = Box::new(f);
        self
    }

    pub fn with_history<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, u32) -> Result<HistorySnapshot, ApiError> + Send + Sync + 'static,
    {
        self.history = Box::new(f);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn signal_queries(&self) -> Vec<SignalsQuery> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Signals(q) => Some(q),
                Call::History(..) => None,
            })
            .collect()
    }
}

impl SignalApi for StubApi {
    fn name(&self) -> &str {
        "stub"
    }

    fn fetch_signals(&self, query: &SignalsQuery) -> Result<SignalsSnapshot, ApiError> {
        self.calls.lock().unwrap().push(Call::Signals(query.clone()));
        (self.signals)(query)
    }

    fn fetch_history(&self, ticker: &str, days: u32) -> Result<HistorySnapshot, ApiError> {
        self.calls
            .lock()
            .unwrap()
            .push(Call::History(ticker.to_string(), days));
        (self.history)(ticker, days)
    }
}

// ── One-shot HTTP server ─────────────────────────────────────────────

/// Serve a single request with `status` and `body`, then close.
///
/// Returns the base URL and a handle yielding the request line
/// (e.g. `GET /signals?limit=15 HTTP/1.1`).
pub fn serve_once(status: u16, body: &str) -> (String, JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let body = body.to_string();

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        loop {
            let mut header = String::new();
            let n = reader.read_line(&mut header).unwrap();
            if n == 0 || header == "\r\n" {
                break;
            }
        }

        let reason = if status == 200 { "OK" } else { "Error" };
        let response = format!(
            "HTTP/1.1 {status} {reason}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        let mut stream = stream;
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        request_line.trim_end().to_string()
    });

    (format!("http://{addr}"), handle)
}

/// A base URL on which nothing is listening.
pub fn closed_port() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
