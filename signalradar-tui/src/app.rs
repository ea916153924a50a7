//! Application state, owned by the main thread.
//!
//! All TUI state lives here. The core publishes state transitions through
//! subscriptions; each listener forwards a `Notice` on a channel that the
//! event loop drains once per tick.

use std::collections::VecDeque;
use std::sync::mpsc::{self, Receiver, Sender};

use chrono::NaiveDateTime;

use signalradar_core::domain::SignalRow;
use signalradar_core::filter::FilterCriteria;
use signalradar_core::state::{MainViewState, ModalViewState};
use signalradar_core::Radar;

pub const ERROR_HISTORY_CAP: usize = 50;

/// Overlay drawn above the main screen. The chart modal is not listed here:
/// it is open exactly when the history slot is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Overlay {
    None,
    /// Editing custom symbols; holds the draft text.
    Symbols(String),
    Help,
    ErrorHistory,
}

/// Status message severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

/// Which slot a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Signals,
    History,
}

impl ErrorCategory {
    pub fn label(self) -> &'static str {
        match self {
            ErrorCategory::Signals => "LIST",
            ErrorCategory::History => "CHART",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub timestamp: NaiveDateTime,
    pub category: ErrorCategory,
    pub message: String,
    pub context: String,
}

/// Summary of a published transition, small enough to cross the channel.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    SignalsLoading,
    SignalsLoaded { rows: usize },
    SignalsFailed(String),
    HistoryLoaded { ticker: String, points: usize },
    HistoryFailed { ticker: String, message: String },
    CriteriaChanged(String),
}

impl Notice {
    fn from_main(state: &MainViewState) -> Option<Self> {
        match state {
            MainViewState::Idle => None,
            MainViewState::Loading => Some(Notice::SignalsLoading),
            MainViewState::Loaded(snapshot) => Some(Notice::SignalsLoaded {
                rows: snapshot.len(),
            }),
            MainViewState::Failed(message) => Some(Notice::SignalsFailed(message.clone())),
        }
    }

    fn from_modal(state: &ModalViewState) -> Option<Self> {
        match state {
            ModalViewState::Loaded(ticker, history) => Some(Notice::HistoryLoaded {
                ticker: ticker.clone(),
                points: history.points.len(),
            }),
            ModalViewState::Failed(ticker, message) => Some(Notice::HistoryFailed {
                ticker: ticker.clone(),
                message: message.clone(),
            }),
            ModalViewState::Closed | ModalViewState::Loading(_) => None,
        }
    }
}

pub struct AppState {
    pub radar: Radar,
    pub running: bool,
    /// Index into the visible rows.
    pub cursor: usize,
    pub overlay: Overlay,
    pub status_message: Option<(String, StatusLevel)>,
    pub error_history: VecDeque<ErrorRecord>,
    pub error_scroll: usize,
    notices: Receiver<Notice>,
}

impl AppState {
    /// Take ownership of `radar` and subscribe to all three of its publishers.
    pub fn new(mut radar: Radar) -> Self {
        let (tx, rx) = mpsc::channel();

        let signals_tx: Sender<Notice> = tx.clone();
        radar.signals_mut().subscribe(move |state| {
            if let Some(notice) = Notice::from_main(state) {
                let _ = signals_tx.send(notice);
            }
        });
        let history_tx = tx.clone();
        radar.history_mut().subscribe(move |state| {
            if let Some(notice) = Notice::from_modal(state) {
                let _ = history_tx.send(notice);
            }
        });
        radar.subscribe_criteria(move |criteria: &FilterCriteria| {
            let _ = tx.send(Notice::CriteriaChanged(criteria.summary()));
        });

        Self {
            radar,
            running: true,
            cursor: 0,
            overlay: Overlay::None,
            status_message: None,
            error_history: VecDeque::with_capacity(ERROR_HISTORY_CAP),
            error_scroll: 0,
            notices: rx,
        }
    }

    /// First fetch of the list.
    pub fn start(&mut self) {
        self.radar.signals_mut().activate();
    }

    /// Commit arrived completions and fold the resulting notices into the UI
    /// state. Returns true when anything changed and a redraw is due.
    pub fn tick(&mut self) -> bool {
        self.radar.pump();
        let mut changed = false;
        while let Ok(notice) = self.notices.try_recv() {
            self.handle_notice(notice);
            changed = true;
        }
        if changed {
            self.clamp_cursor();
        }
        changed
    }

    fn handle_notice(&mut self, notice: Notice) {
        match notice {
            Notice::SignalsLoading => self.set_status("Loading signals..."),
            Notice::SignalsLoaded { rows } => {
                self.set_status(format!("Loaded {rows} signals"));
            }
            Notice::SignalsFailed(message) => {
                let context = self.query_context();
                self.push_error(ErrorCategory::Signals, message, context);
            }
            Notice::HistoryLoaded { ticker, points } => {
                self.set_status(format!("{ticker}: {points} closes"));
            }
            Notice::HistoryFailed { ticker, message } => {
                self.push_error(ErrorCategory::History, message, ticker);
            }
            Notice::CriteriaChanged(summary) => self.set_status(format!("Filters: {summary}")),
        }
    }

    fn query_context(&self) -> String {
        match self.radar.signals().last_query() {
            Some(q) => format!(
                "limit={} tickers={}",
                q.limit,
                q.tickers.as_deref().unwrap_or("default")
            ),
            None => String::new(),
        }
    }

    /// Visible rows with their 1-based server rank, in server order.
    pub fn ranked_rows(&self) -> Vec<(usize, &SignalRow)> {
        self.radar.ranked_rows()
    }

    pub fn selected_ticker(&self) -> Option<String> {
        self.ranked_rows()
            .get(self.cursor)
            .map(|(_, row)| row.ticker.clone())
    }

    pub fn move_cursor(&mut self, delta: isize) {
        let len = self.ranked_rows().len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let next = self.cursor as isize + delta;
        self.cursor = next.clamp(0, len as isize - 1) as usize;
    }

    pub fn clamp_cursor(&mut self) {
        let len = self.ranked_rows().len();
        self.cursor = self.cursor.min(len.saturating_sub(1));
    }

    /// Record an error (newest first, capped) and show it in the status bar.
    pub fn push_error(&mut self, category: ErrorCategory, message: String, context: String) {
        let record = ErrorRecord {
            timestamp: chrono::Local::now().naive_local(),
            category,
            message: message.clone(),
            context,
        };
        self.error_history.push_front(record);
        self.error_history.truncate(ERROR_HISTORY_CAP);
        self.status_message = Some((message, StatusLevel::Error));
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Info));
    }

    pub fn set_warning(&mut self, msg: impl Into<String>) {
        self.status_message = Some((msg.into(), StatusLevel::Warning));
    }
}
