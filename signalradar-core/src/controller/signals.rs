//! Request controller — owns the main list state.
//!
//! Fetch triggers are first activation, a change in limit, and an explicit
//! refresh. Editing the custom symbol text only stores it; the new symbols
//! are used by the next triggered fetch.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::dispatch::Dispatch;
use crate::data::{ApiError, SignalApi, SignalsQuery};
use crate::domain::{Limit, SignalsSnapshot};
use crate::state::{Completion, Generation, MainViewState, RequestSlot, SubscriptionId};

type SignalsResult = Result<SignalsSnapshot, ApiError>;

pub struct RequestController {
    api: Arc<dyn SignalApi>,
    dispatcher: Arc<dyn Dispatch>,
    slot: RequestSlot<MainViewState, SignalsResult>,
    limit: Limit,
    symbols_input: String,
    refresh_token: u64,
    activated: bool,
    last_query: Option<SignalsQuery>,
}

impl RequestController {
    pub fn new(api: Arc<dyn SignalApi>, dispatcher: Arc<dyn Dispatch>, limit: Limit) -> Self {
        Self {
            api,
            dispatcher,
            slot: RequestSlot::new("signals", MainViewState::Idle),
            limit,
            symbols_input: String::new(),
            refresh_token: 0,
            activated: false,
            last_query: None,
        }
    }

    pub fn state(&self) -> &MainViewState {
        self.slot.state()
    }

    pub fn limit(&self) -> Limit {
        self.limit
    }

    pub fn symbols_input(&self) -> &str {
        &self.symbols_input
    }

    pub fn refresh_token(&self) -> u64 {
        self.refresh_token
    }

    /// Query of the most recently issued request.
    pub fn last_query(&self) -> Option<&SignalsQuery> {
        self.last_query.as_ref()
    }

    /// True when the stored symbol text differs from what the last request used.
    pub fn symbols_pending(&self) -> bool {
        let current = SignalsQuery::new(self.limit.get() as i64, Some(&self.symbols_input)).tickers;
        match &self.last_query {
            Some(q) => q.tickers != current,
            None => current.is_some(),
        }
    }

    /// First fetch. Later calls do nothing.
    pub fn activate(&mut self) -> Option<Generation> {
        if self.activated {
            return None;
        }
        self.activated = true;
        Some(self.fetch_current())
    }

    /// Fetches only when the clamped limit actually changes.
    pub fn set_limit(&mut self, limit: i64) -> Option<Generation> {
        let limit = Limit::new(limit);
        if limit == self.limit {
            return None;
        }
        self.limit = limit;
        Some(self.fetch_current())
    }

    /// Store the custom symbol text. Never fetches.
    pub fn set_symbols_input(&mut self, text: impl Into<String>) {
        self.symbols_input = text.into();
        debug!(input = %self.symbols_input, "symbols input changed; waiting for refresh or limit change");
    }

    /// Bump the refresh token and fetch, even if nothing changed.
    pub fn refresh(&mut self) -> Generation {
        self.refresh_token += 1;
        self.activated = true;
        self.fetch_current()
    }

    fn fetch_current(&mut self) -> Generation {
        let symbols = self.symbols_input.clone();
        self.request_signals(self.limit.get() as i64, Some(&symbols))
    }

    /// Issue a signals request. `limit` is clamped to `[1, 50]`; `symbols` is
    /// free-form text, normalized before use.
    pub fn request_signals(&mut self, limit: i64, symbols: Option<&str>) -> Generation {
        let query = SignalsQuery::new(limit, symbols);
        self.limit = query.limit;
        self.last_query = Some(query.clone());

        let (generation, tx) = self.slot.begin(MainViewState::Loading);
        info!(
            %generation,
            limit = query.limit.get(),
            tickers = query.tickers.as_deref().unwrap_or("<default>"),
            "requesting signals"
        );

        let api = self.api.clone();
        let job = Box::new(move || {
            let result = api.fetch_signals(&query);
            // The receiver lives as long as the controller; a send error only
            // means the controller is gone.
            let _ = tx.send(Completion { generation, result });
        });
        if let Err(e) = self.dispatcher.dispatch("signals", job) {
            warn!(%generation, error = %e, "could not start signals request");
            self.slot.settle_now(
                generation,
                MainViewState::Failed(format!("could not start request: {e}")),
            );
        }
        generation
    }

    /// Commit completions that have arrived. Call once per tick on the control thread.
    pub fn pump(&mut self) -> usize {
        self.slot.drain(commit)
    }

    /// Block until the list leaves `Loading` or `timeout` passes.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        self.slot.wait(timeout, |s| !s.is_loading(), commit)
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&MainViewState) + Send + 'static,
    {
        self.slot.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.slot.unsubscribe(id)
    }
}

fn commit(result: SignalsResult) -> MainViewState {
    match result {
        Ok(snapshot) => {
            debug!(rows = snapshot.len(), "signals loaded");
            MainViewState::Loaded(snapshot)
        }
        Err(e) => {
            warn!(error = %e, "signals request failed");
            MainViewState::Failed(e.to_string())
        }
    }
}
