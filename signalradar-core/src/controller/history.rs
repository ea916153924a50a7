//! History controller — owns the chart modal state.
//!
//! Independent of the main list: its own slot, its own generation counter.
//! Opening a ticker supersedes whatever was loading before; closing stales
//! any request still in flight.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use super::dispatch::Dispatch;
use crate::data::{ApiError, SignalApi};
use crate::domain::HistorySnapshot;
use crate::state::{Completion, Generation, ModalViewState, RequestSlot, SubscriptionId};

type HistoryResult = (String, Result<HistorySnapshot, ApiError>);

pub struct HistoryController {
    api: Arc<dyn SignalApi>,
    dispatcher: Arc<dyn Dispatch>,
    slot: RequestSlot<ModalViewState, HistoryResult>,
    days: u32,
}

impl HistoryController {
    pub fn new(api: Arc<dyn SignalApi>, dispatcher: Arc<dyn Dispatch>, days: u32) -> Self {
        Self {
            api,
            dispatcher,
            slot: RequestSlot::new("history", ModalViewState::Closed),
            days,
        }
    }

    pub fn state(&self) -> &ModalViewState {
        self.slot.state()
    }

    pub fn days(&self) -> u32 {
        self.days
    }

    /// Open the modal for `ticker` and fetch its history.
    pub fn open_history(&mut self, ticker: &str) -> Generation {
        let ticker = ticker.trim().to_uppercase();
        let (generation, tx) = self.slot.begin(ModalViewState::Loading(ticker.clone()));

        if ticker.is_empty() {
            self.slot
                .settle_now(generation, ModalViewState::Failed(ticker, "empty ticker".into()));
            return generation;
        }

        info!(%generation, %ticker, days = self.days, "requesting history");
        let api = self.api.clone();
        let days = self.days;
        let requested = ticker.clone();
        let job = Box::new(move || {
            let result = api.fetch_history(&requested, days);
            let _ = tx.send(Completion {
                generation,
                result: (requested, result),
            });
        });
        if let Err(e) = self.dispatcher.dispatch("history", job) {
            warn!(%generation, error = %e, "could not start history request");
            self.slot.settle_now(
                generation,
                ModalViewState::Failed(ticker, format!("could not start request: {e}")),
            );
        }
        generation
    }

    /// Close the modal. Any in-flight response is discarded when it arrives.
    pub fn close_history(&mut self) {
        if let Some(ticker) = self.state().ticker() {
            debug!(%ticker, "closing history");
        }
        self.slot.reset(ModalViewState::Closed);
    }

    pub fn pump(&mut self) -> usize {
        self.slot.drain(commit)
    }

    /// Block until the modal leaves `Loading` or `timeout` passes.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        self.slot.wait(timeout, |s| !s.is_loading(), commit)
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&ModalViewState) + Send + 'static,
    {
        self.slot.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.slot.unsubscribe(id)
    }
}

fn commit((ticker, result): HistoryResult) -> ModalViewState {
    match result {
        Ok(history) => {
            debug!(%ticker, points = history.points.len(), "history loaded");
            ModalViewState::Loaded(ticker, history)
        }
        Err(e) => {
            warn!(%ticker, error = %e, "history request failed");
            ModalViewState::Failed(ticker, e.to_string())
        }
    }
}
