//! The core as seen by a render surface.
//!
//! Bundles both controllers with the observable filter criteria. A render
//! surface subscribes to the three, calls `pump` once per tick, and reads
//! `visible_rows` to draw the table.

use std::sync::Arc;

use crate::config::RadarConfig;
use crate::controller::{Dispatch, HistoryController, RequestController, ThreadDispatcher};
use crate::data::{ApiError, HttpSignalApi, SignalApi};
use crate::domain::SignalRow;
use crate::filter::{self, FilterCriteria};
use crate::state::{Observable, SubscriptionId};

pub struct Radar {
    signals: RequestController,
    history: HistoryController,
    criteria: Observable<FilterCriteria>,
}

impl Radar {
    pub fn new(config: &RadarConfig, api: Arc<dyn SignalApi>, dispatcher: Arc<dyn Dispatch>) -> Self {
        tracing::info!(
            api = api.name(),
            limit = config.default_limit.get(),
            history_days = config.history_days,
            "radar ready"
        );
        Self {
            signals: RequestController::new(api.clone(), dispatcher.clone(), config.default_limit),
            history: HistoryController::new(api, dispatcher, config.history_days),
            criteria: Observable::new(FilterCriteria::default()),
        }
    }

    /// HTTP client against `config.api_base`, one thread per request.
    pub fn connect(config: &RadarConfig) -> Result<Self, ApiError> {
        let api = Arc::new(HttpSignalApi::from_config(config)?);
        Ok(Self::new(config, api, Arc::new(ThreadDispatcher::new())))
    }

    pub fn signals(&self) -> &RequestController {
        &self.signals
    }

    pub fn signals_mut(&mut self) -> &mut RequestController {
        &mut self.signals
    }

    pub fn history(&self) -> &HistoryController {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryController {
        &mut self.history
    }

    pub fn criteria(&self) -> &FilterCriteria {
        self.criteria.get()
    }

    /// Apply one or more criteria mutators and notify subscribers.
    pub fn update_criteria<R>(&mut self, f: impl FnOnce(&mut FilterCriteria) -> R) -> R {
        self.criteria.update(f)
    }

    pub fn subscribe_criteria<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&FilterCriteria) + Send + 'static,
    {
        self.criteria.subscribe(listener)
    }

    /// Loaded rows passing the current criteria, in server order. Empty unless loaded.
    pub fn visible_rows(&self) -> Vec<SignalRow> {
        match self.signals.state().snapshot() {
            Some(snapshot) => filter::apply(&snapshot.rows, self.criteria.get()),
            None => Vec::new(),
        }
    }

    /// `visible_rows` borrowed, each paired with its server rank.
    pub fn ranked_rows(&self) -> Vec<(usize, &SignalRow)> {
        match self.signals.state().snapshot() {
            Some(snapshot) => filter::ranked(&snapshot.rows, self.criteria.get()).collect(),
            None => Vec::new(),
        }
    }

    /// Number of loaded rows before filtering.
    pub fn total_rows(&self) -> usize {
        self.signals.state().snapshot().map_or(0, |s| s.len())
    }

    /// Drain both controllers. Returns how many state transitions were committed.
    pub fn pump(&mut self) -> usize {
        self.signals.pump() + self.history.pump()
    }
}
