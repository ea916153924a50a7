//! Main list and chart modal state machines.

use crate::domain::{HistorySnapshot, SignalsSnapshot};

/// State of the ranked signal list.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum MainViewState {
    #[default]
    Idle,
    Loading,
    Loaded(SignalsSnapshot),
    Failed(String),
}

impl MainViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, MainViewState::Loading)
    }

    pub fn snapshot(&self) -> Option<&SignalsSnapshot> {
        match self {
            MainViewState::Loaded(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            MainViewState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MainViewState::Idle => "idle",
            MainViewState::Loading => "loading",
            MainViewState::Loaded(_) => "loaded",
            MainViewState::Failed(_) => "failed",
        }
    }
}

/// State of the per-ticker history modal.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ModalViewState {
    #[default]
    Closed,
    Loading(String),
    Loaded(String, HistorySnapshot),
    Failed(String, String),
}

impl ModalViewState {
    pub fn is_open(&self) -> bool {
        !matches!(self, ModalViewState::Closed)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ModalViewState::Loading(_))
    }

    /// The ticker the modal is showing, if open.
    pub fn ticker(&self) -> Option<&str> {
        match self {
            ModalViewState::Closed => None,
            ModalViewState::Loading(t)
            | ModalViewState::Loaded(t, _)
            | ModalViewState::Failed(t, _) => Some(t),
        }
    }

    pub fn history(&self) -> Option<&HistorySnapshot> {
        match self {
            ModalViewState::Loaded(_, history) => Some(history),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ModalViewState::Failed(_, message) => Some(message),
            _ => None,
        }
    }
}
