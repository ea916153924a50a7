//! One asynchronously-fed state slot.
//!
//! A slot pairs an observable state with its generation guard and the channel
//! on which off-thread requests report back. Only the owning controller calls
//! into it, on the control thread, so the guard needs no locking. Completions
//! carry the ticket they were issued with; `accept` commits a completion only
//! while that ticket is current and silently drops it otherwise.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::{Duration, Instant};

use super::generation::{Generation, GenerationGuard};
use super::observable::{Observable, SubscriptionId};

/// Result of an off-thread request, tagged with its ticket.
#[derive(Debug)]
pub struct Completion<R> {
    pub generation: Generation,
    pub result: R,
}

pub struct RequestSlot<S, R> {
    name: &'static str,
    guard: GenerationGuard,
    state: Observable<S>,
    tx: Sender<Completion<R>>,
    rx: Receiver<Completion<R>>,
}

impl<S, R> RequestSlot<S, R> {
    pub fn new(name: &'static str, initial: S) -> Self {
        let (tx, rx) = mpsc::channel();
        Self {
            name,
            guard: GenerationGuard::new(),
            state: Observable::new(initial),
            tx,
            rx,
        }
    }

    pub fn state(&self) -> &S {
        self.state.get()
    }

    /// Start a request: issue a ticket, publish `loading`, and hand back the
    /// sender the request must report on.
    pub fn begin(&mut self, loading: S) -> (Generation, Sender<Completion<R>>) {
        let generation = self.guard.issue();
        self.state.set(loading);
        (generation, self.tx.clone())
    }

    /// Publish `state` and stale every outstanding request.
    pub fn reset(&mut self, state: S) {
        self.guard.invalidate();
        self.state.set(state);
    }

    /// Commit a terminal state for `generation` without a round trip, e.g.
    /// when a request could not be started. Ignored if no longer current.
    pub fn settle_now(&mut self, generation: Generation, state: S) -> bool {
        if self.guard.is_current(generation) {
            self.state.set(state);
            true
        } else {
            false
        }
    }

    /// Commit `completion` through `commit` if its ticket is still current.
    pub fn accept(&mut self, completion: Completion<R>, commit: impl FnOnce(R) -> S) -> bool {
        if self.guard.is_current(completion.generation) {
            self.state.set(commit(completion.result));
            true
        } else {
            tracing::debug!(
                slot = self.name,
                stale = %completion.generation,
                latest = self.guard.latest(),
                "discarding superseded response"
            );
            false
        }
    }

    /// Drain every completion that has arrived, without blocking.
    /// Returns how many were committed.
    pub fn drain(&mut self, mut commit: impl FnMut(R) -> S) -> usize {
        let mut committed = 0;
        while let Ok(completion) = self.rx.try_recv() {
            if self.accept(completion, &mut commit) {
                committed += 1;
            }
        }
        committed
    }

    /// Block until `settled` holds for the state or `timeout` elapses.
    /// Returns whether the slot settled.
    pub fn wait(
        &mut self,
        timeout: Duration,
        settled: impl Fn(&S) -> bool,
        mut commit: impl FnMut(R) -> S,
    ) -> bool {
        let started = Instant::now();
        loop {
            if settled(self.state.get()) {
                return true;
            }
            let remaining = timeout.saturating_sub(started.elapsed());
            match self.rx.recv_timeout(remaining) {
                Ok(completion) => {
                    self.accept(completion, &mut commit);
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return settled(self.state.get());
                }
            }
        }
    }

    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: FnMut(&S) + Send + 'static,
    {
        self.state.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.state.unsubscribe(id)
    }
}
