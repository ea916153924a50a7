//! Detects results of superseded requests.
//!
//! Every state-mutating call takes a ticket from `issue`. When its result
//! arrives it may only be committed if that ticket is still the latest one
//! issued for the slot. `invalidate` advances the counter without a request,
//! so anything still in flight is discarded on arrival.

use std::fmt;

/// Ticket identifying one request within a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "g{}", self.0)
    }
}

#[derive(Debug, Default)]
pub struct GenerationGuard {
    latest: u64,
}

impl GenerationGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a new ticket; every earlier ticket becomes stale.
    pub fn issue(&mut self) -> Generation {
        self.latest += 1;
        Generation(self.latest)
    }

    /// Make every outstanding ticket stale without issuing a new one.
    pub fn invalidate(&mut self) {
        self.latest += 1;
    }

    pub fn is_current(&self, ticket: Generation) -> bool {
        ticket.0 == self.latest
    }

    pub fn latest(&self) -> u64 {
        self.latest
    }
}
