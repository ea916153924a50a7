//! Row limit for the signals request.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of ranked rows to request, always within `[Limit::MIN, Limit::MAX]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "i64", into = "u32")]
pub struct Limit(u32);

impl Limit {
    pub const MIN: u32 = 1;
    pub const MAX: u32 = 50;
    pub const DEFAULT: Limit = Limit(15);

    /// Clamp any integer into range.
    pub fn new(n: i64) -> Self {
        Limit(n.clamp(Self::MIN as i64, Self::MAX as i64) as u32)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// Step by `delta`, clamping at the bounds.
    pub fn offset(self, delta: i64) -> Self {
        Self::new(self.0 as i64 + delta)
    }
}

impl Default for Limit {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl From<i64> for Limit {
    fn from(n: i64) -> Self {
        Limit::new(n)
    }
}

impl From<Limit> for u32 {
    fn from(l: Limit) -> u32 {
        l.0
    }
}

impl fmt::Display for Limit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
