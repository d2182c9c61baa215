use std::time::{Duration, SystemTime, UNIX_EPOCH};

use tokio::time::Instant;

/// Source of the invocation's remaining execution time.
pub trait RemainingTime: Send + Sync {
    fn remaining(&self) -> Duration;
}

/// A fixed point in time after which the invocation is out of budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn at(at: Instant) -> Self {
        Self { at }
    }

    /// Deadline `budget` from now.
    pub fn after(budget: Duration) -> Self {
        Self::at(Instant::now() + budget)
    }

    /// Deadline from a wall-clock timestamp in milliseconds since the epoch,
    /// as reported by the Lambda invocation context.
    ///
    /// A deadline already in the past yields zero remaining time.
    pub fn from_epoch_millis(deadline_ms: u64) -> Self {
        let now_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|now| now.as_millis() as u64)
            .unwrap_or_default();

        Self::after(Duration::from_millis(deadline_ms.saturating_sub(now_ms)))
    }
}

impl RemainingTime for Deadline {
    fn remaining(&self) -> Duration {
        self.at.saturating_duration_since(Instant::now())
    }
}
