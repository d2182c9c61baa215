use std::time::Duration;

/// Delay before the first retry.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(100);

/// Execution time always left untouched by retry delays.
pub const DEFAULT_SAFETY_MARGIN: Duration = Duration::from_millis(200);

/// Exponential backoff capped by the remaining time budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffPolicy {
    pub base_delay: Duration,
    pub safety_margin: Duration,
}

impl Default for BackoffPolicy {
    fn default() -> Self {
        Self {
            base_delay: DEFAULT_BASE_DELAY,
            safety_margin: DEFAULT_SAFETY_MARGIN,
        }
    }
}

impl BackoffPolicy {
    pub fn new(base_delay: Duration, safety_margin: Duration) -> Self {
        Self {
            base_delay,
            safety_margin,
        }
    }

    /// Uncapped delay for a 0-indexed attempt: `base * 2^attempt`.
    pub fn exponential_delay(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    /// Delay to wait before retrying after `attempt`, given the time left.
    ///
    /// Returns `min(base * 2^attempt, remaining - safety_margin)`, or `None`
    /// when the remaining time does not exceed the safety margin. A `None`
    /// means no retry may be scheduled.
    ///
    /// A delay capped by the budget always leaves exactly `safety_margin` at
    /// the next decision, so `remaining == safety_margin` ends the retries
    /// instead of resubmitting with no wait.
    pub fn delay_for(&self, attempt: u32, remaining: Duration) -> Option<Duration> {
        let budget = remaining
            .checked_sub(self.safety_margin)
            .filter(|budget| !budget.is_zero())?;

        Some(self.exponential_delay(attempt).min(budget))
    }
}
