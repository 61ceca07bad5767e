//! Bounded retry for generated-alias collisions.
//!
//! [`RetryPolicy`] is the delay schedule, [`AllocationState`] the transitions.
//! Only a uniqueness conflict moves the machine forward; every other store
//! failure is terminal.

use std::time::Duration;

use crate::error::StoreError;

/// Attempt budget and inter-attempt backoff.
///
/// The delay before attempt `n + 1` is `base_delay * multiplier^(n - 1)`,
/// capped at `max_delay`.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub attempts: u32,
    pub base_delay: Duration,
    pub multiplier: f64,
    pub max_delay: Duration,
}

impl RetryPolicy {
    pub fn new(attempts: u32, base_delay: Duration, multiplier: f64) -> Self {
        Self {
            attempts: attempts.max(1),
            base_delay,
            multiplier: if multiplier.is_finite() && multiplier >= 1.0 {
                multiplier
            } else {
                1.0
            },
            max_delay: Duration::from_secs(1),
        }
    }

    pub fn with_max_delay(mut self, max_delay: Duration) -> Self {
        self.max_delay = max_delay;
        self
    }

    /// Retries back to back. Used by tests and by callers that already hold
    /// a deadline.
    pub fn no_delay(attempts: u32) -> Self {
        Self::new(attempts, Duration::ZERO, 1.0)
    }

    /// Delay to wait after failed attempt `attempt` (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        if self.base_delay.is_zero() {
            return Duration::ZERO;
        }
        let exponent = attempt.saturating_sub(1).min(i32::MAX as u32) as i32;
        let factor = self.multiplier.powi(exponent);
        let nanos = (self.base_delay.as_nanos() as f64 * factor).round();
        if !nanos.is_finite() || nanos >= self.max_delay.as_nanos() as f64 {
            return self.max_delay;
        }
        Duration::from_nanos(nanos as u64)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5, Duration::from_millis(10), 2.0)
    }
}

/// State of one generated-alias allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationState {
    /// About to make attempt `n` (1-based).
    Attempting(u32),
    Succeeded(String),
    ExhaustedConflict,
    FailedOther(StoreError),
}

impl AllocationState {
    pub fn start() -> Self {
        Self::Attempting(1)
    }

    /// Applies the outcome of the current attempt.
    ///
    /// Terminal states are returned unchanged.
    pub fn next(self, outcome: Result<String, StoreError>, max_attempts: u32) -> Self {
        let Self::Attempting(n) = self else {
            return self;
        };

        match outcome {
            Ok(alias) => Self::Succeeded(alias),
            Err(StoreError::DuplicateKey) if n < max_attempts => Self::Attempting(n + 1),
            Err(StoreError::DuplicateKey) => Self::ExhaustedConflict,
            Err(other) => Self::FailedOther(other),
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Attempting(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.attempts, 5);
        assert_eq!(policy.base_delay, Duration::from_millis(10));
        assert_eq!(policy.max_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_attempts_are_at_least_one() {
        assert_eq!(RetryPolicy::no_delay(0).attempts, 1);
    }

    #[test]
    fn test_delay_grows_and_is_capped() {
        let policy = RetryPolicy::new(10, Duration::from_millis(10), 2.0)
            .with_max_delay(Duration::from_millis(50));

        assert_eq!(policy.delay_for(1), Duration::from_millis(10));
        assert_eq!(policy.delay_for(2), Duration::from_millis(20));
        assert_eq!(policy.delay_for(3), Duration::from_millis(40));
        assert_eq!(policy.delay_for(4), Duration::from_millis(50));
        assert_eq!(policy.delay_for(30), Duration::from_millis(50));
    }

    #[test]
    fn test_no_delay_policy() {
        let policy = RetryPolicy::no_delay(3);
        assert_eq!(policy.delay_for(1), Duration::ZERO);
        assert_eq!(policy.delay_for(3), Duration::ZERO);
    }

    #[test]
    fn test_conflict_advances_until_budget() {
        let state = AllocationState::start();
        let state = state.next(Err(StoreError::DuplicateKey), 2);
        assert_eq!(state, AllocationState::Attempting(2));

        let state = state.next(Err(StoreError::DuplicateKey), 2);
        assert_eq!(state, AllocationState::ExhaustedConflict);
        assert!(state.is_terminal());
    }

    #[test]
    fn test_success_and_other_errors_are_terminal() {
        let ok = AllocationState::start().next(Ok("abc".to_string()), 5);
        assert_eq!(ok, AllocationState::Succeeded("abc".to_string()));

        let failed = AllocationState::start().next(Err(StoreError::Unavailable("down".into())), 5);
        assert_eq!(
            failed,
            AllocationState::FailedOther(StoreError::Unavailable("down".into()))
        );

        // Terminal states ignore further outcomes.
        assert_eq!(failed.clone().next(Ok("x".into()), 5), failed);
    }
}
