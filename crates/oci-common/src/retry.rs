//! Retry policies, per-call overrides and retry predicates.

use rand::Rng;
use std::time::Duration;

use crate::error::Error;

/// Retries after the first attempt under [`RetryPolicy::new`].
pub const DEFAULT_MAX_RETRIES: u32 = 3;

const BASE_DELAY: Duration = Duration::from_millis(500);
const DELAY_CAP: Duration = Duration::from_secs(30);

/// Exponential backoff: each retry waits twice as long as the one before,
/// up to a cap.
///
/// `max_retries` counts retries after the first attempt, so a policy with
/// `max_retries = 2` makes at most three transport calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    max_retries: u32,
    base_delay: Duration,
    delay_cap: Duration,
    jitter: bool,
}

impl RetryPolicy {
    /// Three retries starting at 500ms, capped at 30s, with jitter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: BASE_DELAY,
            delay_cap: DELAY_CAP,
            jitter: true,
        }
    }

    /// Number of retries after the first attempt.
    #[must_use]
    pub const fn with_max_retries(mut self, retries: u32) -> Self {
        self.max_retries = retries;
        self
    }

    /// Wait before the first retry.
    #[must_use]
    pub const fn with_initial_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Upper bound on any single wait.
    #[must_use]
    pub const fn with_max_delay(mut self, delay: Duration) -> Self {
        self.delay_cap = delay;
        self
    }

    /// Randomise each wait into `[delay/2, delay]`.
    #[must_use]
    pub const fn with_jitter(mut self, jitter: bool) -> Self {
        self.jitter = jitter;
        self
    }

    /// Retries after the first attempt.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Total transport calls this policy allows.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }

    /// Wait before retry number `retry` (1-indexed). Zero for `retry == 0`.
    #[must_use]
    pub fn delay_for_attempt(&self, retry: u32) -> Duration {
        let Some(doublings) = retry.checked_sub(1) else {
            return Duration::ZERO;
        };
        let factor = 2u32.checked_pow(doublings).unwrap_or(u32::MAX);
        let delay = self.base_delay.saturating_mul(factor).min(self.delay_cap);
        if self.jitter {
            delay.mul_f64(rand::thread_rng().gen_range(0.5..=1.0))
        } else {
            delay
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-call retry setting.
///
/// Precedence: an explicit policy wins, then an explicit `Disabled`, then the
/// client's default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryOverride {
    /// Use the client's default policy.
    #[default]
    Inherit,
    /// Make exactly one attempt, whatever the client default.
    Disabled,
    /// Use this policy for this call.
    Policy(RetryPolicy),
}

impl RetryOverride {
    /// Resolve against the client default. `None` means a single attempt.
    #[must_use]
    pub fn resolve(self, client_default: Option<RetryPolicy>) -> Option<RetryPolicy> {
        match self {
            Self::Policy(policy) => Some(policy),
            Self::Disabled => None,
            Self::Inherit => client_default,
        }
    }
}

impl From<RetryPolicy> for RetryOverride {
    fn from(policy: RetryPolicy) -> Self {
        Self::Policy(policy)
    }
}

impl From<Option<RetryPolicy>> for RetryOverride {
    fn from(policy: Option<RetryPolicy>) -> Self {
        policy.map_or(Self::Disabled, Self::Policy)
    }
}

/// Decides whether a failed attempt is retried.
pub trait RetryPredicate: Send + Sync + std::fmt::Debug {
    /// Returns true if `error` on attempt `attempt` (1-indexed) should be retried.
    fn should_retry(&self, error: &Error, attempt: u32) -> bool;
}

/// Retry every error classified by [`Error::is_retryable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RetryOnRetryable;

impl RetryPredicate for RetryOnRetryable {
    fn should_retry(&self, error: &Error, _attempt: u32) -> bool {
        error.is_retryable()
    }
}
