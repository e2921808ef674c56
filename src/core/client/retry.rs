use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::Rng;

use super::constants::{DEFAULT_BASE_DELAY, DEFAULT_MAX_ATTEMPTS, DEFAULT_MAX_JITTER};
use crate::core::HistoryError;

/// Decides whether a failed fetch is retried and how long to wait first.
///
/// Only rate-limit responses are retryable. The delay honors the provider's
/// `Retry-After` hint when it parses, otherwise it is `base_delay * 2^attempt`.
/// A random jitter in `[0, max_jitter]` is added either way so that many tickers
/// tripping the same limit do not retry in lockstep.
#[derive(Clone, Debug)]
pub struct RetryPolicy {
    /// Retries allowed after the initial request.
    pub max_attempts: u32,
    /// Backoff for the first retry; doubles for each subsequent one.
    pub base_delay: Duration,
    /// Upper bound of the random jitter added to every delay.
    pub max_jitter: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            base_delay: DEFAULT_BASE_DELAY,
            max_jitter: DEFAULT_MAX_JITTER,
        }
    }
}

/// Outcome of [`RetryPolicy::decide`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryDecision {
    pub retry: bool,
    pub delay: Duration,
}

impl RetryDecision {
    const STOP: Self = Self {
        retry: false,
        delay: Duration::ZERO,
    };
}

impl RetryPolicy {
    #[must_use]
    pub const fn max_attempts(mut self, n: u32) -> Self {
        self.max_attempts = n;
        self
    }

    #[must_use]
    pub const fn base_delay(mut self, d: Duration) -> Self {
        self.base_delay = d;
        self
    }

    #[must_use]
    pub const fn max_jitter(mut self, d: Duration) -> Self {
        self.max_jitter = d;
        self
    }

    /// Decision for `err` after the 0-indexed `attempt`, measured against the wall clock.
    #[must_use]
    pub fn decide(&self, err: &HistoryError, attempt: u32) -> RetryDecision {
        self.decide_at(err, attempt, Utc::now())
    }

    /// Like [`decide`](Self::decide), with an explicit "now" for HTTP-date hints.
    #[must_use]
    pub fn decide_at(&self, err: &HistoryError, attempt: u32, now: DateTime<Utc>) -> RetryDecision {
        if attempt >= self.max_attempts {
            return RetryDecision::STOP;
        }
        let HistoryError::RateLimited { retry_after } = err else {
            return RetryDecision::STOP;
        };

        let base = retry_after
            .as_deref()
            .and_then(|hint| parse_retry_after(hint, now))
            .unwrap_or_else(|| self.backoff(attempt));

        RetryDecision {
            retry: true,
            delay: base + self.jitter(),
        }
    }

    /// Exponential backoff without jitter: `base_delay * 2^attempt`.
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
    }

    fn jitter(&self) -> Duration {
        let max = u64::try_from(self.max_jitter.as_micros()).unwrap_or(u64::MAX);
        if max == 0 {
            return Duration::ZERO;
        }
        Duration::from_micros(rand::thread_rng().gen_range(0..=max))
    }
}

/// Parses a `Retry-After` value: delta-seconds (`"120"`) or an HTTP date
/// (`"Wed, 21 Oct 2015 07:28:00 GMT"`). Dates in the past yield a zero delay.
#[must_use]
pub fn parse_retry_after(value: &str, now: DateTime<Utc>) -> Option<Duration> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(secs) = value.parse::<u64>() {
        return Some(Duration::from_secs(secs));
    }
    let at = DateTime::parse_from_rfc2822(value).ok()?.with_timezone(&Utc);
    Some((at - now).to_std().unwrap_or(Duration::ZERO))
}

/// Defines how a fetch uses the shared history cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum CacheMode {
    /// Serve a cached entry when present; otherwise fetch and store. (Default)
    #[default]
    Use,
    /// Always fetch from the network and overwrite the cached entry.
    Refresh,
    /// Always fetch from the network and leave the cache untouched.
    Bypass,
}
