//! Centralized constants for default endpoints, UA and retry tuning.

use std::time::Duration;

/// Identifies this client to the provider.
pub(crate) const USER_AGENT: &str = concat!("instrument-history/", env!("CARGO_PKG_VERSION"));

/// Instrument detail API base (ticker is appended).
pub(crate) const DEFAULT_BASE_INSTRUMENT: &str = "http://127.0.0.1:8000/api/instrument/";

/// Retries allowed after the initial request.
pub(crate) const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// First backoff step; doubles per attempt.
pub(crate) const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(500);

/// Upper bound of the random delay added to every retry.
pub(crate) const DEFAULT_MAX_JITTER: Duration = Duration::from_millis(100);
