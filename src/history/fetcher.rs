use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::cache::HistoryCache;
use crate::core::{
    CacheMode, HistoryError, InstrumentHistory, InstrumentSource, Lookback, RetryPolicy,
};

/// Runs one logical history fetch per call: cache first, then the provider with
/// rate-limit aware retries, then a write-back into the shared cache.
///
/// Cheap to clone; clones share the source and the cache.
///
/// # Example
///
/// ```no_run
/// # use std::sync::Arc;
/// # use instrument_history::{ApiClient, HistoryCache, HistoryFetcher, Lookback};
/// # use tokio_util::sync::CancellationToken;
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::builder().build()?;
/// let fetcher = HistoryFetcher::new(Arc::new(client), HistoryCache::new());
///
/// let cancel = CancellationToken::new();
/// let history = fetcher.fetch("VOD.L", Lookback::Max, &cancel).await?;
/// println!("{} closes cached", history.prices.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct HistoryFetcher {
    source: Arc<dyn InstrumentSource>,
    cache: HistoryCache,
    retry: RetryPolicy,
}

impl HistoryFetcher {
    /// Creates a fetcher over `source` that reads and writes `cache`.
    pub fn new(source: Arc<dyn InstrumentSource>, cache: HistoryCache) -> Self {
        Self {
            source,
            cache,
            retry: RetryPolicy::default(),
        }
    }

    /// Overrides the default retry policy.
    #[must_use]
    pub fn retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry = policy;
        self
    }

    /// The cache this fetcher writes to.
    pub const fn cache(&self) -> &HistoryCache {
        &self.cache
    }

    /// Fetches `ticker`, serving it from the cache when present.
    ///
    /// # Errors
    ///
    /// - [`HistoryError::RateLimitExceeded`] once every retry hit a rate limit.
    /// - [`HistoryError::Cancelled`] if `cancel` fires; nothing is cached then.
    /// - Any other provider error, unchanged and without retrying.
    pub async fn fetch(
        &self,
        ticker: &str,
        lookback: Lookback,
        cancel: &CancellationToken,
    ) -> Result<InstrumentHistory, HistoryError> {
        self.fetch_with_mode(ticker, lookback, CacheMode::Use, cancel)
            .await
    }

    /// Like [`fetch`](Self::fetch), with explicit control over cache use.
    ///
    /// `CacheMode::Refresh` is the "force refresh" path: it always goes to the
    /// provider and overwrites the cached entry on success.
    ///
    /// # Errors
    ///
    /// See [`fetch`](Self::fetch).
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, cancel), err))]
    pub async fn fetch_with_mode(
        &self,
        ticker: &str,
        lookback: Lookback,
        mode: CacheMode,
        cancel: &CancellationToken,
    ) -> Result<InstrumentHistory, HistoryError> {
        if mode == CacheMode::Use
            && let Some(hit) = self.cache.get(ticker)
        {
            #[cfg(feature = "tracing")]
            tracing::debug!(ticker, "history cache hit");
            return Ok(hit);
        }

        let mut attempt: u32 = 0;
        loop {
            if cancel.is_cancelled() {
                return Err(HistoryError::Cancelled);
            }

            let res = tokio::select! {
                biased;
                () = cancel.cancelled() => Err(HistoryError::Cancelled),
                res = self.source.get_instrument_detail(ticker, lookback, cancel) => res,
            };

            let err = match res {
                Ok(detail) => {
                    let history = detail.into_history(ticker);
                    if mode != CacheMode::Bypass {
                        self.cache.put(ticker, history.clone());
                    }
                    return Ok(history);
                }
                Err(e) => e,
            };

            if err.is_cancelled() {
                return Err(err);
            }

            let decision = self.retry.decide(&err, attempt);
            if !decision.retry {
                if err.is_rate_limited() {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(ticker, retries = attempt, "rate limit retries exhausted");
                    return Err(HistoryError::RateLimitExceeded {
                        ticker: ticker.to_string(),
                        retries: attempt,
                    });
                }
                return Err(err);
            }

            #[cfg(feature = "tracing")]
            tracing::debug!(
                ticker,
                attempt,
                delay_ms = u64::try_from(decision.delay.as_millis()).unwrap_or(u64::MAX),
                "rate limited, backing off"
            );

            tokio::select! {
                biased;
                () = cancel.cancelled() => return Err(HistoryError::Cancelled),
                () = tokio::time::sleep(decision.delay) => {}
            }
            attempt += 1;
        }
    }
}

impl std::fmt::Debug for HistoryFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryFetcher")
            .field("cache_len", &self.cache.len())
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}
