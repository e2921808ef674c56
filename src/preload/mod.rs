//! Best-effort cache warming for many tickers at once.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::future::join_all;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::core::Lookback;
use crate::history::HistoryFetcher;

const DEFAULT_CONCURRENCY: usize = 5;

/// Counters from one [`Preloader::preload`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PreloadReport {
    /// Unique tickers after deduplication.
    pub requested: usize,
    /// Tickers fetched from the provider and now cached.
    pub fetched: usize,
    /// Tickers already cached when a worker reached them.
    pub skipped: usize,
    /// Tickers whose fetch failed; the error was dropped.
    pub failed: usize,
}

/// Warms the history cache for a list of tickers with a fixed number of workers.
///
/// A small pool drains a shared queue instead of firing one request per ticker,
/// so warming a whole watchlist stays under the provider's rate limit.
#[derive(Debug, Clone)]
pub struct Preloader {
    fetcher: HistoryFetcher,
    concurrency: usize,
    lookback: Lookback,
}

impl Preloader {
    /// Creates a preloader that fetches through `fetcher`. (Default concurrency: 5)
    pub const fn new(fetcher: HistoryFetcher) -> Self {
        Self {
            fetcher,
            concurrency: DEFAULT_CONCURRENCY,
            lookback: Lookback::Max,
        }
    }

    /// Sets the number of concurrent workers. Values below 1 are treated as 1.
    #[must_use]
    pub fn concurrency(mut self, n: usize) -> Self {
        self.concurrency = n.max(1);
        self
    }

    /// Sets the window requested for each ticker. (Default: `Lookback::Max`)
    #[must_use]
    pub const fn lookback(mut self, lookback: Lookback) -> Self {
        self.lookback = lookback;
        self
    }

    /// Fetches every ticker not already cached. Never fails as a whole: per-ticker
    /// errors are counted in the report and otherwise dropped.
    ///
    /// Duplicate tickers are fetched once. Once `cancel` fires, workers stop
    /// taking new tickers and in-flight fetches end without caching.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub async fn preload<I, S>(&self, tickers: I, cancel: &CancellationToken) -> PreloadReport
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut seen = HashSet::new();
        let unique: VecDeque<String> = tickers
            .into_iter()
            .map(Into::into)
            .filter(|t| seen.insert(t.clone()))
            .collect();

        let requested = unique.len();
        let workers = self.concurrency.min(requested);
        let queue = Mutex::new(unique);
        let fetched = AtomicUsize::new(0);
        let skipped = AtomicUsize::new(0);
        let failed = AtomicUsize::new(0);

        let (queue, fetched_ref, skipped_ref, failed_ref) = (&queue, &fetched, &skipped, &failed);
        let pool = (0..workers).map(|_| async move {
            loop {
                if cancel.is_cancelled() {
                    break;
                }
                let Some(ticker) = queue.lock().await.pop_front() else {
                    break;
                };

                // the UI or another worker may have filled it meanwhile
                if self.fetcher.cache().contains(&ticker) {
                    skipped_ref.fetch_add(1, Ordering::Relaxed);
                    continue;
                }

                match self.fetcher.fetch(&ticker, self.lookback, cancel).await {
                    Ok(_) => {
                        fetched_ref.fetch_add(1, Ordering::Relaxed);
                    }
                    Err(_e) => {
                        #[cfg(feature = "tracing")]
                        tracing::warn!(ticker = %ticker, error = %_e, "preload failed");
                        failed_ref.fetch_add(1, Ordering::Relaxed);
                    }
                }
            }
        });
        join_all(pool).await;

        let report = PreloadReport {
            requested,
            fetched: fetched.into_inner(),
            skipped: skipped.into_inner(),
            failed: failed.into_inner(),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(?report, "preload finished");

        report
    }
}
