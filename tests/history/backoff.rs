use std::sync::Arc;
use std::time::Duration;

use instrument_history::{HistoryCache, HistoryError, HistoryFetcher, Lookback};
use tokio_util::sync::CancellationToken;

use crate::common::{FakeSource, Reply};

fn always_rate_limited(ticker: &str) -> FakeSource {
    FakeSource::new().script(ticker, std::iter::repeat_n(Reply::RateLimited(None), 10))
}

#[tokio::test(start_paused = true)]
async fn backoff_doubles_then_gives_up_as_rate_limit_exceeded() {
    let source = Arc::new(always_rate_limited("VOD.L"));
    let cache = HistoryCache::new();
    let fetcher = HistoryFetcher::new(source.clone(), cache.clone());

    let err = fetcher
        .fetch("VOD.L", Lookback::Max, &CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        HistoryError::RateLimitExceeded { ticker, retries } => {
            assert_eq!(ticker, "VOD.L");
            assert_eq!(retries, 3);
        }
        other => panic!("expected RateLimitExceeded, got {other:?}"),
    }

    // initial request + 3 retries
    let times = source.call_times("VOD.L");
    assert_eq!(times.len(), 4);

    let jitter = Duration::from_millis(100);
    for (i, expected_ms) in [500u64, 1000, 2000].into_iter().enumerate() {
        let gap = times[i + 1] - times[i];
        let expected = Duration::from_millis(expected_ms);
        assert!(
            gap >= expected && gap <= expected + jitter,
            "retry {i}: waited {gap:?}, expected {expected:?} + jitter"
        );
    }
    assert!(cache.is_empty());
}

#[tokio::test(start_paused = true)]
async fn exhausted_rate_limit_is_distinguishable_from_hard_failure() {
    let source = Arc::new(always_rate_limited("BP.L"));
    let fetcher = HistoryFetcher::new(source, HistoryCache::new());

    let err = fetcher
        .fetch("BP.L", Lookback::Max, &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(err.is_rate_limit_exhausted());
    assert!(!err.is_rate_limited());
}

#[tokio::test(start_paused = true)]
async fn recovers_when_rate_limit_lifts() {
    let source = Arc::new(FakeSource::new().script(
        "AZN.L",
        [Reply::RateLimited(None), Reply::RateLimited(None)],
    ));
    let cache = HistoryCache::new();
    let fetcher = HistoryFetcher::new(source.clone(), cache.clone());

    let history = fetcher
        .fetch("AZN.L", Lookback::Max, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(source.calls("AZN.L"), 3);
    assert_eq!(cache.get("AZN.L"), Some(history));
}
