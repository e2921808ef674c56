use std::sync::Arc;
use std::time::Duration;

use instrument_history::{HistoryCache, HistoryFetcher, Preloader};
use tokio_util::sync::CancellationToken;

use crate::common::{FakeSource, init_tracing};

fn tickers(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("T{i:02}")).collect()
}

#[tokio::test(start_paused = true)]
async fn preload_never_exceeds_worker_count() {
    init_tracing();
    let source = Arc::new(FakeSource::with_latency(Duration::from_millis(50)));
    let cache = HistoryCache::new();
    let fetcher = HistoryFetcher::new(source.clone(), cache.clone());

    let report = Preloader::new(fetcher)
        .concurrency(5)
        .preload(tickers(20), &CancellationToken::new())
        .await;

    assert_eq!(source.total_calls(), 20);
    assert_eq!(source.max_in_flight(), 5);
    assert_eq!(cache.len(), 20);
    assert_eq!(report.requested, 20);
    assert_eq!(report.fetched, 20);
    assert_eq!(report.failed, 0);
}

#[tokio::test(start_paused = true)]
async fn fewer_tickers_than_workers() {
    let source = Arc::new(FakeSource::with_latency(Duration::from_millis(50)));
    let fetcher = HistoryFetcher::new(source.clone(), HistoryCache::new());

    let report = Preloader::new(fetcher)
        .concurrency(8)
        .preload(tickers(3), &CancellationToken::new())
        .await;

    assert_eq!(source.max_in_flight(), 3);
    assert_eq!(report.fetched, 3);
}

#[tokio::test(start_paused = true)]
async fn zero_concurrency_still_makes_progress() {
    let source = Arc::new(FakeSource::with_latency(Duration::from_millis(10)));
    let fetcher = HistoryFetcher::new(source.clone(), HistoryCache::new());

    let report = Preloader::new(fetcher)
        .concurrency(0)
        .preload(tickers(4), &CancellationToken::new())
        .await;

    assert_eq!(source.max_in_flight(), 1);
    assert_eq!(report.fetched, 4);
}

#[tokio::test]
async fn empty_input_is_a_no_op() {
    let source = Arc::new(FakeSource::new());
    let fetcher = HistoryFetcher::new(source.clone(), HistoryCache::new());

    let report = Preloader::new(fetcher)
        .preload(Vec::<String>::new(), &CancellationToken::new())
        .await;

    assert_eq!(report, Default::default());
    assert_eq!(source.total_calls(), 0);
}
