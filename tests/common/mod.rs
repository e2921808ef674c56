#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::{Days, NaiveDate};
use instrument_history::core::{DetailFuture, InstrumentSource};
use instrument_history::{HistoryError, InstrumentDetail, Lookback, PricePoint};
use rust_decimal::Decimal;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// One scripted provider answer.
#[derive(Clone, Debug)]
pub enum Reply {
    Ok(InstrumentDetail),
    RateLimited(Option<&'static str>),
    Status(u16),
}

impl Reply {
    fn into_result(self) -> Result<InstrumentDetail, HistoryError> {
        match self {
            Reply::Ok(d) => Ok(d),
            Reply::RateLimited(hint) => Err(HistoryError::RateLimited {
                retry_after: hint.map(str::to_string),
            }),
            Reply::Status(status) => Err(HistoryError::Status {
                status,
                url: "http://fake/".into(),
            }),
        }
    }
}

/// In-memory provider: answers from a per-ticker script, then with `daily_detail(30)`.
/// Records every call with the (possibly paused) tokio clock.
#[derive(Default)]
pub struct FakeSource {
    script: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<(String, Instant)>>,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
    latency: Duration,
}

impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self {
            latency,
            ..Self::default()
        }
    }

    pub fn script<I>(self, ticker: &str, replies: I) -> Self
    where
        I: IntoIterator<Item = Reply>,
    {
        self.script
            .lock()
            .unwrap()
            .entry(ticker.to_string())
            .or_default()
            .extend(replies);
        self
    }

    pub fn calls(&self, ticker: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|(t, _)| t == ticker).count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn call_times(&self, ticker: &str) -> Vec<Instant> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(t, _)| t == ticker)
            .map(|(_, at)| *at)
            .collect()
    }

    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }
}

impl InstrumentSource for FakeSource {
    fn get_instrument_detail<'a>(
        &'a self,
        ticker: &'a str,
        _lookback: Lookback,
        _cancel: &'a CancellationToken,
    ) -> DetailFuture<'a> {
        Box::pin(async move {
            self.calls
                .lock()
                .unwrap()
                .push((ticker.to_string(), Instant::now()));
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            if !self.latency.is_zero() {
                tokio::time::sleep(self.latency).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            let next = self
                .script
                .lock()
                .unwrap()
                .get_mut(ticker)
                .and_then(VecDeque::pop_front);
            next.unwrap_or_else(|| Reply::Ok(daily_detail(30))).into_result()
        })
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// `n` consecutive daily points ending 2024-06-30, closes 100, 101, ...
pub fn daily_points(n: usize) -> Vec<PricePoint> {
    let end = date(2024, 6, 30);
    (0..n)
        .map(|i| {
            let back = u64::try_from(n - 1 - i).unwrap();
            PricePoint::new(
                end.checked_sub_days(Days::new(back)).unwrap(),
                Decimal::from(100 + i64::try_from(i).unwrap()),
            )
        })
        .collect()
}

pub fn daily_detail(n: usize) -> InstrumentDetail {
    InstrumentDetail {
        prices: daily_points(n),
        positions: Vec::new(),
        currency: Some("GBP".into()),
    }
}

/// Lets spawned tasks run to their next suspension point without moving the clock.
pub async fn settle() {
    for _ in 0..16 {
        tokio::task::yield_now().await;
    }
}

#[cfg(feature = "tracing-subscriber")]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[cfg(not(feature = "tracing-subscriber"))]
pub fn init_tracing() {}
