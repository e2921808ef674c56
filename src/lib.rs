//! instrument-history: resilient instrument price-history cache and derived analytics.
//!
//! - [`HistoryCache`] holds one [`InstrumentHistory`] per ticker for the process lifetime.
//! - [`HistoryFetcher`] serves from that cache, or fetches from an [`InstrumentSource`]
//!   with rate-limit aware retries ([`RetryPolicy`]) and writes the result back.
//! - [`Preloader`] warms the cache for many tickers through a bounded worker pool.
//! - [`indicators`] derives moving averages, Bollinger Bands, RSI and period changes.
//!
//! ```no_run
//! # use std::sync::Arc;
//! # use instrument_history::*;
//! # use tokio_util::sync::CancellationToken;
//! # #[tokio::main]
//! # async fn main() -> Result<(), HistoryError> {
//! let cache = HistoryCache::new();
//! let fetcher = HistoryFetcher::new(Arc::new(ApiClient::builder().build()?), cache.clone());
//! let cancel = CancellationToken::new();
//!
//! Preloader::new(fetcher.clone())
//!     .preload(["VOD.L", "BP.L", "AZN.L"], &cancel)
//!     .await;
//!
//! let history = fetcher.fetch("VOD.L", Lookback::Max, &cancel).await?;
//! let series = DerivedSeries::compute(
//!     history.slice(DisplayRange::Y1),
//!     IndicatorFlags { bollinger: true },
//! );
//! println!("RSI now: {:?}", series.rsi_14.last());
//! # Ok(())
//! # }
//! ```

pub mod cache;
pub mod core;
pub mod history;
pub mod indicators;
pub mod preload;

pub use crate::cache::HistoryCache;
pub use crate::core::client::{ApiClient, ApiClientBuilder, CacheMode, RetryDecision, RetryPolicy};
pub use crate::core::{
    DisplayRange, HistoryError, InstrumentDetail, InstrumentHistory, InstrumentSource, Lookback,
    PositionRecord, PricePoint,
};
pub use crate::history::HistoryFetcher;
pub use crate::indicators::{DerivedSeries, IndicatorFlags};
pub use crate::preload::{PreloadReport, Preloader};
