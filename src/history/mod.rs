//! Fetching instrument histories: the cache-aware retrying fetcher and the
//! HTTP endpoint behind [`ApiClient`](crate::core::ApiClient).

pub(crate) mod api;
mod fetcher;
pub(crate) mod wire;

pub use fetcher::HistoryFetcher;
