use tokio_util::sync::CancellationToken;

use crate::core::{HistoryError, InstrumentDetail, Lookback};

/// The boxed future returned by [`InstrumentSource`].
pub type DetailFuture<'a> = std::pin::Pin<
    Box<dyn std::future::Future<Output = Result<InstrumentDetail, HistoryError>> + Send + 'a>,
>;

/// A trait for upstream providers that can fetch one instrument's price and position detail.
///
/// This decouples the fetch/retry logic from the transport, so tests can script
/// responses and the HTTP client can be swapped out. It is implemented by [`ApiClient`].
///
/// [`ApiClient`]: crate::core::client::ApiClient
pub trait InstrumentSource: Send + Sync {
    /// Asynchronously fetches the detail payload for `ticker`.
    ///
    /// # Arguments
    /// * `ticker` - The symbol, passed through exactly as the caller supplied it.
    /// * `lookback` - How much history to request.
    /// * `cancel` - Fires when the caller no longer wants the result.
    ///
    /// # Returns
    /// A `Future` resolving to the payload, or a `HistoryError`. Rate-limit responses
    /// must be reported as [`HistoryError::RateLimited`] so the retry policy can see them.
    fn get_instrument_detail<'a>(
        &'a self,
        ticker: &'a str,
        lookback: Lookback,
        cancel: &'a CancellationToken,
    ) -> DetailFuture<'a>;
}
