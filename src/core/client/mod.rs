//! HTTP provider client + builder.
//! Internals are split into `constants` (UA + defaults) and `retry` (retry policy, cache modes).

mod constants;
mod retry;

pub use retry::{CacheMode, RetryDecision, RetryPolicy, parse_retry_after};

use crate::core::services::{DetailFuture, InstrumentSource};
use crate::core::{HistoryError, Lookback};
use constants::{DEFAULT_BASE_INSTRUMENT, USER_AGENT};
use reqwest::Client;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Thin wrapper that holds a configured HTTP client and the instrument endpoint base.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_instrument: Url,
}

impl ApiClient {
    /// Create a new builder.
    pub fn builder() -> ApiClientBuilder {
        ApiClientBuilder::default()
    }

    /* -------- internal getters used by other modules -------- */

    pub(crate) fn http(&self) -> &Client {
        &self.http
    }

    pub(crate) fn base_instrument(&self) -> &Url {
        &self.base_instrument
    }
}

impl InstrumentSource for ApiClient {
    fn get_instrument_detail<'a>(
        &'a self,
        ticker: &'a str,
        lookback: Lookback,
        cancel: &'a CancellationToken,
    ) -> DetailFuture<'a> {
        Box::pin(async move {
            tokio::select! {
                biased;
                () = cancel.cancelled() => Err(HistoryError::Cancelled),
                res = crate::history::api::fetch_detail(self, ticker, lookback) => res,
            }
        })
    }
}

/* ----------------------- Builder ----------------------- */

#[derive(Default)]
pub struct ApiClientBuilder {
    user_agent: Option<String>,
    base_instrument: Option<Url>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl ApiClientBuilder {
    /// Override the User-Agent.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Override the instrument API base (e.g., `https://host/api/instrument/`).
    #[must_use]
    pub fn base_instrument(mut self, url: Url) -> Self {
        self.base_instrument = Some(url);
        self
    }

    /// Set a global request timeout (overall). Default: none.
    ///
    /// A hung request is bounded only by this transport timeout; the retry loop adds none.
    #[must_use]
    pub const fn timeout(mut self, dur: Duration) -> Self {
        self.timeout = Some(dur);
        self
    }

    /// Set a connect timeout. Default: none.
    #[must_use]
    pub const fn connect_timeout(mut self, dur: Duration) -> Self {
        self.connect_timeout = Some(dur);
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// Fails if the default base URL cannot be parsed or the HTTP client cannot be constructed.
    pub fn build(self) -> Result<ApiClient, HistoryError> {
        let base_instrument = match self.base_instrument {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_INSTRUMENT)?,
        };

        let mut httpb =
            reqwest::Client::builder().user_agent(self.user_agent.as_deref().unwrap_or(USER_AGENT));

        if let Some(t) = self.timeout {
            httpb = httpb.timeout(t);
        }
        if let Some(ct) = self.connect_timeout {
            httpb = httpb.connect_timeout(ct);
        }

        Ok(ApiClient {
            http: httpb.build()?,
            base_instrument,
        })
    }
}
