//! Core components of the `instrument-history` crate.
//!
//! This module contains the foundational building blocks of the library, including:
//! - The HTTP [`ApiClient`] with its builder, and the [`RetryPolicy`].
//! - The primary [`HistoryError`] type.
//! - Shared data models like [`PricePoint`] and [`InstrumentHistory`].
//! - The [`InstrumentSource`] trait the fetcher is written against.

/// The HTTP client (`ApiClient`), builder, retry policy and cache modes.
pub mod client;
/// The primary error type (`HistoryError`) for the crate.
pub mod error;
/// Shared data models used across modules (e.g., `PricePoint`, `InstrumentHistory`).
pub mod models;
/// Service traits abstracting the upstream provider.
pub mod services;

// convenient re-exports so most code can just `use crate::core::HistoryError`
pub use client::{ApiClient, ApiClientBuilder, CacheMode, RetryDecision, RetryPolicy};
pub use error::HistoryError;
pub use models::{
    DisplayRange, InstrumentDetail, InstrumentHistory, Lookback, PositionRecord, PricePoint,
};
pub use services::{DetailFuture, InstrumentSource};
