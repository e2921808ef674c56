use chrono::NaiveDate;
use serde::Serialize;

use super::bollinger::{BollingerBands, DEFAULT_BOLLINGER_K, DEFAULT_BOLLINGER_WINDOW, bollinger};
use super::change::period_change;
use super::lookback::horizon_change_pct;
use super::rsi::{DEFAULT_RSI_WINDOW, rsi};
use super::sma::sma;
use crate::core::PricePoint;

pub const SHORT_SMA_WINDOW: usize = 20;
pub const LONG_SMA_WINDOW: usize = 50;

/// Optional series the caller asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndicatorFlags {
    pub bollinger: bool,
}

/// Every display series for one price slice, aligned index-by-index with `dates`.
///
/// Never cached: compute it again for each slice and flag combination.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedSeries {
    pub dates: Vec<NaiveDate>,
    pub closes: Vec<f64>,
    pub change: Vec<f64>,
    pub change_pct: Vec<f64>,
    pub sma_20: Vec<f64>,
    pub sma_50: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bollinger: Option<BollingerBands>,
    pub rsi_14: Vec<f64>,
    pub change_7d_pct: f64,
    pub change_30d_pct: f64,
}

impl DerivedSeries {
    /// Computes all series over `points`, after dropping any close that is not a
    /// finite number. Windows therefore run over valid points only; gaps are
    /// compacted, not forward-filled.
    #[must_use]
    pub fn compute(points: &[PricePoint], flags: IndicatorFlags) -> Self {
        let valid: Vec<PricePoint> = points
            .iter()
            .filter(|p| p.close_f64().is_finite())
            .cloned()
            .collect();
        let dates: Vec<NaiveDate> = valid.iter().map(|p| p.date).collect();
        let closes: Vec<f64> = valid.iter().map(PricePoint::close_f64).collect();

        let change = period_change(&closes);
        let bands = flags
            .bollinger
            .then(|| bollinger(&closes, DEFAULT_BOLLINGER_WINDOW, DEFAULT_BOLLINGER_K));

        Self {
            sma_20: sma(&closes, SHORT_SMA_WINDOW),
            sma_50: sma(&closes, LONG_SMA_WINDOW),
            rsi_14: rsi(&closes, DEFAULT_RSI_WINDOW),
            bollinger: bands,
            change: change.abs,
            change_pct: change.pct,
            change_7d_pct: horizon_change_pct(&valid, 7),
            change_30d_pct: horizon_change_pct(&valid, 30),
            dates,
            closes,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }
}
