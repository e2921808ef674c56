//! Bollinger Bands.
//!
//! - Middle = SMA(window)
//! - Upper = Middle + k * population stddev over the same window
//! - Lower = Middle - k * population stddev
//!
//! Same full-window rule as the SMA: `NaN` until `window` points exist.

use serde::Serialize;

use super::sma::sma;

pub const DEFAULT_BOLLINGER_WINDOW: usize = 20;
pub const DEFAULT_BOLLINGER_K: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BollingerBands {
    pub upper: Vec<f64>,
    pub middle: Vec<f64>,
    pub lower: Vec<f64>,
}

#[must_use]
pub fn bollinger(closes: &[f64], window: usize, k: f64) -> BollingerBands {
    let middle = sma(closes, window);
    let mut upper = vec![f64::NAN; closes.len()];
    let mut lower = vec![f64::NAN; closes.len()];

    if window > 0 {
        for i in (window - 1)..closes.len() {
            let mean = middle[i];
            let slice = &closes[i + 1 - window..=i];
            let var = slice.iter().map(|c| (c - mean).powi(2)).sum::<f64>() / window as f64;
            let sd = var.sqrt();
            upper[i] = mean + k * sd;
            lower[i] = mean - k * sd;
        }
    }

    BollingerBands {
        upper,
        middle,
        lower,
    }
}
