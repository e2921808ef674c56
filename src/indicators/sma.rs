//! Simple moving average.
//!
//! A value is emitted only once a full window is available; earlier indices are
//! `NaN` rather than an average over fewer points.

/// Rolling mean of `closes` over `window` points, aligned to `closes`.
#[must_use]
pub fn sma(closes: &[f64], window: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; closes.len()];
    if window == 0 || closes.len() < window {
        return out;
    }

    let mut sum: f64 = closes[..window].iter().sum();
    out[window - 1] = sum / window as f64;
    for i in window..closes.len() {
        sum += closes[i] - closes[i - window];
        out[i] = sum / window as f64;
    }
    out
}
