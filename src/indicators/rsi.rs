//! RSI (Relative Strength Index), simple-average variant.
//!
//! At index `i` the trailing `window + 1` closes give `window` deltas. Positive
//! deltas are summed as gains, absolute negative deltas as losses, and both are
//! averaged over `window`:
//!
//! - avg_loss == 0 -> RSI = 100
//! - avg_gain == 0 -> RSI = 0
//! - otherwise RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//!
//! Every index is computed from its own trailing slice (no Wilder smoothing), so
//! the value depends only on the visible window. `NaN` until `window + 1` closes exist.

pub const DEFAULT_RSI_WINDOW: usize = 14;

#[must_use]
pub fn rsi(closes: &[f64], window: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; closes.len()];
    if window == 0 {
        return out;
    }

    for i in window..closes.len() {
        let slice = &closes[i - window..=i];
        let (gains, losses) = slice
            .windows(2)
            .map(|pair| pair[1] - pair[0])
            .fold((0.0, 0.0), |(g, l), d| {
                if d > 0.0 { (g + d, l) } else { (g, l - d) }
            });

        let avg_gain = gains / window as f64;
        let avg_loss = losses / window as f64;
        out[i] = if avg_loss == 0.0 {
            100.0
        } else if avg_gain == 0.0 {
            0.0
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        };
    }
    out
}
