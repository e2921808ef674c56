//! Period-over-period change between consecutive closes.

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodChange {
    /// `close[i] - close[i-1]`, in the instrument's currency.
    pub abs: Vec<f64>,
    /// `abs[i] / close[i-1] * 100`.
    pub pct: Vec<f64>,
}

/// Change from the previous close; index 0 is `NaN` in both series.
#[must_use]
pub fn period_change(closes: &[f64]) -> PeriodChange {
    let mut abs = vec![f64::NAN; closes.len()];
    let mut pct = vec![f64::NAN; closes.len()];
    for i in 1..closes.len() {
        let prev = closes[i - 1];
        let d = closes[i] - prev;
        abs[i] = d;
        pct[i] = d / prev * 100.0;
    }
    PeriodChange { abs, pct }
}
