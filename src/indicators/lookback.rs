//! Lookback reference prices for "N days ago" change displays.

use chrono::{Days, NaiveDate};

use crate::core::PricePoint;

/// Close of the latest point dated at or before `latest - horizon_days`.
///
/// Missing trading days are tolerated by taking the nearest earlier point.
/// `NaN` when the series is empty or does not reach back that far.
#[must_use]
pub fn lookback_close(points: &[PricePoint], horizon_days: u32) -> f64 {
    let Some(latest) = points.last() else {
        return f64::NAN;
    };
    let Some(target) = horizon_target(latest.date, horizon_days) else {
        return f64::NAN;
    };
    points
        .iter()
        .rev()
        .find(|p| p.date <= target)
        .map_or(f64::NAN, PricePoint::close_f64)
}

/// Percentage change from the lookback close to the latest close:
/// `(latest / lookback - 1) * 100`.
#[must_use]
pub fn horizon_change_pct(points: &[PricePoint], horizon_days: u32) -> f64 {
    let Some(latest) = points.last() else {
        return f64::NAN;
    };
    let base = lookback_close(points, horizon_days);
    (latest.close_f64() / base - 1.0) * 100.0
}

fn horizon_target(latest: NaiveDate, horizon_days: u32) -> Option<NaiveDate> {
    latest.checked_sub_days(Days::new(u64::from(horizon_days)))
}
