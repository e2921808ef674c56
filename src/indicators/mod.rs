//! Stateless technical indicators over a date-ordered close series.
//!
//! Nothing here fails: insufficient history shows up as `NaN` values so rendering
//! code can treat "not enough data yet" as data. Inputs are expected to be the
//! compacted, NaN-free closes; [`DerivedSeries::compute`] does that compaction.

mod bollinger;
mod change;
mod derived;
mod lookback;
mod rsi;
mod sma;

pub use bollinger::{BollingerBands, DEFAULT_BOLLINGER_K, DEFAULT_BOLLINGER_WINDOW, bollinger};
pub use change::{PeriodChange, period_change};
pub use derived::{DerivedSeries, IndicatorFlags, LONG_SMA_WINDOW, SHORT_SMA_WINDOW};
pub use lookback::{horizon_change_pct, lookback_close};
pub use rsi::{DEFAULT_RSI_WINDOW, rsi};
pub use sma::sma;
