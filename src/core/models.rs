use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

/* ----- PRICES ----- */

/// One daily close for an instrument.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: Decimal,
}

impl PricePoint {
    #[must_use]
    pub const fn new(date: NaiveDate, close: Decimal) -> Self {
        Self { date, close }
    }

    /// The close as `f64`, `NaN` when it does not fit.
    #[must_use]
    pub fn close_f64(&self) -> f64 {
        self.close.to_f64().unwrap_or(f64::NAN)
    }
}

/// A holding of the instrument, cached alongside its prices and passed through untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionRecord {
    #[serde(default)]
    pub owner: Option<String>,
    #[serde(default)]
    pub account: Option<String>,
    #[serde(default)]
    pub units: Option<Decimal>,
    #[serde(default)]
    pub value: Option<Decimal>,
    /// Any further fields the provider attached.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/* ----- PROVIDER PAYLOAD ----- */

/// What the upstream provider returns for one ticker.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstrumentDetail {
    pub prices: Vec<PricePoint>,
    pub positions: Vec<PositionRecord>,
    pub currency: Option<String>,
}

impl InstrumentDetail {
    /// Converts the payload into a cacheable history, ordering prices by date and
    /// collapsing duplicate dates (the later occurrence wins).
    #[must_use]
    pub fn into_history(self, ticker: &str) -> InstrumentHistory {
        InstrumentHistory {
            ticker: ticker.to_string(),
            prices: normalize_prices(self.prices),
            positions: self.positions,
            currency: self.currency,
        }
    }
}

pub(crate) fn normalize_prices(mut prices: Vec<PricePoint>) -> Vec<PricePoint> {
    prices.sort_by_key(|p| p.date);
    let mut out: Vec<PricePoint> = Vec::with_capacity(prices.len());
    for p in prices {
        match out.last_mut() {
            Some(last) if last.date == p.date => *last = p,
            _ => out.push(p),
        }
    }
    out
}

/* ----- HISTORY ----- */

/// The cached unit: everything known about one ticker.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentHistory {
    pub ticker: String,
    /// Ordered by date, one point per date.
    pub prices: Vec<PricePoint>,
    pub positions: Vec<PositionRecord>,
    pub currency: Option<String>,
}

impl InstrumentHistory {
    #[must_use]
    pub fn latest(&self) -> Option<&PricePoint> {
        self.prices.last()
    }

    /// Points inside `range`, counted back from the latest date.
    ///
    /// The cache always holds the full fetched window; display ranges are cut here.
    #[must_use]
    pub fn slice(&self, range: DisplayRange) -> &[PricePoint] {
        let Some(latest) = self.latest() else {
            return &[];
        };
        let Some(start) = range.start_from(latest.date) else {
            return &self.prices;
        };
        let first = self.prices.partition_point(|p| p.date < start);
        &self.prices[first..]
    }
}

/* ----- REQUEST PARAMS ----- */

/// How far back the provider is asked to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lookback {
    Days(u32),
    /// Everything the provider has.
    #[default]
    Max,
}

impl Lookback {
    /// The `days` query value; `0` means "maximum available".
    #[must_use]
    pub const fn as_days(self) -> u32 {
        match self {
            Self::Days(d) => d,
            Self::Max => 0,
        }
    }
}

/// Chart range selectable by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayRange {
    M1,
    M3,
    M6,
    Y1,
    Y5,
    Y10,
    Max,
}

impl DisplayRange {
    const fn months(self) -> Option<u32> {
        match self {
            Self::M1 => Some(1),
            Self::M3 => Some(3),
            Self::M6 => Some(6),
            Self::Y1 => Some(12),
            Self::Y5 => Some(60),
            Self::Y10 => Some(120),
            Self::Max => None,
        }
    }

    pub(crate) fn start_from(self, latest: NaiveDate) -> Option<NaiveDate> {
        self.months()
            .and_then(|m| latest.checked_sub_months(Months::new(m)))
    }
}
