use chrono::NaiveDate;
use serde::Deserialize;
use serde::Deserializer;

use crate::core::PositionRecord;

#[derive(Deserialize)]
pub(crate) struct DetailEnvelope {
    #[serde(default)]
    pub(crate) prices: Vec<PriceRow>,
    #[serde(default)]
    pub(crate) positions: Vec<PositionRecord>,
    #[serde(default)]
    pub(crate) currency: Option<String>,
}

#[derive(Deserialize)]
pub(crate) struct PriceRow {
    pub(crate) date: NaiveDate,
    #[serde(default, deserialize_with = "de_opt_close_from_mixed")]
    pub(crate) close: Option<f64>,
}

/// Accepts a number, a numeric string ("101.5"), or null/missing.
/// Non-finite values and the strings "NaN"/"" become `None` so the row is dropped.
fn de_opt_close_from_mixed<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;
    use serde_json::Value;

    let v = Option::<Value>::deserialize(deserializer)?;
    let close = match v {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let s = s.trim();
            if s.is_empty() {
                None
            } else {
                match s.parse::<f64>() {
                    Ok(f) => Some(f),
                    Err(_) => {
                        return Err(D::Error::custom(format!(
                            "invalid numeric string '{s}' for close"
                        )));
                    }
                }
            }
        }
        Some(other) => {
            return Err(D::Error::custom(format!(
                "unexpected JSON type for close: {other}"
            )));
        }
    };
    Ok(close.filter(|f| f.is_finite()))
}
