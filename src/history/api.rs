use reqwest::StatusCode;
use reqwest::header::RETRY_AFTER;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;

use crate::core::{ApiClient, HistoryError, InstrumentDetail, Lookback, PricePoint};
use crate::history::wire::DetailEnvelope;

/// `GET {base}/{ticker}?days={n}` and decode the detail payload.
pub(crate) async fn fetch_detail(
    client: &ApiClient,
    ticker: &str,
    lookback: Lookback,
) -> Result<InstrumentDetail, HistoryError> {
    let mut url = client.base_instrument().join(ticker)?;
    url.query_pairs_mut()
        .append_pair("days", &lookback.as_days().to_string());

    let resp = client.http().get(url.clone()).send().await?;
    let status = resp.status();

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = resp
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        return Err(HistoryError::RateLimited { retry_after });
    }
    if !status.is_success() {
        return Err(HistoryError::Status {
            status: status.as_u16(),
            url: url.to_string(),
        });
    }

    let body = resp.text().await?;
    decode_detail(&body)
}

fn decode_detail(body: &str) -> Result<InstrumentDetail, HistoryError> {
    let parsed: DetailEnvelope = serde_json::from_str(body)
        .map_err(|e| HistoryError::Data(format!("json parse error: {e}")))?;

    // missing closes are dropped here, never stored as zero
    let prices = parsed
        .prices
        .into_iter()
        .filter_map(|row| {
            let close = row.close.and_then(Decimal::from_f64)?;
            Some(PricePoint::new(row.date, close))
        })
        .collect();

    Ok(InstrumentDetail {
        prices,
        positions: parsed.positions,
        currency: parsed.currency,
    })
}
