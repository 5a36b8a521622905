use crate::book::BookSnapshot;
use crate::errors::{AppError, Result};
use crate::models::Venue;
use serde::Deserialize;

const DERIBIT_REST_ENDPOINT: &str = "https://www.deribit.com/api/v2/public/get_order_book";

#[derive(Debug, Deserialize)]
struct OrderBookResponse {
    #[serde(default)]
    result: Option<OrderBookResult>,
    #[serde(default)]
    error: Option<ApiError>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    message: String,
}

/// Levels arrive as [price, size] numbers, unlike the string-typed venues.
#[derive(Debug, Deserialize)]
struct OrderBookResult {
    bids: Vec<[f64; 2]>,
    asks: Vec<[f64; 2]>,
    timestamp: u64,
}

/// Fetch a 20-level instrument book snapshot over REST.
pub async fn fetch_book(client: &reqwest::Client, instrument: &str) -> Result<BookSnapshot> {
    let resp: OrderBookResponse = client
        .get(DERIBIT_REST_ENDPOINT)
        .query(&[("instrument_name", instrument), ("depth", "20")])
        .send()
        .await?
        .json()
        .await?;

    if let Some(err) = resp.error {
        return Err(AppError::VenueApi {
            venue: Venue::Deribit,
            message: err.message,
        });
    }

    let result = resp.result.ok_or_else(|| {
        AppError::MalformedBook(format!("Deribit {instrument}: missing result payload"))
    })?;

    let bids = result.bids.iter().map(|lvl| (lvl[0], lvl[1])).collect();
    let asks = result.asks.iter().map(|lvl| (lvl[0], lvl[1])).collect();
    BookSnapshot::from_raw_levels(Venue::Deribit, instrument, result.timestamp, bids, asks)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_order_book_response_shape() {
        let raw = r#"{
            "jsonrpc": "2.0",
            "result": {
                "instrument_name": "BTC-PERPETUAL",
                "bids": [[99.5, 2.0], [99.0, 1.0]],
                "asks": [[100.5, 4.0]],
                "timestamp": 1700000000000
            }
        }"#;
        let resp: OrderBookResponse = serde_json::from_str(raw).expect("json should parse");
        let result = resp.result.expect("result present");
        assert_eq!(result.bids, vec![[99.5, 2.0], [99.0, 1.0]]);
        assert_eq!(result.timestamp, 1_700_000_000_000);
    }

    #[test]
    fn error_envelope_surfaces_message() {
        let raw = r#"{"jsonrpc": "2.0", "error": {"code": -32602, "message": "Invalid params"}}"#;
        let resp: OrderBookResponse = serde_json::from_str(raw).expect("json should parse");
        assert_eq!(resp.error.expect("error present").message, "Invalid params");
    }
}
