use crate::book::BookSnapshot;
use crate::errors::{AppError, Result};
use crate::models::Venue;
use serde::Deserialize;

const BYBIT_REST_ENDPOINT: &str = "https://api.bybit.com/v5/market/orderbook";

#[derive(Debug, Deserialize)]
struct OrderbookResponse {
    #[serde(rename = "retCode")]
    ret_code: i64,
    #[serde(rename = "retMsg", default)]
    ret_msg: String,
    #[serde(default)]
    result: Option<OrderbookResult>,
}

/// Levels arrive as [price, size] strings; `b` bids, `a` asks.
#[derive(Debug, Deserialize)]
struct OrderbookResult {
    #[serde(rename = "b")]
    bids: Vec<[String; 2]>,
    #[serde(rename = "a")]
    asks: Vec<[String; 2]>,
    ts: u64,
}

fn parse_levels(levels: &[[String; 2]]) -> Vec<(f64, f64)> {
    levels
        .iter()
        .filter_map(|lvl| Some((lvl[0].parse().ok()?, lvl[1].parse().ok()?)))
        .collect()
}

/// Fetch a 20-level linear-contract book snapshot over REST.
pub async fn fetch_book(client: &reqwest::Client, instrument: &str) -> Result<BookSnapshot> {
    let resp: OrderbookResponse = client
        .get(BYBIT_REST_ENDPOINT)
        .query(&[("category", "linear"), ("symbol", instrument), ("limit", "20")])
        .send()
        .await?
        .json()
        .await?;

    if resp.ret_code != 0 {
        return Err(AppError::VenueApi {
            venue: Venue::Bybit,
            message: resp.ret_msg,
        });
    }

    let result = resp.result.ok_or_else(|| {
        AppError::MalformedBook(format!("Bybit {instrument}: missing result payload"))
    })?;

    BookSnapshot::from_raw_levels(
        Venue::Bybit,
        instrument,
        result.ts,
        parse_levels(&result.bids),
        parse_levels(&result.asks),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_orderbook_response_shape() {
        let raw = r#"{
            "retCode": 0,
            "retMsg": "OK",
            "result": {
                "s": "BTCUSDT",
                "b": [["99.5", "2.0"], ["99.0", "1.0"]],
                "a": [["100.5", "4.0"]],
                "ts": 1700000000000,
                "u": 12345
            }
        }"#;
        let resp: OrderbookResponse = serde_json::from_str(raw).expect("json should parse");
        assert_eq!(resp.ret_code, 0);
        let result = resp.result.expect("result present");
        assert_eq!(parse_levels(&result.bids), vec![(99.5, 2.0), (99.0, 1.0)]);
        assert_eq!(parse_levels(&result.asks), vec![(100.5, 4.0)]);
        assert_eq!(result.ts, 1_700_000_000_000);
    }

    #[test]
    fn error_envelope_parses_without_result() {
        let raw = r#"{"retCode": 10001, "retMsg": "params error"}"#;
        let resp: OrderbookResponse = serde_json::from_str(raw).expect("json should parse");
        assert_eq!(resp.ret_code, 10001);
        assert!(resp.result.is_none());
    }
}
