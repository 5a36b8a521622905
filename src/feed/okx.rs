use crate::book::BookSnapshot;
use crate::errors::{AppError, Result};
use crate::models::Venue;
use futures::{SinkExt, Stream, StreamExt};
use serde::Deserialize;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tracing::warn;
use url::Url;

const OKX_REST_ENDPOINT: &str = "https://www.okx.com/api/v5/market/books";
const OKX_WS_ENDPOINT: &str = "wss://ws.okx.com:8443/ws/v5/public";

#[derive(Debug, Deserialize)]
struct BooksResponse {
    code: String,
    #[serde(default)]
    msg: String,
    #[serde(default)]
    data: Vec<BookMsg>,
}

/// Levels arrive as [price, size, liquidated orders, order count] strings.
#[derive(Debug, Deserialize)]
struct BookMsg {
    bids: Vec<[String; 4]>,
    asks: Vec<[String; 4]>,
    ts: String,
}

#[derive(Debug, Deserialize)]
struct WsBookPush {
    data: Vec<BookMsg>,
}

fn parse_levels(levels: &[[String; 4]]) -> Vec<(f64, f64)> {
    levels
        .iter()
        .filter_map(|lvl| Some((lvl[0].parse().ok()?, lvl[1].parse().ok()?)))
        .collect()
}

fn to_snapshot(msg: &BookMsg, instrument: &str) -> Result<BookSnapshot> {
    let timestamp_millis = msg.ts.parse().unwrap_or(0);
    BookSnapshot::from_raw_levels(
        Venue::Okx,
        instrument,
        timestamp_millis,
        parse_levels(&msg.bids),
        parse_levels(&msg.asks),
    )
}

/// Fetch a 20-level book snapshot over REST.
pub async fn fetch_book(client: &reqwest::Client, instrument: &str) -> Result<BookSnapshot> {
    let resp: BooksResponse = client
        .get(OKX_REST_ENDPOINT)
        .query(&[("instId", instrument), ("sz", "20")])
        .send()
        .await?
        .json()
        .await?;

    if resp.code != "0" {
        return Err(AppError::VenueApi {
            venue: Venue::Okx,
            message: resp.msg,
        });
    }

    let msg = resp.data.first().ok_or_else(|| {
        AppError::MalformedBook(format!("OKX {instrument}: empty books payload"))
    })?;
    to_snapshot(msg, instrument)
}

/// Returns an asynchronous stream of snapshots from the public `books5`
/// channel, which re-sends the whole five-level book on every update.
pub async fn connect_and_stream(instrument: &str) -> Result<impl Stream<Item = BookSnapshot> + use<>> {
    let url = Url::parse(OKX_WS_ENDPOINT)?;
    let (mut ws_stream, _resp) = connect_async(url).await?;

    let subscribe = serde_json::json!({
        "op": "subscribe",
        "args": [{ "channel": "books5", "instId": instrument }]
    });
    ws_stream.send(Message::Text(subscribe.to_string())).await?;

    let instrument = instrument.to_string();
    let mapped = ws_stream.filter_map(move |msg_res| {
        let instrument = instrument.clone();
        async move {
            match msg_res {
                Ok(msg) if msg.is_text() => {
                    let txt = match msg.into_text() {
                        Ok(t) => t,
                        Err(e) => {
                            warn!(error = %e, "[FEED] OKX text extraction failed");
                            return None;
                        }
                    };
                    // Subscribe acks and pings lack a `data` array; skip them.
                    let push: WsBookPush = serde_json::from_str(&txt).ok()?;
                    let book = push.data.first()?;
                    match to_snapshot(book, &instrument) {
                        Ok(snapshot) => Some(snapshot),
                        Err(e) => {
                            warn!(error = %e, "[FEED] OKX push rejected");
                            None
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "[FEED] OKX websocket message error");
                    None
                }
                _ => None,
            }
        }
    });

    Ok(mapped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_books_response_shape() {
        let raw = r#"{
            "code": "0",
            "msg": "",
            "data": [{
                "bids": [["99.5", "2.0", "0", "3"], ["99.0", "1.0", "0", "1"]],
                "asks": [["100.5", "4.0", "0", "2"]],
                "ts": "1700000000000"
            }]
        }"#;
        let resp: BooksResponse = serde_json::from_str(raw).expect("json should parse");
        assert_eq!(resp.code, "0");
        let book = to_snapshot(&resp.data[0], "BTC-USDT").expect("valid book");
        assert_eq!(book.best_bid().price, 99.5);
        assert_eq!(book.best_ask().price, 100.5);
        assert_eq!(book.timestamp_millis(), 1_700_000_000_000);
    }

    #[test]
    fn unparseable_levels_are_dropped() {
        let levels = vec![
            ["100.5".into(), "2.25".into(), "0".into(), "1".into()],
            ["bad".into(), "1".into(), "0".into(), "1".into()],
            ["101.0".into(), "bad".into(), "0".into(), "1".into()],
        ];
        assert_eq!(parse_levels(&levels), vec![(100.5, 2.25)]);
    }

    #[test]
    fn ws_push_with_no_data_is_skipped() {
        let ack = r#"{"event":"subscribe","arg":{"channel":"books5","instId":"BTC-USDT"}}"#;
        assert!(serde_json::from_str::<WsBookPush>(ack).is_err());
    }
}
