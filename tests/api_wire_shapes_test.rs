//! Wire-shape tests for the JSON payloads the API exchanges with clients
//! and with the quote provider.
//!
//! NOTE: These validate request/response structures and serialization
//! behavior. Full integration tests against a live database require a
//! running test server.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Request / Response Structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TradeRequest {
    ticker: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct SignupRequest {
    email: String,
    username: String,
    password: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct HoldingPayload {
    ticker: String,
    quantity: i32,
    average_cost: BigDecimal,
    total_invested: BigDecimal,
    current_price: BigDecimal,
    percent_change: BigDecimal,
}

#[derive(Debug, Deserialize)]
struct OpenClosePayload {
    status: String,
    #[serde(default)]
    from: Option<NaiveDate>,
    #[serde(default)]
    close: Option<serde_json::Number>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
struct LeaderboardRow {
    username: String,
    balance: BigDecimal,
}

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).unwrap()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn trade_request_parses_minimal_body() {
    let req: TradeRequest = serde_json::from_str(r#"{"ticker":"AAPL"}"#).unwrap();
    assert_eq!(req.ticker, "AAPL");
}

#[test]
fn trade_request_rejects_missing_ticker() {
    assert!(serde_json::from_str::<TradeRequest>("{}").is_err());
}

#[test]
fn signup_request_roundtrips() {
    let req = SignupRequest {
        email: "trader@example.com".into(),
        username: "trader".into(),
        password: "correct-horse".into(),
    };
    let json = serde_json::to_string(&req).unwrap();
    let back: SignupRequest = serde_json::from_str(&json).unwrap();
    assert_eq!(back.email, "trader@example.com");
    assert_eq!(back.username, "trader");
}

#[test]
fn holding_payload_keeps_decimal_precision() {
    let holding = HoldingPayload {
        ticker: "MSFT".into(),
        quantity: 2,
        average_cost: dec("55.00"),
        total_invested: dec("110.00"),
        current_price: dec("70.00"),
        percent_change: dec("27.27"),
    };

    let json = serde_json::to_value(&holding).unwrap();
    let back: HoldingPayload = serde_json::from_value(json).unwrap();
    assert_eq!(back.quantity, 2);
    assert_eq!(back.average_cost, dec("55.00"));
    assert_eq!(back.total_invested, dec("110.00"));
}

#[test]
fn open_close_payload_parses_polygon_ok_body() {
    let body: OpenClosePayload = serde_json::from_str(
        r#"{"status":"OK","from":"2024-12-06","symbol":"AAPL","open":242.91,"close":242.84,"volume":36870619}"#,
    )
    .unwrap();

    assert_eq!(body.status, "OK");
    assert_eq!(body.from, NaiveDate::from_ymd_opt(2024, 12, 6));
    let close = body.close.unwrap().to_string().parse::<BigDecimal>().unwrap();
    assert_eq!(close, dec("242.84"));
}

#[test]
fn open_close_payload_tolerates_not_found_body() {
    let body: OpenClosePayload =
        serde_json::from_str(r#"{"status":"NOT_FOUND","message":"Data not found."}"#).unwrap();
    assert_eq!(body.status, "NOT_FOUND");
    assert!(body.from.is_none());
    assert!(body.close.is_none());
}

#[test]
fn leaderboard_rows_sort_by_balance_descending() {
    let mut rows = vec![
        LeaderboardRow { username: "amira".into(), balance: dec("10250.00") },
        LeaderboardRow { username: "ben".into(), balance: dec("9400.50") },
        LeaderboardRow { username: "chen".into(), balance: dec("12100.00") },
        LeaderboardRow { username: "dara".into(), balance: dec("10250.00") },
        LeaderboardRow { username: "eli".into(), balance: dec("8000.00") },
        LeaderboardRow { username: "fran".into(), balance: dec("11000.00") },
    ];

    rows.sort_by(|a, b| b.balance.cmp(&a.balance));
    rows.truncate(5);

    assert_eq!(rows.len(), 5);
    assert_eq!(rows[0].username, "chen");
    assert_eq!(rows[1].username, "fran");
    assert!(rows.iter().all(|r| r.username != "eli"));
}
