use async_trait::async_trait;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::external::quote_provider::{DailyClose, QuoteProvider, QuoteProviderError};

pub struct PolygonProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl PolygonProvider {
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url,
        }
    }

    pub fn from_env() -> Result<Self, QuoteProviderError> {
        let api_key = std::env::var("POLYGON_API_KEY")
            .map_err(|_| QuoteProviderError::BadResponse("POLYGON_API_KEY not set".into()))?;
        let base_url = std::env::var("POLYGON_BASE_URL")
            .unwrap_or_else(|_| "https://api.polygon.io".to_string());

        Ok(Self::new(api_key, base_url))
    }
}

// Daily open/close payload. Only status, date and close matter here;
// the endpoint also carries open/high/low/volume.
//
// Rate-limit exhaustion comes back as:
// { "status": "ERROR", "error": "You've exceeded the maximum requests per minute..." }
#[derive(Debug, Deserialize)]
struct OpenCloseResponse {
    status: String,

    #[serde(default)]
    from: Option<NaiveDate>,

    #[serde(default)]
    close: Option<serde_json::Number>,

    #[serde(default)]
    message: Option<String>,

    #[serde(default)]
    error: Option<String>,
}

fn parse_open_close(
    requested: NaiveDate,
    body: OpenCloseResponse,
) -> Result<Option<DailyClose>, QuoteProviderError> {
    match body.status.as_str() {
        "OK" => {
            let close = body
                .close
                .ok_or_else(|| QuoteProviderError::BadResponse("missing close price".into()))?;
            // Numbers go through their decimal string form so 123.45 stays exact.
            let close = close
                .to_string()
                .parse()
                .map_err(|e| QuoteProviderError::Parse(format!("close price: {}", e)))?;

            Ok(Some(DailyClose {
                date: body.from.unwrap_or(requested),
                close,
            }))
        }
        "NOT_FOUND" => Ok(None),
        other => {
            if let Some(err) = &body.error {
                if err.contains("exceeded the maximum requests") {
                    return Err(QuoteProviderError::RateLimited);
                }
            }
            Err(QuoteProviderError::BadResponse(format!(
                "status {}: {}",
                other,
                body.message
                    .or(body.error)
                    .unwrap_or_else(|| "no message".into())
            )))
        }
    }
}

#[async_trait]
impl QuoteProvider for PolygonProvider {
    async fn fetch_daily_close(
        &self,
        ticker: &str,
        date: NaiveDate,
    ) -> Result<Option<DailyClose>, QuoteProviderError> {
        let url = format!(
            "{}/v1/open-close/{}/{}",
            self.base_url,
            ticker,
            date.format("%Y-%m-%d")
        );

        let resp = self
            .client
            .get(&url)
            .query(&[("adjusted", "true"), ("apiKey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| QuoteProviderError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(QuoteProviderError::RateLimited);
        }

        let body = resp
            .json::<OpenCloseResponse>()
            .await
            .map_err(|e| QuoteProviderError::Parse(e.to_string()))?;

        parse_open_close(date, body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bigdecimal::BigDecimal;
    use std::str::FromStr;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn parses_ok_response() {
        let body: OpenCloseResponse = serde_json::from_str(
            r#"{"status":"OK","from":"2024-12-06","symbol":"AAPL","open":242.91,"high":244.63,"low":242.08,"close":242.84,"volume":36870619,"afterHours":243.19,"preMarket":242.6}"#,
        )
        .unwrap();

        let close = parse_open_close(day("2024-12-06"), body).unwrap().unwrap();
        assert_eq!(close.date, day("2024-12-06"));
        assert_eq!(close.close, BigDecimal::from_str("242.84").unwrap());
    }

    #[test]
    fn not_found_is_empty_not_error() {
        let body: OpenCloseResponse = serde_json::from_str(
            r#"{"status":"NOT_FOUND","message":"Data not found."}"#,
        )
        .unwrap();

        assert!(parse_open_close(day("2024-12-07"), body).unwrap().is_none());
    }

    #[test]
    fn quota_error_maps_to_rate_limited() {
        let body: OpenCloseResponse = serde_json::from_str(
            r#"{"status":"ERROR","error":"You've exceeded the maximum requests per minute, please wait or upgrade your subscription."}"#,
        )
        .unwrap();

        assert!(matches!(
            parse_open_close(day("2024-12-06"), body),
            Err(QuoteProviderError::RateLimited)
        ));
    }

    #[test]
    fn unexpected_status_is_bad_response() {
        let body: OpenCloseResponse =
            serde_json::from_str(r#"{"status":"DELAYED","message":"upgrade required"}"#).unwrap();

        assert!(matches!(
            parse_open_close(day("2024-12-06"), body),
            Err(QuoteProviderError::BadResponse(_))
        ));
    }

    #[test]
    fn missing_close_on_ok_is_bad_response() {
        let body: OpenCloseResponse =
            serde_json::from_str(r#"{"status":"OK","from":"2024-12-06"}"#).unwrap();

        assert!(matches!(
            parse_open_close(day("2024-12-06"), body),
            Err(QuoteProviderError::BadResponse(_))
        ));
    }
}
