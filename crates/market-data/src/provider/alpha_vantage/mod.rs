//! Alpha Vantage market data provider implementation.
//!
//! Daily equity quotes via the TIME_SERIES_DAILY endpoint.
//!
//! Note: Alpha Vantage free tier is limited to 5 API calls per minute.

use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::Quote;
use crate::provider::QuoteProvider;

const BASE_URL: &str = "https://www.alphavantage.co/query";
const PROVIDER_ID: &str = "ALPHA_VANTAGE";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Configuration for the Alpha Vantage provider.
///
/// The credential is carried here rather than in process-wide state so
/// multiple providers with different keys can coexist and tests can inject
/// fakes. An empty key is not rejected up front; the request is attempted
/// and fails at the provider.
#[derive(Clone, Debug)]
pub struct AlphaVantageConfig {
    /// API access key, sent as the `apikey` query parameter
    pub api_key: String,

    /// Endpoint base URL; overridable for tests
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for AlphaVantageConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl AlphaVantageConfig {
    /// Config with the given key and default endpoint and timeout.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }
}

/// Alpha Vantage market data provider.
pub struct AlphaVantageProvider {
    client: Client,
    config: AlphaVantageConfig,
}

// ============================================================================
// Response structures for the Alpha Vantage API
// ============================================================================

/// TIME_SERIES_DAILY response
#[derive(Debug, Deserialize)]
struct TimeSeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    time_series: Option<HashMap<String, DailyEntry>>,
    #[serde(rename = "Error Message")]
    error_message: Option<String>,
    #[serde(rename = "Note")]
    note: Option<String>,
    #[serde(rename = "Information")]
    information: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DailyEntry {
    #[serde(rename = "1. open")]
    open: String,
    #[serde(rename = "2. high")]
    high: String,
    #[serde(rename = "3. low")]
    low: String,
    #[serde(rename = "4. close")]
    close: String,
    #[serde(rename = "5. volume")]
    volume: String,
}

// ============================================================================
// AlphaVantageProvider implementation
// ============================================================================

impl AlphaVantageProvider {
    /// Create a new Alpha Vantage provider with the given configuration.
    pub fn new(config: AlphaVantageConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self { client, config }
    }

    /// Make a request to the Alpha Vantage API.
    async fn fetch(&self, params: &[(&str, &str)]) -> Result<String, MarketDataError> {
        let mut all_params: Vec<(&str, &str)> = params.to_vec();
        all_params.push(("apikey", &self.config.api_key));

        let url = reqwest::Url::parse_with_params(&self.config.base_url, &all_params).map_err(
            |e| MarketDataError::Transport {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to build URL: {}", e),
            },
        )?;

        if self.config.api_key.is_empty() {
            debug!("Alpha Vantage request: {}", url.as_str());
        } else {
            debug!(
                "Alpha Vantage request: {}",
                url.as_str().replace(&self.config.api_key, "***")
            );
        }

        let response =
            self.client
                .get(url)
                .send()
                .await
                .map_err(|e| MarketDataError::Transport {
                    provider: PROVIDER_ID.to_string(),
                    message: e.to_string(),
                })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: PROVIDER_ID.to_string(),
            });
        }

        if !status.is_success() {
            return Err(MarketDataError::Transport {
                provider: PROVIDER_ID.to_string(),
                message: format!("HTTP {}", status),
            });
        }

        response
            .text()
            .await
            .map_err(|e| MarketDataError::Transport {
                provider: PROVIDER_ID.to_string(),
                message: e.to_string(),
            })
    }

    /// Check for API-level errors in the response.
    ///
    /// An "Error Message" means the symbol is unrecognized; a "Note" or
    /// "Information" mentioning call frequency or rate limits means quota
    /// exhaustion.
    fn check_api_error(
        error_message: &Option<String>,
        note: &Option<String>,
        information: &Option<String>,
    ) -> Result<(), MarketDataError> {
        if let Some(msg) = error_message {
            return Err(MarketDataError::SymbolNotFound(msg.clone()));
        }

        // "Note" usually indicates rate limiting
        if let Some(msg) = note {
            if msg.contains("API call frequency") || msg.contains("rate limit") {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            warn!("Alpha Vantage note: {}", msg);
        }

        // "Information" can indicate various issues
        if let Some(msg) = information {
            if msg.contains("API call frequency") || msg.contains("rate limit") {
                return Err(MarketDataError::RateLimited {
                    provider: PROVIDER_ID.to_string(),
                });
            }
            warn!("Alpha Vantage info: {}", msg);
        }

        Ok(())
    }

    /// Parse a decimal price field, exactly as the provider encodes it.
    fn parse_price(field: &str, raw: &str) -> Result<Decimal, MarketDataError> {
        Decimal::from_str(raw).map_err(|e| MarketDataError::Transport {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse {}: {} ({})", field, raw, e),
        })
    }

    /// Parse a TIME_SERIES_DAILY response body into the latest quote.
    ///
    /// Selects the most recent date key in the daily series. A response
    /// without a daily series (and without error fields) yields `Ok(None)`.
    fn parse_daily_response(
        symbol: &str,
        text: &str,
    ) -> Result<Option<Quote>, MarketDataError> {
        let response: TimeSeriesResponse =
            serde_json::from_str(text).map_err(|e| MarketDataError::Transport {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse response: {}", e),
            })?;

        Self::check_api_error(
            &response.error_message,
            &response.note,
            &response.information,
        )?;

        let Some(time_series) = response.time_series else {
            debug!("Alpha Vantage: no daily series for {}", symbol);
            return Ok(None);
        };

        // ISO date keys, so the lexicographic maximum is the latest day
        let Some((date_str, entry)) = time_series
            .iter()
            .max_by(|(a, _), (b, _)| a.as_str().cmp(b.as_str()))
        else {
            debug!("Alpha Vantage: empty daily series for {}", symbol);
            return Ok(None);
        };

        let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|e| {
            MarketDataError::Transport {
                provider: PROVIDER_ID.to_string(),
                message: format!("Failed to parse date key: {} ({})", date_str, e),
            }
        })?;

        let open = Self::parse_price("open", &entry.open)?;
        let high = Self::parse_price("high", &entry.high)?;
        let low = Self::parse_price("low", &entry.low)?;
        let close = Self::parse_price("close", &entry.close)?;
        let volume: u64 = entry.volume.parse().map_err(|e| MarketDataError::Transport {
            provider: PROVIDER_ID.to_string(),
            message: format!("Failed to parse volume: {} ({})", entry.volume, e),
        })?;

        debug!("Alpha Vantage: latest quote for {} is {}", symbol, date);

        Ok(Some(Quote::ohlcv(
            symbol.to_string(),
            date,
            open,
            high,
            low,
            close,
            volume,
        )))
    }
}

#[async_trait]
impl QuoteProvider for AlphaVantageProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_daily(&self, symbol: &str) -> Result<Option<Quote>, MarketDataError> {
        let params = [
            ("function", "TIME_SERIES_DAILY"),
            ("symbol", symbol),
            ("outputsize", "compact"), // 'full' is premium-only
        ];

        let text = self.fetch(&params).await?;
        Self::parse_daily_response(symbol, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_provider_id() {
        let provider = AlphaVantageProvider::new(AlphaVantageConfig::with_api_key("test_key"));
        assert_eq!(provider.id(), "ALPHA_VANTAGE");
    }

    #[test]
    fn test_config_default_endpoint() {
        let config = AlphaVantageConfig::with_api_key("test_key");
        assert_eq!(config.base_url, "https://www.alphavantage.co/query");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_error_message_maps_to_symbol_not_found() {
        let json = r#"{
            "Error Message": "Invalid API call. Please retry or visit the documentation."
        }"#;

        let result = AlphaVantageProvider::parse_daily_response("BOGUS", json);
        assert!(matches!(
            result,
            Err(MarketDataError::SymbolNotFound(_))
        ));
    }

    #[test]
    fn test_rate_limit_note_maps_to_rate_limited() {
        let json = r#"{
            "Note": "Thank you for using Alpha Vantage! Our standard API call frequency is 5 calls per minute and 500 calls per day."
        }"#;

        let result = AlphaVantageProvider::parse_daily_response("AAPL", json);
        assert!(matches!(
            result,
            Err(MarketDataError::RateLimited { .. })
        ));
    }

    #[test]
    fn test_rate_limit_information_maps_to_rate_limited() {
        let json = r#"{
            "Information": "We have detected your API key and our standard API rate limit is 25 requests per day."
        }"#;

        let result = AlphaVantageProvider::parse_daily_response("AAPL", json);
        assert!(matches!(
            result,
            Err(MarketDataError::RateLimited { .. })
        ));
    }

    #[test]
    fn test_selects_latest_date() {
        let json = r#"{
            "Time Series (Daily)": {
                "2024-01-02": {
                    "1. open": "140.00",
                    "2. high": "141.00",
                    "3. low": "139.00",
                    "4. close": "140.50",
                    "5. volume": "900000"
                },
                "2024-01-03": {
                    "1. open": "150.00",
                    "2. high": "152.00",
                    "3. low": "149.50",
                    "4. close": "151.25",
                    "5. volume": "1000000"
                }
            }
        }"#;

        let quote = AlphaVantageProvider::parse_daily_response("AAPL", json)
            .unwrap()
            .unwrap();
        assert_eq!(quote.date, NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        assert_eq!(quote.close, dec!(151.25));
    }

    #[test]
    fn test_ohlcv_fields_parse_exactly() {
        let json = r#"{
            "Time Series (Daily)": {
                "2024-01-03": {
                    "1. open": "150.00",
                    "2. high": "152.00",
                    "3. low": "149.50",
                    "4. close": "151.25",
                    "5. volume": "1000000"
                }
            }
        }"#;

        let quote = AlphaVantageProvider::parse_daily_response("AAPL", json)
            .unwrap()
            .unwrap();
        assert_eq!(quote.symbol, "AAPL");
        assert_eq!(quote.open, dec!(150.00));
        assert_eq!(quote.high, dec!(152.00));
        assert_eq!(quote.low, dec!(149.50));
        assert_eq!(quote.close, dec!(151.25));
        assert_eq!(quote.volume, 1_000_000);
    }

    #[test]
    fn test_missing_series_is_no_data_not_error() {
        let json = r#"{ "Meta Data": { "2. Symbol": "AAPL" } }"#;

        let result = AlphaVantageProvider::parse_daily_response("AAPL", json).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_empty_series_is_no_data() {
        let json = r#"{ "Time Series (Daily)": {} }"#;

        let result = AlphaVantageProvider::parse_daily_response("AAPL", json).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_malformed_price_is_transport_error() {
        let json = r#"{
            "Time Series (Daily)": {
                "2024-01-03": {
                    "1. open": "not-a-number",
                    "2. high": "152.00",
                    "3. low": "149.50",
                    "4. close": "151.25",
                    "5. volume": "1000000"
                }
            }
        }"#;

        let result = AlphaVantageProvider::parse_daily_response("AAPL", json);
        assert!(matches!(result, Err(MarketDataError::Transport { .. })));
    }

    #[test]
    fn test_malformed_body_is_transport_error() {
        let result = AlphaVantageProvider::parse_daily_response("AAPL", "<html>oops</html>");
        assert!(matches!(result, Err(MarketDataError::Transport { .. })));
    }

    #[test]
    fn test_informational_note_without_rate_limit_is_ignored() {
        let json = r#"{
            "Note": "This dataset is refreshed at the end of each trading day.",
            "Time Series (Daily)": {
                "2024-01-03": {
                    "1. open": "150.00",
                    "2. high": "152.00",
                    "3. low": "149.50",
                    "4. close": "151.25",
                    "5. volume": "1000000"
                }
            }
        }"#;

        let quote = AlphaVantageProvider::parse_daily_response("AAPL", json).unwrap();
        assert!(quote.is_some());
    }
}
