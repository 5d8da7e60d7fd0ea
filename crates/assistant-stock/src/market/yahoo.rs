//! Yahoo Finance market data source

use super::{ClosePoint, MarketData, PriceSeries};
use crate::error::{AssistantError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use time::OffsetDateTime;
use yahoo_finance_api as yahoo;

/// Market data backed by Yahoo Finance daily quotes
///
/// Every call fetches the trailing year of history fresh; nothing is
/// cached or retried.
#[derive(Debug, Default)]
pub struct YahooMarketData {}

impl YahooMarketData {
    /// Create a new Yahoo Finance market data source
    pub fn new() -> Self {
        Self {}
    }
}

#[async_trait]
impl MarketData for YahooMarketData {
    async fn daily_closes(&self, symbol: &str) -> Result<PriceSeries> {
        if symbol.trim().is_empty() {
            return Err(AssistantError::MarketData(
                "ticker symbol must not be empty".to_string(),
            ));
        }

        let provider = yahoo::YahooConnector::new()
            .map_err(|e| AssistantError::MarketData(e.to_string()))?;

        let end = Utc::now();
        let start = end - chrono::Duration::days(365);

        // Convert chrono DateTime to time OffsetDateTime
        let start_odt = OffsetDateTime::from_unix_timestamp(start.timestamp())
            .map_err(|e| AssistantError::MarketData(format!("Invalid start timestamp: {e}")))?;
        let end_odt = OffsetDateTime::from_unix_timestamp(end.timestamp())
            .map_err(|e| AssistantError::MarketData(format!("Invalid end timestamp: {e}")))?;

        let response = provider
            .get_quote_history(symbol, start_odt, end_odt)
            .await
            .map_err(|e| AssistantError::MarketData(e.to_string()))?;

        let quotes = response
            .quotes()
            .map_err(|e| AssistantError::MarketData(e.to_string()))?;

        let points: Vec<ClosePoint> = quotes
            .iter()
            .map(|q| ClosePoint {
                date: DateTime::from_timestamp(q.timestamp as i64, 0)
                    .unwrap_or_else(Utc::now)
                    .date_naive(),
                close: q.close,
            })
            .collect();

        if points.is_empty() {
            return Err(AssistantError::EmptySeries {
                symbol: symbol.to_string(),
            });
        }

        Ok(PriceSeries::new(symbol, points))
    }
}
