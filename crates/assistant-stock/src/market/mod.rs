//! Market data access
//!
//! A price series is one year of daily closes for a single symbol, fetched
//! fresh for every function invocation. The `MarketData` trait is the seam
//! between the analysis functions and the data source; production uses
//! Yahoo Finance, tests use `StaticMarket`.

mod yahoo;

pub use yahoo::YahooMarketData;

use crate::error::{AssistantError, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;

/// A single daily close
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosePoint {
    /// Trading date
    pub date: NaiveDate,
    /// Closing price
    pub close: f64,
}

/// One year of daily closes for a symbol, ascending by date
#[derive(Debug, Clone)]
pub struct PriceSeries {
    /// Ticker symbol as requested
    pub symbol: String,
    /// Daily closes, oldest first
    pub points: Vec<ClosePoint>,
}

impl PriceSeries {
    /// Create a new price series
    pub fn new(symbol: impl Into<String>, points: Vec<ClosePoint>) -> Self {
        Self {
            symbol: symbol.into(),
            points,
        }
    }

    /// Closing prices in date order
    pub fn closes(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.close).collect()
    }

    /// The most recent closing price
    pub fn last_close(&self) -> Result<f64> {
        self.points
            .last()
            .map(|p| p.close)
            .ok_or_else(|| AssistantError::EmptySeries {
                symbol: self.symbol.clone(),
            })
    }

    /// Number of trading days in the series
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the series has no points
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Date of the oldest point
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    /// Date of the newest point
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

/// Trait for daily close-price sources
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Fetch the trailing year of daily closes for a symbol
    ///
    /// An empty result from the source is an error, never a placeholder
    /// series.
    async fn daily_closes(&self, symbol: &str) -> Result<PriceSeries>;
}

/// In-memory market data for offline use and tests
#[derive(Debug, Default)]
pub struct StaticMarket {
    series: HashMap<String, Vec<ClosePoint>>,
}

impl StaticMarket {
    /// Create an empty static market
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a symbol with its daily closes
    pub fn with_series(mut self, symbol: impl Into<String>, points: Vec<ClosePoint>) -> Self {
        self.series.insert(symbol.into(), points);
        self
    }

    /// Add a symbol from bare closes, dated consecutively from a start date
    pub fn with_closes(self, symbol: impl Into<String>, start: NaiveDate, closes: &[f64]) -> Self {
        let points = closes
            .iter()
            .enumerate()
            .map(|(i, &close)| ClosePoint {
                date: start + chrono::Duration::days(i as i64),
                close,
            })
            .collect();
        self.with_series(symbol, points)
    }
}

#[async_trait]
impl MarketData for StaticMarket {
    async fn daily_closes(&self, symbol: &str) -> Result<PriceSeries> {
        let points = self
            .series
            .get(symbol)
            .ok_or_else(|| AssistantError::EmptySeries {
                symbol: symbol.to_string(),
            })?;

        if points.is_empty() {
            return Err(AssistantError::EmptySeries {
                symbol: symbol.to_string(),
            });
        }

        Ok(PriceSeries::new(symbol, points.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_last_close() {
        let series = PriceSeries::new(
            "AAPL",
            vec![
                ClosePoint {
                    date: date(2024, 1, 2),
                    close: 185.0,
                },
                ClosePoint {
                    date: date(2024, 1, 3),
                    close: 186.5,
                },
            ],
        );

        assert_eq!(series.last_close().unwrap(), 186.5);
        assert_eq!(series.len(), 2);
        assert_eq!(series.first_date(), Some(date(2024, 1, 2)));
        assert_eq!(series.last_date(), Some(date(2024, 1, 3)));
    }

    #[test]
    fn test_last_close_empty_series() {
        let series = PriceSeries::new("AAPL", vec![]);
        let err = series.last_close().unwrap_err();
        assert!(matches!(err, AssistantError::EmptySeries { .. }));
    }

    #[tokio::test]
    async fn test_static_market_returns_series() {
        let market =
            StaticMarket::new().with_closes("MSFT", date(2024, 1, 1), &[400.0, 401.0, 399.5]);

        let series = market.daily_closes("MSFT").await.unwrap();
        assert_eq!(series.symbol, "MSFT");
        assert_eq!(series.closes(), vec![400.0, 401.0, 399.5]);
    }

    #[tokio::test]
    async fn test_static_market_unknown_symbol() {
        let market = StaticMarket::new();
        let err = market.daily_closes("NOPE").await.unwrap_err();
        assert!(matches!(err, AssistantError::EmptySeries { .. }));
    }

    #[tokio::test]
    async fn test_static_market_empty_series_is_error() {
        let market = StaticMarket::new().with_series("EMPTY", vec![]);
        let err = market.daily_closes("EMPTY").await.unwrap_err();
        assert!(matches!(err, AssistantError::EmptySeries { .. }));
    }
}
