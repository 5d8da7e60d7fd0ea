//! Momentum functions (RSI and MACD)

use crate::catalog::{AnalysisFunction, FunctionOutcome};
use crate::error::{AssistantError, Result};
use crate::indicators;
use crate::market::MarketData;
use async_trait::async_trait;
use assistant_llm::functions::schema;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
struct TickerParams {
    ticker: String,
}

fn ticker_schema() -> Value {
    schema::object(
        json!({
            "ticker": schema::string(
                "The stock ticker symbol for a company (for example AAPL for Apple)."
            ),
        }),
        vec!["ticker"],
    )
}

/// `calculate_RSI` - 14-period relative strength index
pub struct RsiFunction {
    market: Arc<dyn MarketData>,
}

impl RsiFunction {
    /// Create a new RSI function
    pub fn new(market: Arc<dyn MarketData>) -> Self {
        Self { market }
    }
}

#[async_trait]
impl AnalysisFunction for RsiFunction {
    fn name(&self) -> &str {
        "calculate_RSI"
    }

    fn description(&self) -> &str {
        "Calculate the RSI for a given stock ticker."
    }

    fn parameters(&self) -> Value {
        ticker_schema()
    }

    async fn execute(&self, args: Value) -> Result<FunctionOutcome> {
        let params: TickerParams = serde_json::from_value(args)
            .map_err(|e| AssistantError::MalformedArguments(e.to_string()))?;

        let series = self.market.daily_closes(&params.ticker).await?;
        let rsi = indicators::relative_strength_index(&series.closes());

        let text = if rsi.is_nan() {
            format!(
                "The RSI is undefined: {} has fewer than 2 trading days of data.",
                params.ticker
            )
        } else {
            format!("{rsi:.2}")
        };

        Ok(FunctionOutcome::Text(text))
    }
}

/// `calculate_MACD` - MACD line, signal line, and histogram
pub struct MacdFunction {
    market: Arc<dyn MarketData>,
}

impl MacdFunction {
    /// Create a new MACD function
    pub fn new(market: Arc<dyn MarketData>) -> Self {
        Self { market }
    }
}

#[async_trait]
impl AnalysisFunction for MacdFunction {
    fn name(&self) -> &str {
        "calculate_MACD"
    }

    fn description(&self) -> &str {
        "Calculate the MACD for a given stock ticker."
    }

    fn parameters(&self) -> Value {
        ticker_schema()
    }

    async fn execute(&self, args: Value) -> Result<FunctionOutcome> {
        let params: TickerParams = serde_json::from_value(args)
            .map_err(|e| AssistantError::MalformedArguments(e.to_string()))?;

        let series = self.market.daily_closes(&params.ticker).await?;
        let macd = indicators::macd(&series.closes());

        Ok(FunctionOutcome::Text(format!(
            "{:.4}, {:.4}, {:.4}",
            macd.macd, macd.signal, macd.histogram
        )))
    }
}
