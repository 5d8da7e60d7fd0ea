//! Latest price lookup

use crate::catalog::{AnalysisFunction, FunctionOutcome};
use crate::error::{AssistantError, Result};
use crate::market::MarketData;
use async_trait::async_trait;
use assistant_llm::functions::schema;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// `get_stock_price` - the most recent daily close for a ticker
pub struct PriceFunction {
    market: Arc<dyn MarketData>,
}

#[derive(Debug, Deserialize)]
struct PriceParams {
    ticker: String,
}

impl PriceFunction {
    /// Create a new price function
    pub fn new(market: Arc<dyn MarketData>) -> Self {
        Self { market }
    }
}

#[async_trait]
impl AnalysisFunction for PriceFunction {
    fn name(&self) -> &str {
        "get_stock_price"
    }

    fn description(&self) -> &str {
        "Gets the latest stock price given the ticker symbol of a company."
    }

    fn parameters(&self) -> Value {
        schema::object(
            json!({
                "ticker": schema::string(
                    "The stock ticker symbol for a company (for example AAPL for Apple)."
                ),
            }),
            vec!["ticker"],
        )
    }

    async fn execute(&self, args: Value) -> Result<FunctionOutcome> {
        let params: PriceParams = serde_json::from_value(args)
            .map_err(|e| AssistantError::MalformedArguments(e.to_string()))?;

        let series = self.market.daily_closes(&params.ticker).await?;
        let price = series.last_close()?;

        Ok(FunctionOutcome::Text(format!("{price:.2}")))
    }
}
