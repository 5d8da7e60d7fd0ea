//! Price chart function

use crate::catalog::{AnalysisFunction, FunctionOutcome};
use crate::chart;
use crate::error::{AssistantError, Result};
use crate::market::MarketData;
use async_trait::async_trait;
use assistant_llm::functions::schema;
use serde::Deserialize;
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;

/// `plot_stock_price` - render the trailing year of closes as a PNG
///
/// The only function whose outcome is a file rather than text; the
/// dispatch loop ends the turn on it without a summary round.
pub struct PlotFunction {
    market: Arc<dyn MarketData>,
    chart_path: PathBuf,
}

#[derive(Debug, Deserialize)]
struct PlotParams {
    ticker: String,
}

impl PlotFunction {
    /// Create a new plot function writing to the configured path
    pub fn new(market: Arc<dyn MarketData>, chart_path: PathBuf) -> Self {
        Self { market, chart_path }
    }
}

#[async_trait]
impl AnalysisFunction for PlotFunction {
    fn name(&self) -> &str {
        "plot_stock_price"
    }

    fn description(&self) -> &str {
        "Plot the stock price for the last year given the ticker symbol of a company."
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
        let params: PlotParams = serde_json::from_value(args)
            .map_err(|e| AssistantError::MalformedArguments(e.to_string()))?;

        let series = self.market.daily_closes(&params.ticker).await?;
        chart::render_price_chart(&series, &self.chart_path)?;

        Ok(FunctionOutcome::Chart(self.chart_path.clone()))
    }
}
