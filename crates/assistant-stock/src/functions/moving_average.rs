//! Moving-average functions (SMA and EMA)

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
struct WindowedParams {
    ticker: String,
    window: usize,
}

fn window_schema() -> Value {
    schema::object(
        json!({
            "ticker": schema::string(
                "The stock ticker symbol for a company (for example AAPL for Apple)."
            ),
            "window": schema::integer("The timeframe in trading days to consider."),
        }),
        vec!["ticker", "window"],
    )
}

/// Render an average that came out NAN as explicit wording
fn format_average(kind: &str, value: f64, window: usize, series_len: usize) -> String {
    if value.is_nan() {
        format!(
            "The {window}-day {kind} is undefined: the window exceeds the {series_len} \
             available trading days."
        )
    } else {
        format!("{value:.2}")
    }
}

/// `calculate_SMA` - simple moving average over a caller-chosen window
pub struct SmaFunction {
    market: Arc<dyn MarketData>,
}

impl SmaFunction {
    /// Create a new SMA function
    pub fn new(market: Arc<dyn MarketData>) -> Self {
        Self { market }
    }
}

#[async_trait]
impl AnalysisFunction for SmaFunction {
    fn name(&self) -> &str {
        "calculate_SMA"
    }

    fn description(&self) -> &str {
        "Calculate the simple moving average for a given stock ticker and a window."
    }

    fn parameters(&self) -> Value {
        window_schema()
    }

    async fn execute(&self, args: Value) -> Result<FunctionOutcome> {
        let params: WindowedParams = serde_json::from_value(args)
            .map_err(|e| AssistantError::MalformedArguments(e.to_string()))?;

        let series = self.market.daily_closes(&params.ticker).await?;
        let closes = series.closes();
        let value = indicators::simple_moving_average(&closes, params.window);

        Ok(FunctionOutcome::Text(format_average(
            "SMA",
            value,
            params.window,
            closes.len(),
        )))
    }
}

/// `calculate_EMA` - exponential moving average over a caller-chosen window
pub struct EmaFunction {
    market: Arc<dyn MarketData>,
}

impl EmaFunction {
    /// Create a new EMA function
    pub fn new(market: Arc<dyn MarketData>) -> Self {
        Self { market }
    }
}

#[async_trait]
impl AnalysisFunction for EmaFunction {
    fn name(&self) -> &str {
        "calculate_EMA"
    }

    fn description(&self) -> &str {
        "Calculate the exponential moving average for a given stock ticker and a window."
    }

    fn parameters(&self) -> Value {
        window_schema()
    }

    async fn execute(&self, args: Value) -> Result<FunctionOutcome> {
        let params: WindowedParams = serde_json::from_value(args)
            .map_err(|e| AssistantError::MalformedArguments(e.to_string()))?;

        let series = self.market.daily_closes(&params.ticker).await?;
        let closes = series.closes();
        let value = indicators::exponential_moving_average(&closes, params.window);

        Ok(FunctionOutcome::Text(format_average(
            "EMA",
            value,
            params.window,
            closes.len(),
        )))
    }
}
