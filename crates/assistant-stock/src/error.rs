//! Error types for the finance assistant
//!
//! Two families: external failures (model API, market data) and dispatch
//! failures (the model asked for something the catalog cannot honor). Both
//! are terminal for the current turn and never retried. Numeric edge cases
//! in the indicators are not errors at all; they surface as explicit NAN or
//! saturated values rendered into text.

use assistant_llm::LLMError;
use thiserror::Error;

/// Errors produced while handling a conversation turn
#[derive(Debug, Error)]
pub enum AssistantError {
    /// Chat-completion layer failure
    #[error("Model error: {0}")]
    Llm(#[from] LLMError),

    /// Market-data fetch failed
    #[error("Market data error: {0}")]
    MarketData(String),

    /// The data source returned no rows for the symbol
    #[error("No price data available for {symbol}")]
    EmptySeries { symbol: String },

    /// The model named a function that is not in the catalog
    #[error("Unknown function: {0}")]
    UnknownFunction(String),

    /// The model's argument payload was not valid JSON
    #[error("Malformed function arguments: {0}")]
    MalformedArguments(String),

    /// A required parameter was absent from the arguments
    #[error("Function {function} is missing required argument '{parameter}'")]
    MissingArgument { function: String, parameter: String },

    /// An argument was present but unusable
    #[error("Invalid argument for {function}: {reason}")]
    InvalidArgument { function: String, reason: String },

    /// Chart rendering failed
    #[error("Chart error: {0}")]
    Chart(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, AssistantError>;
