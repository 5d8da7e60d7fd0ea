//! Finance assistant domain crate
//!
//! Answers natural-language finance questions by letting a chat model pick
//! from a small catalog of deterministic stock-analytics functions:
//!
//! - latest price, SMA, EMA, RSI, and MACD over a year of Yahoo daily closes
//! - a one-year price chart rendered to a PNG file
//!
//! The [`dispatch::Assistant`] owns the conversation and runs the
//! two-round-trip turn loop; see the `finance-bot` binary for the
//! interactive surface.

pub mod catalog;
pub mod chart;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod functions;
pub mod indicators;
pub mod market;

// Re-export main types
pub use catalog::{AnalysisFunction, FunctionCatalog, FunctionOutcome};
pub use config::AssistantConfig;
pub use dispatch::{Assistant, TurnOutcome};
pub use error::{AssistantError, Result};
pub use functions::build_catalog;
pub use market::{ClosePoint, MarketData, PriceSeries, StaticMarket, YahooMarketData};
