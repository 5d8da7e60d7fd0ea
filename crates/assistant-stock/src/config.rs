//! Configuration for the finance assistant

use crate::error::{AssistantError, Result};
use std::path::PathBuf;

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_CHART_PATH: &str = "stock.png";
const DEFAULT_MAX_TOKENS: usize = 1024;

/// Configuration for the assistant's dispatch loop
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    /// Model used for the first round trip (intent detection)
    pub model: String,

    /// Model used for the second round trip (result summarization)
    pub summary_model: String,

    /// Where the price chart is written (overwritten on every plot turn)
    pub chart_path: PathBuf,

    /// Max tokens per completion
    pub max_tokens: usize,

    /// Sampling temperature
    pub temperature: Option<f32>,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            summary_model: DEFAULT_MODEL.to_string(),
            chart_path: PathBuf::from(DEFAULT_CHART_PATH),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: None,
        }
    }
}

impl AssistantConfig {
    /// Create a new configuration builder
    pub fn builder() -> AssistantConfigBuilder {
        AssistantConfigBuilder::default()
    }

    /// Load configuration from environment variables
    ///
    /// Reads `OPENAI_MODEL`, `OPENAI_SUMMARY_MODEL`, and
    /// `FINANCE_CHART_PATH`; unset variables keep their defaults. The
    /// summary model defaults to the primary model.
    pub fn from_env() -> Result<Self> {
        let mut builder = Self::builder();

        if let Ok(model) = std::env::var("OPENAI_MODEL") {
            builder = builder.model(model);
        }
        if let Ok(model) = std::env::var("OPENAI_SUMMARY_MODEL") {
            builder = builder.summary_model(model);
        }
        if let Ok(path) = std::env::var("FINANCE_CHART_PATH") {
            builder = builder.chart_path(path);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.model.is_empty() {
            return Err(AssistantError::Config("model must not be empty".to_string()));
        }
        if self.summary_model.is_empty() {
            return Err(AssistantError::Config(
                "summary model must not be empty".to_string(),
            ));
        }
        if self.max_tokens == 0 {
            return Err(AssistantError::Config(
                "max_tokens must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for AssistantConfig
#[derive(Debug, Default)]
pub struct AssistantConfigBuilder {
    model: Option<String>,
    summary_model: Option<String>,
    chart_path: Option<PathBuf>,
    max_tokens: Option<usize>,
    temperature: Option<f32>,
}

impl AssistantConfigBuilder {
    /// Set the primary model
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the summary model (defaults to the primary model)
    pub fn summary_model(mut self, model: impl Into<String>) -> Self {
        self.summary_model = Some(model.into());
        self
    }

    /// Set the chart output path
    pub fn chart_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.chart_path = Some(path.into());
        self
    }

    /// Set max tokens per completion
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the sampling temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AssistantConfig> {
        let defaults = AssistantConfig::default();
        let model = self.model.unwrap_or(defaults.model);

        let config = AssistantConfig {
            // Summary rounds go to the primary model unless split explicitly
            summary_model: self.summary_model.unwrap_or_else(|| model.clone()),
            model,
            chart_path: self.chart_path.unwrap_or(defaults.chart_path),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            temperature: self.temperature,
        };

        config.validate()?;
        Ok(config)
    }
}
