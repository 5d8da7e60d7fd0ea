//! OpenAI provider implementation
//!
//! This module implements the ChatProvider trait against OpenAI's chat
//! completions endpoint, using the functions API for function calling.
//! See: https://platform.openai.com/docs/api-reference/chat
//!
//! # Examples
//!
//! ## Basic usage with environment variable
//!
//! ```no_run
//! use assistant_llm::{ChatProvider, ChatRequest, Message};
//! use assistant_llm::providers::OpenAIProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create provider from OPENAI_API_KEY environment variable
//!     let provider = OpenAIProvider::from_env()?;
//!
//!     let request = ChatRequest::builder("gpt-3.5-turbo")
//!         .add_message(Message::user("What is AAPL trading at?"))
//!         .max_tokens(256)
//!         .build();
//!
//!     let response = provider.complete(request).await?;
//!     println!("{}", response.message.text().unwrap_or(""));
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Custom configuration
//!
//! ```no_run
//! use assistant_llm::providers::{OpenAIConfig, OpenAIProvider};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = OpenAIConfig::new("sk-...")
//!     .with_api_base("https://api.openai.com/v1")
//!     .with_timeout(60);
//!
//! let provider = OpenAIProvider::with_config(config)?;
//! # Ok(())
//! # }
//! ```

use crate::{
    ChatProvider, ChatRequest, ChatResponse, FinishReason, FunctionCall, Message, Result, Role,
    TokenUsage,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

const DEFAULT_OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Configuration for the OpenAI provider
///
/// The API credential lives here, injected at construction; nothing reads
/// it from ambient state after that.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    /// API key for authentication
    pub api_key: String,

    /// Base URL for the OpenAI API (default: "https://api.openai.com/v1")
    /// Can be customized for OpenAI-compatible APIs
    pub api_base: String,

    /// Request timeout in seconds (default: 120)
    pub timeout_secs: u64,
}

impl OpenAIConfig {
    /// Create a new config with the given API key and default settings
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_OPENAI_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create config from environment variables
    ///
    /// Reads the API key from `OPENAI_API_KEY`. Optionally reads the base
    /// URL from `OPENAI_API_BASE` if set.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            crate::LLMError::ConfigurationError(
                "OPENAI_API_KEY environment variable not set".to_string(),
            )
        })?;

        let api_base = std::env::var("OPENAI_API_BASE")
            .unwrap_or_else(|_| DEFAULT_OPENAI_API_BASE.to_string());

        Ok(Self {
            api_key,
            api_base,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        })
    }

    /// Set a custom API base URL
    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into();
        self
    }

    /// Set the request timeout in seconds
    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: DEFAULT_OPENAI_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// OpenAI chat provider
///
/// Supports GPT models (gpt-3.5-turbo, gpt-4, ...) and OpenAI-compatible
/// APIs through custom configuration.
pub struct OpenAIProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    /// Create a new provider with custom configuration
    pub fn with_config(config: OpenAIConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a new provider with an API key and default settings
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(OpenAIConfig::new(api_key))
    }

    /// Create a provider from environment variables
    ///
    /// Reads the API key from `OPENAI_API_KEY` and optionally the base URL
    /// from `OPENAI_API_BASE`.
    pub fn from_env() -> Result<Self> {
        let config = OpenAIConfig::from_env()?;
        Self::with_config(config)
    }

    /// Get the current configuration
    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }
}

#[async_trait]
impl ChatProvider for OpenAIProvider {
    #[instrument(skip(self, request), fields(model = %request.model, api_base = %self.config.api_base))]
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse> {
        debug!("Sending request to OpenAI API at {}", self.config.api_base);

        // ChatRequest already serializes into the chat-completions wire
        // shape, so it goes over the wire as-is.
        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        // Handle errors
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await?;

            return Err(match status.as_u16() {
                401 => crate::LLMError::AuthenticationFailed,
                429 => crate::LLMError::RateLimitExceeded(error_text),
                400 => crate::LLMError::InvalidRequest(error_text),
                404 => crate::LLMError::ModelNotFound(request.model),
                _ => crate::LLMError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        // Parse response
        let openai_response: OpenAIResponse = response.json().await.map_err(|e| {
            crate::LLMError::UnexpectedResponse(format!("Failed to parse response: {e}"))
        })?;

        // Extract first choice (OpenAI can return multiple but we use first)
        let choice = openai_response.choices.into_iter().next().ok_or_else(|| {
            crate::LLMError::UnexpectedResponse("No choices in response".to_string())
        })?;

        debug!(
            "Received response - finish_reason: {}, tokens: {}/{}",
            choice.finish_reason,
            openai_response.usage.prompt_tokens,
            openai_response.usage.completion_tokens
        );

        let message = parse_response_message(choice.message);
        let finish_reason = map_finish_reason(&choice.finish_reason);

        Ok(ChatResponse {
            message,
            finish_reason,
            usage: TokenUsage {
                prompt_tokens: openai_response.usage.prompt_tokens,
                completion_tokens: openai_response.usage.completion_tokens,
            },
        })
    }

    fn name(&self) -> &'static str {
        "openai"
    }
}

// ============================================================================
// OpenAI-specific response types
// ============================================================================

#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    choices: Vec<OpenAIChoice>,
    usage: OpenAIUsage,
}

#[derive(Debug, Deserialize)]
struct OpenAIChoice {
    message: OpenAIResponseMessage,
    finish_reason: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseMessage {
    #[allow(dead_code)]
    role: String,
    content: Option<String>,
    function_call: Option<OpenAIResponseFunctionCall>,
}

#[derive(Debug, Deserialize)]
struct OpenAIResponseFunctionCall {
    name: String,
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
}

// ============================================================================
// Conversion functions
// ============================================================================

/// Convert the response message to our format
///
/// The arguments string is carried through untouched; parsing it is the
/// dispatch layer's job.
fn parse_response_message(msg: OpenAIResponseMessage) -> Message {
    Message {
        role: Role::Assistant,
        content: msg.content,
        name: None,
        function_call: msg.function_call.map(|call| FunctionCall {
            name: call.name,
            arguments: call.arguments,
        }),
    }
}

/// Map OpenAI finish reason to our format
fn map_finish_reason(reason: &str) -> FinishReason {
    match reason {
        "stop" => FinishReason::Stop,
        "length" => FinishReason::Length,
        "function_call" => FinishReason::FunctionCall,
        "content_filter" => {
            debug!("Content filtered by OpenAI safety systems");
            FinishReason::Stop
        }
        _ => {
            debug!("Unknown finish reason: {}", reason);
            FinishReason::Stop
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::{FunctionSpec, schema};
    use serde_json::json;

    #[test]
    fn test_provider_creation() {
        let provider = OpenAIProvider::new("test-key");
        assert!(provider.is_ok());
        let provider = provider.unwrap();
        assert_eq!(provider.name(), "openai");
        assert_eq!(provider.config().api_key, "test-key");
        assert_eq!(provider.config().api_base, "https://api.openai.com/v1");
    }

    #[test]
    fn test_provider_with_custom_config() {
        let config = OpenAIConfig::new("test-key")
            .with_api_base("https://custom.api.com/v1")
            .with_timeout(60);

        let provider = OpenAIProvider::with_config(config).unwrap();
        assert_eq!(provider.config().api_base, "https://custom.api.com/v1");
        assert_eq!(provider.config().timeout_secs, 60);
    }

    #[test]
    fn test_config_from_env() {
        unsafe {
            std::env::set_var("OPENAI_API_KEY", "test-key-from-env");
            std::env::set_var("OPENAI_API_BASE", "https://custom.openai.com/v1");
        }

        let config = OpenAIConfig::from_env().unwrap();
        assert_eq!(config.api_key, "test-key-from-env");
        assert_eq!(config.api_base, "https://custom.openai.com/v1");

        unsafe {
            std::env::remove_var("OPENAI_API_KEY");
            std::env::remove_var("OPENAI_API_BASE");
        }
    }

    #[test]
    fn test_request_wire_shape() {
        let spec = FunctionSpec::new(
            "get_stock_price",
            "Latest closing price for a ticker",
            schema::object(
                json!({"ticker": schema::string("Stock ticker symbol")}),
                vec!["ticker"],
            ),
        );

        let request = ChatRequest::builder("gpt-3.5-turbo")
            .add_message(Message::user("price of AAPL?"))
            .functions(vec![spec])
            .max_tokens(256)
            .build();

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "gpt-3.5-turbo");
        assert_eq!(json["function_call"], "auto");
        assert_eq!(json["functions"][0]["name"], "get_stock_price");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["max_tokens"], 256);
    }

    #[test]
    fn test_response_with_function_call() {
        let response_msg = OpenAIResponseMessage {
            role: "assistant".to_string(),
            content: None,
            function_call: Some(OpenAIResponseFunctionCall {
                name: "calculate_SMA".to_string(),
                arguments: r#"{"ticker":"AAPL","window":20}"#.to_string(),
            }),
        };

        let message = parse_response_message(response_msg);

        assert_eq!(message.role, Role::Assistant);
        assert!(message.has_function_call());
        let call = message.function_call.unwrap();
        assert_eq!(call.name, "calculate_SMA");
        assert_eq!(call.arguments, r#"{"ticker":"AAPL","window":20}"#);
    }

    #[test]
    fn test_response_without_function_call() {
        let response_msg = OpenAIResponseMessage {
            role: "assistant".to_string(),
            content: Some("AAPL closed at 189.30".to_string()),
            function_call: None,
        };

        let message = parse_response_message(response_msg);

        assert!(!message.has_function_call());
        assert_eq!(message.text(), Some("AAPL closed at 189.30"));
    }

    #[test]
    fn test_finish_reason_mapping() {
        assert_eq!(map_finish_reason("stop"), FinishReason::Stop);
        assert_eq!(map_finish_reason("length"), FinishReason::Length);
        assert_eq!(map_finish_reason("function_call"), FinishReason::FunctionCall);
        assert_eq!(map_finish_reason("content_filter"), FinishReason::Stop);
        assert_eq!(map_finish_reason("unknown"), FinishReason::Stop);
    }

    #[test]
    fn test_response_deserialization() {
        let raw = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "function_call": {
                        "name": "plot_stock_price",
                        "arguments": "{\"ticker\":\"MSFT\"}"
                    }
                },
                "finish_reason": "function_call"
            }],
            "usage": {"prompt_tokens": 120, "completion_tokens": 18}
        });

        let parsed: OpenAIResponse = serde_json::from_value(raw).unwrap();
        assert_eq!(parsed.choices.len(), 1);
        assert_eq!(parsed.choices[0].finish_reason, "function_call");
        assert_eq!(parsed.usage.prompt_tokens, 120);
    }
}
