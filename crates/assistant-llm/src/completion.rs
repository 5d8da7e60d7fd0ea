//! Completion request and response types

use crate::{FunctionSpec, Message};
use serde::{Deserialize, Serialize};

/// Request for a chat completion over the full conversation history
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model identifier (provider-specific)
    pub model: String,

    /// Conversation history, oldest first
    pub messages: Vec<Message>,

    /// Functions available for the model to call
    #[serde(skip_serializing_if = "Option::is_none")]
    pub functions: Option<Vec<FunctionSpec>>,

    /// Function-call mode ("auto" lets the model decide)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<String>,

    /// Maximum tokens to generate
    pub max_tokens: usize,

    /// Sampling temperature (0.0-1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

/// Response from a chat completion
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Generated message from the assistant
    pub message: Message,

    /// Why generation stopped
    pub finish_reason: FinishReason,

    /// Token usage statistics
    pub usage: TokenUsage,
}

/// Reason the model stopped generating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FinishReason {
    /// Natural completion
    Stop,

    /// Hit max tokens limit
    Length,

    /// The model emitted a function-call intent
    FunctionCall,
}

/// Token usage statistics
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TokenUsage {
    /// Number of prompt tokens
    pub prompt_tokens: usize,

    /// Number of completion tokens
    pub completion_tokens: usize,
}

impl TokenUsage {
    /// Total tokens used (prompt + completion)
    pub fn total(&self) -> usize {
        self.prompt_tokens + self.completion_tokens
    }
}

impl ChatRequest {
    /// Create a builder for chat requests
    pub fn builder(model: impl Into<String>) -> ChatRequestBuilder {
        ChatRequestBuilder::new(model)
    }
}

/// Builder for ChatRequest
pub struct ChatRequestBuilder {
    model: String,
    messages: Vec<Message>,
    functions: Option<Vec<FunctionSpec>>,
    function_call: Option<String>,
    max_tokens: usize,
    temperature: Option<f32>,
}

impl ChatRequestBuilder {
    /// Create a new builder
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            functions: None,
            function_call: None,
            max_tokens: 1024,
            temperature: None,
        }
    }

    /// Set the conversation messages
    pub fn messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    /// Add a single message
    pub fn add_message(mut self, message: Message) -> Self {
        self.messages.push(message);
        self
    }

    /// Attach the function catalog; the model chooses calls automatically
    pub fn functions(mut self, functions: Vec<FunctionSpec>) -> Self {
        self.functions = Some(functions);
        self.function_call = Some("auto".to_string());
        self
    }

    /// Set the maximum tokens
    pub fn max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Build the chat request
    pub fn build(self) -> ChatRequest {
        ChatRequest {
            model: self.model,
            messages: self.messages,
            functions: self.functions,
            function_call: self.function_call,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functions::schema;
    use serde_json::json;

    #[test]
    fn test_builder() {
        let request = ChatRequest::builder("gpt-3.5-turbo")
            .add_message(Message::user("What is AAPL trading at?"))
            .max_tokens(2048)
            .temperature(0.7)
            .build();

        assert_eq!(request.model, "gpt-3.5-turbo");
        assert_eq!(request.messages.len(), 1);
        assert_eq!(request.max_tokens, 2048);
        assert_eq!(request.temperature, Some(0.7));
        assert!(request.functions.is_none());
        assert!(request.function_call.is_none());
    }

    #[test]
    fn test_functions_set_auto_mode() {
        let spec = FunctionSpec::new(
            "get_stock_price",
            "Latest closing price",
            schema::object(json!({"ticker": schema::string("ticker")}), vec!["ticker"]),
        );

        let request = ChatRequest::builder("gpt-3.5-turbo")
            .add_message(Message::user("price of AAPL?"))
            .functions(vec![spec])
            .build();

        assert_eq!(request.function_call.as_deref(), Some("auto"));
        assert_eq!(request.functions.as_ref().map(Vec::len), Some(1));
    }

    #[test]
    fn test_request_serialization_omits_absent_fields() {
        let request = ChatRequest::builder("gpt-3.5-turbo")
            .add_message(Message::user("hello"))
            .build();

        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("functions").is_none());
        assert!(json.get("function_call").is_none());
    }

    #[test]
    fn test_token_usage() {
        let usage = TokenUsage {
            prompt_tokens: 100,
            completion_tokens: 50,
        };
        assert_eq!(usage.total(), 150);
    }
}
