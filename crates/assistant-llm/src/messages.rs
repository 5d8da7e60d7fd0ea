//! Message types for the chat wire format
//!
//! This module defines the conversation entries exchanged with the model.
//! Messages serialize directly into the chat-completions wire shape,
//! including function-call intents on assistant messages and named
//! function-result messages.

use serde::{Deserialize, Serialize};

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// System message
    System,
    /// User message
    User,
    /// Assistant message
    Assistant,
    /// Function result message (carries the function's name)
    Function,
}

/// A structured function-call intent emitted by the model
///
/// `arguments` is kept as the raw JSON string the model produced; parsing
/// and validation happen at dispatch time, not here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionCall {
    /// Name of the function the model wants invoked
    pub name: String,

    /// Function arguments as a JSON-encoded string
    pub arguments: String,
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message role
    pub role: Role,

    /// Text content (absent on assistant messages that only call a function)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Function name, present only on `Role::Function` messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Function-call intent, present only on assistant messages
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function_call: Option<FunctionCall>,
}

impl Message {
    /// Create a system message
    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: Some(text.into()),
            name: None,
            function_call: None,
        }
    }

    /// Create a user message
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(text.into()),
            name: None,
            function_call: None,
        }
    }

    /// Create an assistant message with text
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(text.into()),
            name: None,
            function_call: None,
        }
    }

    /// Create an assistant message carrying a function-call intent
    pub fn assistant_function_call(call: FunctionCall) -> Self {
        Self {
            role: Role::Assistant,
            content: None,
            name: None,
            function_call: Some(call),
        }
    }

    /// Create a function-result message
    pub fn function(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: Role::Function,
            content: Some(content.into()),
            name: Some(name.into()),
            function_call: None,
        }
    }

    /// Extract the text content, if any
    pub fn text(&self) -> Option<&str> {
        self.content.as_deref()
    }

    /// Check if this message carries a function-call intent
    pub fn has_function_call(&self) -> bool {
        self.function_call.is_some()
    }
}
