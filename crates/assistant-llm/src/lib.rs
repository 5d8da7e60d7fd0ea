//! Chat-completion layer for the finance assistant
//!
//! This crate provides the provider-agnostic pieces of the assistant's
//! conversation with a chat model:
//!
//! - Message types in the chat wire shape (including function-call intents)
//! - Completion request/response types
//! - Function specifications for the model's function-calling mechanism
//! - The `ChatProvider` trait and an OpenAI implementation

pub mod completion;
pub mod error;
pub mod functions;
pub mod messages;
pub mod provider;
pub mod providers;

// Re-export main types
pub use completion::{ChatRequest, ChatResponse, FinishReason, TokenUsage};
pub use error::{LLMError, Result};
pub use functions::FunctionSpec;
pub use messages::{FunctionCall, Message, Role};
pub use provider::ChatProvider;
