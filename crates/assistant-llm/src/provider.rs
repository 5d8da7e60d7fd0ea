//! Chat provider trait definition

use crate::{ChatRequest, ChatResponse, Result};
use async_trait::async_trait;

/// Trait for chat-completion providers
///
/// Implementations of this trait provide access to a chat model service.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Generate a completion from the model
    ///
    /// # Arguments
    ///
    /// * `request` - The chat request with messages, functions, and parameters
    ///
    /// # Returns
    ///
    /// The response with the assistant's message and metadata
    async fn complete(&self, request: ChatRequest) -> Result<ChatResponse>;

    /// Get the provider name (e.g., "openai")
    fn name(&self) -> &str;
}
