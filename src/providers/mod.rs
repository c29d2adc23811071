mod retry;
mod toolkit;

pub use retry::RetryingProvider;
pub use toolkit::ToolkitProvider;

use crate::error::NourishError;
use crate::prompts::ChatMessage;
use async_trait::async_trait;

/// A completion service that turns chat messages into a raw response.
///
/// The parsers never depend on this trait; it only feeds them text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Get the provider name (e.g., "toolkit")
    fn provider_name(&self) -> &str;

    /// Send the messages and return the unparsed completion text
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, NourishError>;
}
