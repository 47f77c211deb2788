//! Relays a client conversation to the language model.
//!
//! A relay call is stateless: validate the payload, keep only the
//! most recent part of the history, put the system message in front
//! and ask the provider for the next reply. Nothing is stored between
//! calls.

mod error;
mod validate;
mod window;

use std::sync::Arc;

pub use self::error::RelayError;
pub use self::validate::parse_conversation;
pub use self::window::{outbound_conversation, trailing_window};

use crate::core::AppConfig;
use crate::openai::{CompletionProvider, OpenAiClient};

#[derive(Clone)]
pub struct ChatRelay {
    model: String,
    system_message: String,
    history_window: usize,
    // `None` when the server has no API key configured
    provider: Option<Arc<dyn CompletionProvider>>,
}

impl ChatRelay {
    pub fn new(config: &AppConfig, provider: Option<Arc<dyn CompletionProvider>>) -> Self {
        Self {
            model: config.openai_model.clone(),
            system_message: config.system_message.clone(),
            history_window: config.history_window,
            provider,
        }
    }

    /// Create a relay that talks to the OpenAI compatible API
    /// described by `config`.
    pub fn from_config(config: &AppConfig) -> Self {
        let provider = OpenAiClient::from_config(config)
            .map(|client| Arc::new(client) as Arc<dyn CompletionProvider>);
        Self::new(config, provider)
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    /// Handle a single chat request body and return the assistant's
    /// reply.
    ///
    /// A missing API key is reported before the body is even looked
    /// at. Provider failures are never propagated as is, they are
    /// always wrapped in `RelayError::ProviderFailure`.
    pub async fn handle_chat(&self, body: &[u8]) -> Result<String, RelayError> {
        let provider = self
            .provider
            .as_ref()
            .ok_or(RelayError::ServiceUnavailable)?;

        let history = parse_conversation(body)?;
        let conversation =
            outbound_conversation(&self.system_message, &history, self.history_window);

        tracing::debug!(
            "Relaying {} of {} messages to {}",
            conversation.len() - 1,
            history.len(),
            self.model
        );

        let reply = provider.complete(&self.model, &conversation).await?;
        Ok(reply)
    }
}
