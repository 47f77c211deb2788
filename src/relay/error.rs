use thiserror::Error;

use crate::openai::ProviderError;

/// Everything that can go wrong while relaying a chat. The `Display`
/// output is sent back to the client as is.
#[derive(Debug, Error)]
pub enum RelayError {
    #[error("API key not configured. Please set OPENAI_API_KEY on the server.")]
    ServiceUnavailable,
    #[error("Invalid payload. Please send a JSON object with a 'messages' field.")]
    InvalidPayload,
    #[error("Each message must be a dict with 'role' and 'content'.")]
    InvalidMessageFormat,
    #[error("There was an error communicating with the language model: {0}")]
    ProviderFailure(#[from] ProviderError),
}

impl RelayError {
    /// True when the caller sent something it needs to fix before
    /// trying again.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RelayError::InvalidPayload | RelayError::InvalidMessageFormat
        )
    }
}
