use std::time::Duration;

use async_trait::async_trait;

use crate::core::AppConfig;
use crate::openai::{CompletionProvider, Message, ProviderError, completion};

/// Chat completion client for an OpenAI compatible API. Cheap to
/// clone, the underlying connection pool is shared.
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_hostname: String,
    api_key: String,
    timeout: Duration,
}

impl OpenAiClient {
    pub fn new(api_hostname: &str, api_key: &str, timeout: Duration) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_hostname: api_hostname.to_string(),
            api_key: api_key.to_string(),
            timeout,
        }
    }

    /// Returns `None` when no API key is configured since there is no
    /// point in talking to the API without one.
    pub fn from_config(config: &AppConfig) -> Option<Self> {
        config.openai_api_key.as_ref().map(|api_key| {
            Self::new(&config.openai_api_hostname, api_key, config.request_timeout)
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiClient {
    async fn complete(&self, model: &str, messages: &[Message]) -> Result<String, ProviderError> {
        tracing::debug!(
            "Requesting completion from {} with {} messages",
            self.api_hostname,
            messages.len()
        );
        completion(
            &self.http,
            messages,
            &self.api_hostname,
            &self.api_key,
            model,
            self.timeout,
        )
        .await
    }
}
