use crate::core::AppConfig;
use crate::relay::ChatRelay;

/// Shared by every request. Nothing in here changes after startup so
/// it can be read without locking.
pub struct AppState {
    pub relay: ChatRelay,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(relay: ChatRelay, config: AppConfig) -> Self {
        Self { relay, config }
    }

    /// State backed by the OpenAI compatible API from `config`
    pub fn from_config(config: AppConfig) -> Self {
        let relay = ChatRelay::from_config(&config);
        Self::new(relay, config)
    }
}
