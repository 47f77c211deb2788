use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_OPENAI_API_HOSTNAME: &str = "https://api.openai.com";
pub const DEFAULT_HISTORY_WINDOW: usize = 10;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60 * 10;
pub const DEFAULT_STATIC_DIR: &str = "./web-ui";

/// Instruction prepended to every conversation sent to the model.
pub const SYSTEM_MESSAGE: &str = "You are a helpful assistant for ExampleCorp.\n\
You follow company policies, answer accurately, and maintain a polite, professional tone.\n\
If you don't know an answer, say you are unsure rather than guessing.";

/// Process wide configuration. Built once at startup and never
/// mutated afterwards.
#[derive(Clone, Debug)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub openai_api_hostname: String,
    pub openai_model: String,
    pub system_message: String,
    pub history_window: usize,
    pub request_timeout: Duration,
    pub static_dir: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            openai_api_hostname: DEFAULT_OPENAI_API_HOSTNAME.to_string(),
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            system_message: SYSTEM_MESSAGE.to_string(),
            history_window: DEFAULT_HISTORY_WINDOW,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            static_dir: DEFAULT_STATIC_DIR.to_string(),
        }
    }
}

impl AppConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup so the
    /// parsing rules can be exercised without touching the real
    /// environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        // An empty key is treated the same as a missing one
        let openai_api_key = lookup("OPENAI_API_KEY").filter(|k| !k.trim().is_empty());
        let openai_api_hostname =
            lookup("OPENAI_API_HOSTNAME").unwrap_or(defaults.openai_api_hostname);
        let openai_model = lookup("MODEL_NAME").unwrap_or(defaults.openai_model);
        let history_window = match lookup("HISTORY_LENGTH") {
            Some(val) => val
                .trim()
                .parse::<usize>()
                .with_context(|| format!("Invalid HISTORY_LENGTH: {}", val))?,
            None => defaults.history_window,
        };
        let request_timeout = match lookup("OPENAI_TIMEOUT_SECS") {
            Some(val) => Duration::from_secs(
                val.trim()
                    .parse::<u64>()
                    .with_context(|| format!("Invalid OPENAI_TIMEOUT_SECS: {}", val))?,
            ),
            None => defaults.request_timeout,
        };
        let static_dir = lookup("RELAY_STATIC_DIR").unwrap_or(defaults.static_dir);

        Ok(Self {
            openai_api_key,
            openai_api_hostname,
            openai_model,
            system_message: defaults.system_message,
            history_window,
            request_timeout,
            static_dir,
        })
    }
}
