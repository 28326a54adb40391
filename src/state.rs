// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::assistant::Assistant;
use crate::services::groq_client::GroqClient;
use crate::services::knowledge::KNOWLEDGE;

pub type SharedState = Arc<AppState>;

/// Everything a handler needs. Built once at startup and never mutated.
pub struct AppState {
    pub config: Config,
    pub assistant: Assistant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let http = reqwest::Client::new();
        let groq = GroqClient::from_config(http, &config);
        let assistant = Assistant::new(groq, &KNOWLEDGE, config.fallback_enabled);
        Self { config, assistant }
    }

    pub fn shared(config: Config) -> SharedState {
        Arc::new(Self::new(config))
    }
}
