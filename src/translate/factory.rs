use std::sync::Arc;

use anyhow::Result;
use reqwest::Client;
use tracing::{info, warn};

use super::gemini::GeminiTranslator;
use super::interface::TranslatorInterface;
use crate::config::TranslatorConfig;

/// Factory for creating translator instances
pub struct TranslatorFactory;

impl TranslatorFactory {
    /// Create a translator for the configured provider, sharing `client` for all calls.
    pub fn create_translator(
        config: &TranslatorConfig,
        client: Client,
    ) -> Result<Arc<dyn TranslatorInterface>> {
        info!("Initializing translator: {}", config.provider);

        let api_key = if config.api_key_missing() {
            warn!("No API key configured; every translation will return the fallback message");
            String::new()
        } else {
            config.api_key.trim().to_string()
        };

        match config.provider.as_str() {
            "gemini" | "gemini_llm" => Ok(Arc::new(GeminiTranslator::new(
                client,
                config.base_url.clone(),
                config.model.clone(),
                api_key,
                config.temperature,
            ))),
            _ => Err(anyhow::anyhow!("Unsupported translator provider: {}", config.provider)),
        }
    }
}
