use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Body posted by the page for every finalized transcript.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TranslateRequest {
    #[serde(default)]
    pub text: String,
    #[serde(default, rename = "sourceLang")]
    pub source_lang: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateResponse {
    pub translation: String,
}

#[derive(Debug, Error)]
pub enum TranslateError {
    #[error("request to translation service failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("translation service returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("prompt was blocked by the translation service: {0}")]
    Blocked(String),
    #[error("translation service returned no text")]
    EmptyResponse,
    #[error("no API key configured for the translation service")]
    MissingApiKey,
}

/// A hosted generative model that turns a prompt into text.
#[async_trait]
pub trait TranslatorInterface: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, TranslateError>;

    fn provider(&self) -> &str;

    fn model(&self) -> &str;
}
