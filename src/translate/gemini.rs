use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::interface::{TranslateError, TranslatorInterface};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

/// Google Gemini `generateContent` client.
pub struct GeminiTranslator {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
    temperature: Option<f32>,
}

impl GeminiTranslator {
    pub fn new(
        client: Client,
        base_url: String,
        model: String,
        api_key: String,
        temperature: Option<f32>,
    ) -> Self {
        info!("Initialized GeminiTranslator: model={}, base_url={}", model, base_url);
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model,
            api_key,
            temperature,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }
}

#[async_trait]
impl TranslatorInterface for GeminiTranslator {
    async fn generate(&self, prompt: &str) -> Result<String, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::MissingApiKey);
        }

        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: self.temperature.map(|temperature| GenerationConfig { temperature }),
        };

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(TranslateError::Status { status, body });
        }

        let response: GenerateContentResponse = response.json().await?;

        if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
            return Err(TranslateError::Blocked(reason));
        }

        let parts = response
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts)
            .filter(|parts| !parts.is_empty())
            .ok_or(TranslateError::EmptyResponse)?;

        let text: String = parts.into_iter().map(|part| part.text).collect();

        debug!("Gemini returned {} bytes", text.len());
        Ok(text)
    }

    fn provider(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> &str {
        &self.model
    }
}
