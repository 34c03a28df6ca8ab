use axum::{extract::State, response::Html, Json};
use serde_json::{json, Value};
use tracing::{debug, info_span, warn, Instrument};

use crate::state::AppState;
use crate::translate::language::build_prompt;
use crate::translate::{TranslateRequest, TranslateResponse};

const INDEX_HTML: &str = include_str!("../static/index.html");

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Translate one finalized transcript. Model failures become the fallback message.
pub async fn translate(
    State(state): State<AppState>,
    Json(request): Json<TranslateRequest>,
) -> Json<TranslateResponse> {
    let request_id = uuid::Uuid::new_v4();
    let span = info_span!("translate", %request_id, source_lang = %request.source_lang);

    async move {
        let translator_config = &state.config.translator_config;
        let prompt = build_prompt(
            &request.text,
            &request.source_lang,
            &translator_config.target_language,
        );
        debug!("Prompt: {:?}", prompt);

        let translation = match state.translator.generate(&prompt).await {
            Ok(text) => text.trim().to_string(),
            Err(e) => {
                warn!("Error during translation: {}", e);
                translator_config.fallback_message.clone()
            }
        };

        Json(TranslateResponse { translation })
    }
    .instrument(span)
    .await
}

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "provider": state.translator.provider(),
        "model": state.translator.model(),
    }))
}
