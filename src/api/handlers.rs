use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde_json::Value;

use crate::error::{RelayError, Result};
use crate::upstream::Completion;
use crate::AppState;

use super::models::{AskRequest, AskResponse};

pub async fn ask(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Json<AskResponse>> {
    let request = match payload {
        Ok(Json(body)) => AskRequest::from_body(&body),
        Err(rejection) if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            tracing::warn!(%rejection, "oversized /ask body");
            return Err(RelayError::PayloadTooLarge);
        }
        Err(rejection) => {
            tracing::debug!(%rejection, "unreadable /ask body");
            AskRequest::default()
        }
    };

    let Some(prompt) = request.prompt() else {
        return Err(RelayError::MissingPrompt);
    };

    match state.client.complete(prompt).await {
        Completion::Answer(answer) => {
            if answer.is_none() {
                tracing::warn!("OpenAI returned a message without content");
            }
            Ok(Json(AskResponse { answer }))
        }
        Completion::Malformed(raw) => {
            tracing::error!(response = %raw, "OpenAI response format unexpected");
            Err(RelayError::MalformedResponse)
        }
        Completion::ProviderError(err) => {
            tracing::error!(
                status = err.status.as_u16(),
                details = %err.message,
                code = ?err.code,
                kind = ?err.kind,
                "error calling OpenAI API"
            );
            Err(RelayError::Provider {
                status: err.status,
                message: err.message,
                code: err.code,
            })
        }
        Completion::Unknown(err) => {
            tracing::error!(error = ?err, "non-OpenAI error while calling OpenAI API");
            Err(RelayError::Internal)
        }
    }
}

pub async fn not_found() -> RelayError {
    RelayError::NotFound
}
