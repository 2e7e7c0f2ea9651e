use std::time::Duration;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::time::timeout;

use crate::config::AppConfig;

pub const MODEL: &str = "gpt-3.5-turbo";
pub const ROLE_USER: &str = "user";

#[derive(Debug)]
pub enum Completion {
    Answer(Option<String>),
    ProviderError(ProviderError),
    Malformed(Value),
    Unknown(TransportError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderError {
    pub status: StatusCode,
    pub message: String,
    pub code: Option<String>,
    pub kind: Option<String>,
}

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("upstream request timed out after {0:?}")]
    Timeout(Duration),
    #[error("upstream request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("upstream returned a non-JSON body: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    code: Option<Value>,
}

pub struct CompletionClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    timeout: Duration,
}

impl CompletionClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            api_key,
            timeout,
        })
    }

    pub fn from_config(cfg: &AppConfig) -> Result<Self, reqwest::Error> {
        Self::new(
            &cfg.base_url,
            cfg.api_key.clone(),
            Duration::from_millis(cfg.timeout_ms),
        )
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub async fn complete(&self, prompt: &str) -> Completion {
        match timeout(self.timeout, self.exchange(prompt)).await {
            Err(_) => Completion::Unknown(TransportError::Timeout(self.timeout)),
            Ok(Err(err)) => Completion::Unknown(err),
            Ok(Ok(completion)) => completion,
        }
    }

    async fn exchange(&self, prompt: &str) -> Result<Completion, TransportError> {
        let payload = ChatCompletionRequest {
            model: MODEL,
            messages: [ChatMessage {
                role: ROLE_USER,
                content: prompt,
            }],
        };

        let mut request = self.http.post(&self.endpoint).json(&payload);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        classify(status, &body)
    }
}

// A 2xx body that is not JSON at all counts as a transport failure.
pub fn classify(status: StatusCode, body: &[u8]) -> Result<Completion, TransportError> {
    if !status.is_success() {
        return Ok(Completion::ProviderError(provider_error(status, body)));
    }

    let raw: Value = serde_json::from_slice(body)?;
    match first_answer(&raw) {
        Some(answer) => Ok(Completion::Answer(answer)),
        None => Ok(Completion::Malformed(raw)),
    }
}

fn first_answer(raw: &Value) -> Option<Option<String>> {
    let parsed = ChatCompletionResponse::deserialize(raw).ok()?;
    let message = parsed.choices.into_iter().next()?.message?;
    Some(message.content)
}

fn provider_error(status: StatusCode, body: &[u8]) -> ProviderError {
    if let Ok(ErrorEnvelope { error }) = serde_json::from_slice::<ErrorEnvelope>(body) {
        let message = error
            .message
            .unwrap_or_else(|| format!("{} status code", status.as_u16()));
        return ProviderError {
            status,
            message,
            code: error.code.and_then(code_to_string),
            kind: error.kind,
        };
    }

    let text = String::from_utf8_lossy(body).trim().to_string();
    let message = if text.is_empty() {
        format!("{} status code (no body)", status.as_u16())
    } else {
        text
    };

    ProviderError {
        status,
        message,
        code: None,
        kind: None,
    }
}

fn code_to_string(code: Value) -> Option<String> {
    match code {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
