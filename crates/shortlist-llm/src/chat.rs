use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use shortlist_core::config::LlmSettings;
use shortlist_core::traits::LanguageModel;
use shortlist_core::types::ChatMessage;
use shortlist_core::{Error, Result};
use tracing::{debug, warn};

/// Blocking client for OpenAI-compatible chat completions (Groq by default).
///
/// A call is attempted at most `1 + max_retries` times. Transport errors,
/// `429` and `5xx` responses are retried immediately; anything else fails
/// on the first attempt.
pub struct ChatClient {
    client: Client,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    max_retries: usize,
}

/// Outcome of a single HTTP attempt.
enum Attempt {
    Done(String),
    Retry(String),
    Fail(String),
}

impl ChatClient {
    pub fn new(api_key: &str, settings: &LlmSettings) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(Error::InvalidConfig("missing language model API key".into()));
        }
        if settings.model.trim().is_empty() {
            return Err(Error::InvalidConfig("missing language model name".into()));
        }
        let mut headers = HeaderMap::new();
        let auth = format!("Bearer {}", api_key.trim());
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth)
                .map_err(|_| Error::InvalidConfig("invalid language model API key".into()))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let mut builder = Client::builder().default_headers(headers);
        // reqwest's blocking client defaults to a 30s timeout; `None` means no deadline.
        builder = builder.timeout(settings.timeout_secs.map(Duration::from_secs));
        let client = builder
            .build()
            .map_err(|e| Error::InvalidConfig(format!("failed to build chat HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", settings.base_url.trim_end_matches('/')),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
            max_retries: settings.max_retries,
        })
    }

    fn attempt(&self, body: &ChatRequest<'_>) -> Attempt {
        let resp = match self.client.post(&self.endpoint).json(body).send() {
            Ok(resp) => resp,
            Err(e) => return Attempt::Retry(format!("chat request failed: {e}")),
        };
        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().unwrap_or_else(|_| "<body unavailable>".to_string());
            let msg = format!("chat endpoint returned {status}: {text}");
            return if is_retryable(status) {
                Attempt::Retry(msg)
            } else {
                Attempt::Fail(msg)
            };
        }
        let parsed: ChatResponse = match resp.json() {
            Ok(parsed) => parsed,
            Err(e) => return Attempt::Fail(format!("failed to parse chat response: {e}")),
        };
        let Some(choice) = parsed.choices.into_iter().next() else {
            return Attempt::Fail("chat response contained no choices".into());
        };
        match choice.message.content {
            Some(content) if !content.trim().is_empty() => Attempt::Done(content),
            _ => Attempt::Fail("chat response contained no content".into()),
        }
    }
}

fn is_retryable(status: StatusCode) -> bool {
    status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
}

impl LanguageModel for ChatClient {
    fn model_id(&self) -> &str {
        &self.model
    }

    fn complete(&self, messages: &[ChatMessage]) -> Result<String> {
        let body = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            messages: messages
                .iter()
                .map(|m| WireMessage { role: m.role.as_str(), content: &m.content })
                .collect(),
        };
        let attempts = self.max_retries + 1;
        let mut last_error = String::new();
        for n in 1..=attempts {
            debug!(attempt = n, model = %self.model, "requesting chat completion");
            match self.attempt(&body) {
                Attempt::Done(answer) => return Ok(answer),
                Attempt::Fail(msg) => return Err(Error::LanguageModel(msg)),
                Attempt::Retry(msg) => {
                    if n < attempts {
                        warn!(attempt = n, error = %msg, "chat completion failed, retrying");
                    }
                    last_error = msg;
                }
            }
        }
        Err(Error::LanguageModel(format!("giving up after {attempts} attempt(s): {last_error}")))
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
    messages: Vec<WireMessage<'a>>,
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_statuses() {
        assert!(is_retryable(StatusCode::TOO_MANY_REQUESTS));
        assert!(is_retryable(StatusCode::BAD_GATEWAY));
        assert!(!is_retryable(StatusCode::UNAUTHORIZED));
        assert!(!is_retryable(StatusCode::BAD_REQUEST));
    }

    #[test]
    fn max_tokens_omitted_when_unset() {
        let body = ChatRequest { model: "m", temperature: 0.5, max_tokens: None, messages: vec![] };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("max_tokens").is_none());
        assert_eq!(json["model"], "m");
    }

    #[test]
    fn blank_key_is_invalid_config() {
        let err = ChatClient::new("  ", &LlmSettings::default()).err().unwrap();
        assert!(matches!(err, Error::InvalidConfig(_)));
    }
}
