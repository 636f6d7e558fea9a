//! Completion API client.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "claude-v1";

/// Default sampling temperature.
pub const DEFAULT_TEMPERATURE: f64 = 0.5;

/// Default response token limit.
pub const DEFAULT_MAX_TOKENS: u32 = 100;

/// Default completion endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.anthropic.com/v1/complete";

/// Default upstream timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings for the completion API.
///
/// Immutable after construction; shared across proxy requests.
#[derive(Debug, Clone)]
pub struct ChatSettings {
    /// API key sent with every request
    pub api_key: String,

    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f64,

    /// Maximum tokens to sample per completion
    pub max_tokens: u32,

    /// Completion endpoint URL
    pub endpoint: String,

    /// Bound on the whole upstream round trip
    pub timeout: Duration,
}

impl ChatSettings {
    /// Settings with stock defaults for everything but the key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Errors from the completion API.
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("Completion request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Completion API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Malformed completion response: {0}")]
    MalformedResponse(String),
}

/// A provider that turns a prompt into completion text.
///
/// The seam between the proxy route and the upstream vendor; tests swap in
/// mock implementations.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send a prompt and return the completion text verbatim.
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError>;
}

/// Completion client for the Anthropic text-completion API.
pub struct AnthropicClient {
    http: reqwest::Client,
    settings: ChatSettings,
}

impl AnthropicClient {
    /// Construct a client with a bounded request timeout.
    pub fn new(settings: ChatSettings) -> Result<Self, CompletionError> {
        let http = reqwest::Client::builder()
            .timeout(settings.timeout)
            .build()?;

        Ok(Self { http, settings })
    }
}

#[async_trait]
impl CompletionClient for AnthropicClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        #[derive(Serialize)]
        struct Req<'a> {
            prompt: &'a str,
            model: &'a str,
            max_tokens_to_sample: u32,
            temperature: f64,
        }
        #[derive(Deserialize)]
        struct Resp {
            completion: String,
        }

        let body = Req {
            prompt,
            model: &self.settings.model,
            max_tokens_to_sample: self.settings.max_tokens,
            temperature: self.settings.temperature,
        };

        tracing::debug!("Requesting completion from {}", self.settings.endpoint);

        let resp = self
            .http
            .post(&self.settings.endpoint)
            .header("x-api-key", &self.settings.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body: truncate(&body, 200),
            });
        }

        let data: Resp = resp
            .json()
            .await
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        Ok(data.completion)
    }
}

/// Bound the upstream body carried in an error message.
fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_apply_stock_defaults() {
        let settings = ChatSettings::new("sk-test");

        assert_eq!(settings.model, "claude-v1");
        assert_eq!(settings.temperature, 0.5);
        assert_eq!(settings.max_tokens, 100);
        assert_eq!(settings.timeout, Duration::from_secs(30));
    }

    #[test]
    fn truncates_on_char_boundary() {
        let s = "héllo wörld";
        let t = truncate(s, 2);

        assert!(t.starts_with('h'));
        assert!(t.ends_with("..."));
    }

    #[test]
    fn api_error_names_status() {
        let err = CompletionError::Api {
            status: 429,
            body: "rate limited".to_string(),
        };

        assert!(err.to_string().contains("429"));
        assert!(err.to_string().contains("rate limited"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let mut settings = ChatSettings::new("sk-test");
        // Nothing listens here; connection is refused immediately
        settings.endpoint = "http://127.0.0.1:1/v1/complete".to_string();
        settings.timeout = Duration::from_millis(500);

        let client = AnthropicClient::new(settings).unwrap();
        let result = client.complete("hello\n\nAssistant:").await;

        assert!(matches!(result, Err(CompletionError::Transport(_))));
    }
}
