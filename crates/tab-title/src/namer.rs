//! Title generation through the Anthropic Messages API.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub const FALLBACK_TITLE: &str = "Claude Code";
pub const DEFAULT_MODEL: &str = "claude-3-5-haiku-latest";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";

const ANTHROPIC_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 30;
const MAX_PROMPT_CHARS: usize = 500;
const MAX_TITLE_CHARS: usize = 40;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const INSTRUCTION: &str = "Extract the project name from this message. \
Output ONLY the project name (2-4 words max), nothing else. \
If no clear project is mentioned, output 'Claude Code'.";

#[derive(Debug, Error)]
pub enum NamerError {
    #[error("ANTHROPIC_API_KEY is not set")]
    MissingApiKey,

    #[error("invalid API key header: {0}")]
    InvalidApiKey(#[from] reqwest::header::InvalidHeaderValue),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    #[error("reply contained no usable text")]
    EmptyReply,
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [UserMessage; 1],
}

#[derive(Debug, Serialize)]
struct UserMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentBlock {
    Text {
        text: String,
    },
    #[serde(other)]
    Other,
}

// ── Namer ───────────────────────────────────────────────────────────

pub struct TitleNamer {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
}

impl TitleNamer {
    pub fn new(
        api_key: Option<SecretString>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, NamerError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_key,
            base_url: base_url.into(),
            model: model.into(),
        })
    }

    /// Title for `prompt`, or [`FALLBACK_TITLE`] if anything goes wrong.
    pub async fn title_for(&self, prompt: &str) -> String {
        match self.request_title(prompt).await {
            Ok(title) => title,
            Err(NamerError::MissingApiKey) => {
                debug!("no API key, using fallback title");
                FALLBACK_TITLE.to_owned()
            }
            Err(e) => {
                warn!(error = %e, "title request failed, using fallback");
                FALLBACK_TITLE.to_owned()
            }
        }
    }

    async fn request_title(&self, prompt: &str) -> Result<String, NamerError> {
        let api_key = self
            .api_key
            .as_ref()
            .filter(|k| !k.expose_secret().trim().is_empty())
            .ok_or(NamerError::MissingApiKey)?;

        let mut headers = HeaderMap::new();
        headers.insert("x-api-key", HeaderValue::from_str(api_key.expose_secret())?);
        headers.insert("anthropic-version", HeaderValue::from_static(ANTHROPIC_VERSION));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: [UserMessage {
                role: "user",
                content: format!("{INSTRUCTION}\n\n{}", truncate_chars(prompt, MAX_PROMPT_CHARS)),
            }],
        };

        let url = format!("{}/messages", self.base_url.trim_end_matches('/'));
        debug!(%url, model = %self.model, "requesting title");

        let resp = self
            .client
            .post(url)
            .headers(headers)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(NamerError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let reply: MessagesResponse = resp.json().await?;
        reply
            .content
            .into_iter()
            .find_map(|block| match block {
                ContentBlock::Text { text } => clean_title(&text),
                ContentBlock::Other => None,
            })
            .ok_or(NamerError::EmptyReply)
    }
}

/// First `max` characters of `s`, on a char boundary.
pub fn truncate_chars(s: &str, max: usize) -> &str {
    s.char_indices().nth(max).map_or(s, |(idx, _)| &s[..idx])
}

/// Trim whitespace and surrounding quotes, cap the length.
pub fn clean_title(raw: &str) -> Option<String> {
    let trimmed = raw
        .trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '`' | '“' | '”'))
        .trim();
    let capped = truncate_chars(trimmed, MAX_TITLE_CHARS).trim_end();
    (!capped.is_empty()).then(|| capped.to_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn namer(server: &MockServer, key: Option<&str>) -> TitleNamer {
        TitleNamer::new(
            key.map(|k| SecretString::from(k.to_owned())),
            format!("{}/v1", server.uri()),
            "test-model",
        )
        .unwrap()
    }

    fn reply(text: &str) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_1",
            "type": "message",
            "role": "assistant",
            "content": [{ "type": "text", "text": text }]
        }))
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        assert_eq!(truncate_chars("héllo", 2), "hé");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("", 3), "");
    }

    #[test]
    fn titles_are_cleaned() {
        assert_eq!(clean_title("  \"Home Lab\"\n").unwrap(), "Home Lab");
        assert_eq!(clean_title("'homelab'").unwrap(), "homelab");
        assert!(clean_title("  \"\" ").is_none());

        let long = "x".repeat(60);
        assert_eq!(clean_title(&long).unwrap().chars().count(), 40);
    }

    #[tokio::test]
    async fn sends_expected_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/messages"))
            .and(header("x-api-key", "sk-test"))
            .and(header("anthropic-version", "2023-06-01"))
            .and(body_partial_json(json!({ "model": "test-model", "max_tokens": 30 })))
            .respond_with(reply("\"Network Tools\""))
            .expect(1)
            .mount(&server)
            .await;

        let title = namer(&server, Some("sk-test"))
            .title_for("help me with the network tools repo")
            .await;
        assert_eq!(title, "Network Tools");
    }

    #[tokio::test]
    async fn prompt_is_truncated() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(reply("Long"))
            .mount(&server)
            .await;

        let prompt = "p".repeat(2_000);
        namer(&server, Some("sk-test")).title_for(&prompt).await;

        let requests = server.received_requests().await.unwrap();
        let body: serde_json::Value = requests[0].body_json().unwrap();
        let content = body["messages"][0]["content"].as_str().unwrap();
        let (instruction, sent) = content.split_once("\n\n").unwrap();
        assert_eq!(instruction, INSTRUCTION);
        assert_eq!(sent.chars().count(), 500);
    }

    #[tokio::test]
    async fn failures_fall_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(529).set_body_string("overloaded"))
            .mount(&server)
            .await;
        assert_eq!(
            namer(&server, Some("sk-test")).title_for("x").await,
            FALLBACK_TITLE
        );
    }

    #[tokio::test]
    async fn empty_reply_falls_back() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(reply("   "))
            .mount(&server)
            .await;
        assert_eq!(
            namer(&server, Some("sk-test")).title_for("x").await,
            FALLBACK_TITLE
        );
    }

    #[tokio::test]
    async fn missing_key_makes_no_request() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(reply("nope"))
            .expect(0)
            .mount(&server)
            .await;
        assert_eq!(namer(&server, None).title_for("x").await, FALLBACK_TITLE);
        assert_eq!(namer(&server, Some("  ")).title_for("x").await, FALLBACK_TITLE);
    }
}
