// SPDX-License-Identifier: PMPL-1.0-or-later

//! Translation client adapter
//!
//! The pipeline only needs "send a prompt, get text back", expressed by the
//! [`Translator`] trait. [`ChatCompletionClient`] implements it against an
//! OpenAI-compatible `/chat/completions` endpoint using a blocking HTTP client,
//! so exactly one request is in flight at a time.

use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{var} not found in environment variables")]
    MissingCredential { var: String },
    #[error("HTTP client unavailable: {0}")]
    Backend(String),
    #[error("invalid endpoint '{url}': {reason}")]
    InvalidEndpoint { url: String, reason: String },
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("translation API returned {status}: {body}")]
    Api { status: u16, body: String },
    #[error("empty response from translation API")]
    EmptyResponse,
    #[error("malformed response from translation API: {0}")]
    MalformedResponse(String),
}

/// Something that turns a rendered prompt into translated text.
pub trait Translator {
    /// Returns the model's reply, trimmed and never blank.
    fn complete(&self, prompt: &str) -> Result<String, ClientError>;
}

impl<T: Translator + ?Sized> Translator for &T {
    fn complete(&self, prompt: &str) -> Result<String, ClientError> {
        (**self).complete(prompt)
    }
}

impl<T: Translator + ?Sized> Translator for Box<T> {
    fn complete(&self, prompt: &str) -> Result<String, ClientError> {
        (**self).complete(prompt)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub base_url: String,
    pub model: String,
    /// Kept low to bias towards literal translation.
    pub temperature: f64,
    /// Name of the environment variable holding the bearer token.
    pub api_key_env: String,
    /// `None` leaves requests without a timeout.
    pub request_timeout_secs: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.deepseek.com".to_string(),
            model: "deepseek-chat".to_string(),
            temperature: 0.3,
            api_key_env: "DEEPSEEK_API_KEY".to_string(),
            request_timeout_secs: None,
        }
    }
}

impl ClientConfig {
    pub fn endpoint(&self) -> Result<Url, ClientError> {
        let raw = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        Url::parse(&raw).map_err(|e| ClientError::InvalidEndpoint {
            url: raw.clone(),
            reason: e.to_string(),
        })
    }

    /// Look up the credential through `lookup`, treating blank values as absent.
    pub fn resolve_credential<F>(&self, lookup: F) -> Result<String, ClientError>
    where
        F: FnOnce(&str) -> Option<String>,
    {
        lookup(&self.api_key_env)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or_else(|| ClientError::MissingCredential {
                var: self.api_key_env.clone(),
            })
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: Option<ChatChoiceMessage>,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<serde_json::Value>,
}

pub struct ChatCompletionClient {
    http: Client,
    endpoint: Url,
    api_key: String,
    model: String,
    temperature: f64,
}

impl ChatCompletionClient {
    /// Build a client whose credential comes from the process environment.
    pub fn from_env(config: &ClientConfig) -> Result<Self, ClientError> {
        let api_key = config.resolve_credential(|var| env::var(var).ok())?;
        Self::new(config, api_key)
    }

    pub fn new(config: &ClientConfig, api_key: String) -> Result<Self, ClientError> {
        let endpoint = config.endpoint()?;
        let http = Client::builder()
            .timeout(config.request_timeout_secs.map(Duration::from_secs))
            .build()
            .map_err(|e| ClientError::Backend(e.to_string()))?;

        Ok(Self {
            http,
            endpoint,
            api_key,
            model: config.model.clone(),
            temperature: config.temperature,
        })
    }
}

impl Translator for ChatCompletionClient {
    fn complete(&self, prompt: &str) -> Result<String, ClientError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(ClientError::Api {
                status: status.as_u16(),
                body,
            });
        }

        extract_content(&body)
    }
}

/// Pull the first choice's message text out of a chat-completion body.
fn extract_content(body: &str) -> Result<String, ClientError> {
    let parsed: ChatResponse =
        serde_json::from_str(body).map_err(|e| ClientError::MalformedResponse(e.to_string()))?;

    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message)
        .and_then(|message| message.content);

    match content {
        Some(serde_json::Value::String(text)) if !text.trim().is_empty() => {
            Ok(text.trim().to_string())
        }
        _ => Err(ClientError::EmptyResponse),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn client_at(base_url: String) -> ChatCompletionClient {
        let config = ClientConfig {
            base_url,
            ..ClientConfig::default()
        };
        ChatCompletionClient::new(&config, "sekrit".to_string()).unwrap()
    }

    #[test]
    fn complete_posts_prompt_with_bearer_auth() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sekrit")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({
                "model": "deepseek-chat",
                "messages": [{"role": "user", "content": "translate me"}],
                "temperature": 0.3
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"content":"\n---\nt: x\n---\nbody\n"}}]}"#)
            .create();

        let reply = client_at(server.url()).complete("translate me").unwrap();
        assert_eq!(reply, "---\nt: x\n---\nbody");
        mock.assert();
    }

    #[test]
    fn error_status_maps_to_api_error() {
        let mut server = Server::new();
        let mock = server
            .mock("POST", "/chat/completions")
            .with_status(500)
            .with_body(r#"{"error":"x"}"#)
            .create();

        let err = client_at(server.url()).complete("hi").unwrap_err();
        match &err {
            ClientError::Api { status, body } => {
                assert_eq!(*status, 500);
                assert_eq!(body, r#"{"error":"x"}"#);
            }
            other => panic!("expected Api error, got {:?}", other),
        }
        assert_eq!(err.to_string(), r#"translation API returned 500: {"error":"x"}"#);
        mock.assert();
    }

    #[test]
    fn blank_content_from_server_is_empty_response() {
        let mut server = Server::new();
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[{"message":{"content":"  \n"}}]}"#)
            .create();

        let result = client_at(server.url()).complete("hi");
        assert!(matches!(result, Err(ClientError::EmptyResponse)));
    }

    #[test]
    fn unreachable_server_is_transport_error() {
        // Nothing listens on port 1.
        let result = client_at("http://127.0.0.1:1".to_string()).complete("hi");
        assert!(matches!(result, Err(ClientError::Transport(_))));
    }

    #[test]
    fn extracts_trimmed_first_choice() {
        let body = r#"{"choices":[{"message":{"role":"assistant","content":"\n---\ntitle: x\n---\nbody  \n"}},{"message":{"content":"second"}}]}"#;
        assert_eq!(extract_content(body).unwrap(), "---\ntitle: x\n---\nbody");
    }

    #[test]
    fn blank_or_missing_content_is_empty_response() {
        for body in [
            r#"{"choices":[]}"#,
            r#"{}"#,
            r#"{"choices":[{"message":{"content":"   \n"}}]}"#,
            r#"{"choices":[{"message":{"content":null}}]}"#,
            r#"{"choices":[{"message":{"content":42}}]}"#,
            r#"{"choices":[{}]}"#,
        ] {
            assert!(
                matches!(extract_content(body), Err(ClientError::EmptyResponse)),
                "expected empty response for {}",
                body
            );
        }
    }

    #[test]
    fn non_json_body_is_malformed() {
        assert!(matches!(
            extract_content("<html>bad gateway</html>"),
            Err(ClientError::MalformedResponse(_))
        ));
    }

    #[test]
    fn missing_credential_names_the_variable() {
        let config = ClientConfig::default();
        let err = config.resolve_credential(|_| None).unwrap_err();
        assert!(matches!(err, ClientError::MissingCredential { .. }));
        assert_eq!(
            err.to_string(),
            "DEEPSEEK_API_KEY not found in environment variables"
        );

        let blank = config.resolve_credential(|_| Some("  ".to_string()));
        assert!(blank.is_err());
    }

    #[test]
    fn credential_lookup_uses_configured_variable() {
        let config = ClientConfig {
            api_key_env: "MY_KEY".to_string(),
            ..ClientConfig::default()
        };
        let key = config
            .resolve_credential(|var| (var == "MY_KEY").then(|| "secret".to_string()))
            .unwrap();
        assert_eq!(key, "secret");
    }

    #[test]
    fn endpoint_appends_chat_completions_path() {
        let config = ClientConfig {
            base_url: "https://api.example.com/v1/".to_string(),
            ..ClientConfig::default()
        };
        assert_eq!(
            config.endpoint().unwrap().as_str(),
            "https://api.example.com/v1/chat/completions"
        );

        let broken = ClientConfig {
            base_url: "not a url".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(
            broken.endpoint(),
            Err(ClientError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn request_serialises_single_user_message() {
        let request = ChatRequest {
            model: "deepseek-chat",
            messages: vec![ChatMessage {
                role: "user",
                content: "hello",
            }],
            temperature: 0.3,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "deepseek-chat");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hello");
        assert_eq!(value["temperature"], 0.3);
    }
}
