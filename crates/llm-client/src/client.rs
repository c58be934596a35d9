use crate::error::{LlmError, Result};
use crate::types::{ChatMessage, ChatRequest, ChatResponse, Role};
use crate::Completion;
use reqwest::blocking::Client;
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_TOKENS: u32 = 2048;
pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub const SYSTEM_PROMPT: &str = "You are an expert software engineering assistant.";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(180);

// ---------------------------------------------------------------------------
// Settings
// ---------------------------------------------------------------------------

/// Values from a project config file. The environment wins over these.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LlmOverrides {
    pub model: Option<String>,
    pub max_tokens: Option<u32>,
    pub temperature: Option<f32>,
    pub base_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LlmSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub base_url: String,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl LlmSettings {
    pub fn from_env() -> Result<Self> {
        Self::resolve(&LlmOverrides::default(), |k| std::env::var(k).ok())
    }

    pub fn from_env_over(file: &LlmOverrides) -> Result<Self> {
        Self::resolve(file, |k| std::env::var(k).ok())
    }

    /// Environment (via `lookup`), then `file`, then built-in defaults.
    /// Blank environment values count as unset.
    pub fn resolve(file: &LlmOverrides, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = LlmSettings::default();

        let max_tokens = match env("OPENAI_MAX_TOKENS") {
            Some(v) => parse_setting("OPENAI_MAX_TOKENS", &v)?,
            None => file.max_tokens.unwrap_or(defaults.max_tokens),
        };
        let temperature = match env("OPENAI_TEMPERATURE") {
            Some(v) => parse_setting("OPENAI_TEMPERATURE", &v)?,
            None => file.temperature.unwrap_or(defaults.temperature),
        };

        Ok(LlmSettings {
            api_key: env("OPENAI_API_KEY"),
            model: env("OPENAI_MODEL")
                .or_else(|| file.model.clone())
                .unwrap_or(defaults.model),
            max_tokens,
            temperature,
            base_url: env("OPENAI_BASE_URL")
                .or_else(|| file.base_url.clone())
                .unwrap_or(defaults.base_url),
        })
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

fn parse_setting<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| LlmError::InvalidSetting {
        name,
        value: value.to_string(),
    })
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

pub struct OpenAiClient {
    settings: LlmSettings,
    http: Client,
}

impl OpenAiClient {
    pub fn new(settings: LlmSettings) -> Result<Self> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { settings, http })
    }

    pub fn settings(&self) -> &LlmSettings {
        &self.settings
    }
}

impl Completion for OpenAiClient {
    fn complete(&self, prompt: &str, max_tokens: Option<u32>) -> Result<String> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(LlmError::MissingApiKey)?;

        let request = ChatRequest {
            model: &self.settings.model,
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: Role::User,
                    content: prompt,
                },
            ],
            max_tokens: max_tokens.unwrap_or(self.settings.max_tokens),
            temperature: self.settings.temperature,
        };

        tracing::debug!(
            model = %request.model,
            max_tokens = request.max_tokens,
            prompt_chars = prompt.len(),
            "sending completion request"
        );

        let resp = self
            .http
            .post(self.settings.completions_url())
            .bearer_auth(api_key)
            .json(&request)
            .send()?;

        let status = resp.status();
        let body = resp.text()?;
        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = serde_json::from_str(&body)?;
        let text = parsed.first_text().ok_or(LlmError::EmptyResponse)?;
        tracing::debug!(chars = text.len(), "completion received");
        Ok(text.to_string())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    fn settings_for(url: &str, key: Option<&str>) -> LlmSettings {
        LlmSettings {
            api_key: key.map(str::to_string),
            base_url: url.to_string(),
            ..LlmSettings::default()
        }
    }

    #[test]
    fn defaults_when_nothing_set() {
        let s = LlmSettings::resolve(&LlmOverrides::default(), lookup(&[])).unwrap();
        assert_eq!(s, LlmSettings::default());
        assert_eq!(s.model, "gpt-3.5-turbo");
        assert_eq!(s.max_tokens, 2048);
    }

    #[test]
    fn env_beats_file_beats_default() {
        let file = LlmOverrides {
            model: Some("file-model".to_string()),
            max_tokens: Some(1000),
            temperature: None,
            base_url: Some("http://file".to_string()),
        };
        let s = LlmSettings::resolve(
            &file,
            lookup(&[("OPENAI_MODEL", "env-model"), ("OPENAI_TEMPERATURE", "0.2")]),
        )
        .unwrap();
        assert_eq!(s.model, "env-model");
        assert_eq!(s.max_tokens, 1000);
        assert_eq!(s.temperature, 0.2);
        assert_eq!(s.base_url, "http://file");
    }

    #[test]
    fn malformed_number_is_an_error() {
        let err = LlmSettings::resolve(
            &LlmOverrides::default(),
            lookup(&[("OPENAI_MAX_TOKENS", "lots")]),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            LlmError::InvalidSetting {
                name: "OPENAI_MAX_TOKENS",
                ..
            }
        ));
    }

    #[test]
    fn blank_key_counts_as_missing() {
        let s = LlmSettings::resolve(&LlmOverrides::default(), lookup(&[("OPENAI_API_KEY", " ")]))
            .unwrap();
        assert_eq!(s.api_key, None);
    }

    #[test]
    fn url_joins_without_double_slash() {
        let s = settings_for("http://localhost:1/v1/", None);
        assert_eq!(s.completions_url(), "http://localhost:1/v1/chat/completions");
    }

    #[test]
    fn missing_key_fails_before_request() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/chat/completions")
            .expect(0)
            .create();
        let client = OpenAiClient::new(settings_for(&server.url(), None)).unwrap();
        assert!(matches!(
            client.complete("hi", None),
            Err(LlmError::MissingApiKey)
        ));
        mock.assert();
    }

    #[test]
    fn returns_trimmed_first_choice() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/chat/completions")
            .match_header("authorization", "Bearer sk-test")
            .match_body(Matcher::PartialJsonString(
                r#"{"model":"gpt-3.5-turbo","max_tokens":3072,"messages":[{"role":"system","content":"You are an expert software engineering assistant."},{"role":"user","content":"plan it"}]}"#
                    .to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r##"{"choices":[{"message":{"role":"assistant","content":"\n# Plan\n"}}]}"##)
            .create();

        let client = OpenAiClient::new(settings_for(&server.url(), Some("sk-test"))).unwrap();
        assert_eq!(client.complete("plan it", Some(3072)).unwrap(), "# Plan");
        mock.assert();
    }

    #[test]
    fn non_success_status_is_typed() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/chat/completions")
            .with_status(401)
            .with_body("bad key")
            .create();
        let client = OpenAiClient::new(settings_for(&server.url(), Some("k"))).unwrap();
        match client.complete("x", None) {
            Err(LlmError::Status { status, body }) => {
                assert_eq!(status, 401);
                assert_eq!(body, "bad key");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn garbage_and_empty_bodies() {
        let mut server = mockito::Server::new();
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body("not json")
            .create();
        let client = OpenAiClient::new(settings_for(&server.url(), Some("k"))).unwrap();
        assert!(matches!(client.complete("x", None), Err(LlmError::Decode(_))));

        let mut server = mockito::Server::new();
        server
            .mock("POST", "/chat/completions")
            .with_status(200)
            .with_body(r#"{"choices":[]}"#)
            .create();
        let client = OpenAiClient::new(settings_for(&server.url(), Some("k"))).unwrap();
        assert!(matches!(
            client.complete("x", None),
            Err(LlmError::EmptyResponse)
        ));
    }
}
