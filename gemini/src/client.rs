use crate::error::GeminiError;
use crate::error::Result;
use log::debug;
use serde::Deserialize;
use serde::Serialize;
use std::time::Duration;

const DEFAULT_MODEL: &str = "gemini-flash-latest";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Connection settings for the Gemini API.
///
/// The key is optional on purpose: a deployment without one still serves
/// requests, it just cannot produce generated summaries.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GeminiConfig {
    /// Defaults overlaid with `GEMINI_API_KEY`, `GEMINI_MODEL` and
    /// `GEMINI_BASE_URL`. Blank values count as unset.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(api_key) = env_non_empty("GEMINI_API_KEY") {
            config.api_key = Some(api_key);
        }
        if let Some(model) = env_non_empty("GEMINI_MODEL") {
            config.model = model;
        }
        if let Some(base_url) = env_non_empty("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }
        config
    }
}

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Single-shot text completion client. One attempt per call, no retries; a
/// failure of any kind is reported as a [`GeminiError`] for the caller's
/// fallback policy to absorb.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { config, http })
    }

    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env())
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Request a completion for `prompt` and return the generated text.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let Some(api_key) = self.config.api_key.as_deref() else {
            return Err(GeminiError::Unconfigured);
        };
        // Accept SDK-style names such as "models/gemini-flash-latest"; the
        // REST path already carries the "models/" segment.
        let model = self
            .config
            .model
            .strip_prefix("models/")
            .unwrap_or(&self.config.model);
        let url = format!(
            "{}/v1beta/models/{model}:generateContent",
            self.config.base_url.trim_end_matches('/')
        );
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };
        debug!("requesting completion from {model} ({} chars)", prompt.len());
        let response = self
            .http
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await
            .map_err(request_error)?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(GeminiError::Status { status, body });
        }
        let payload: GenerateContentResponse = response.json().await.map_err(request_error)?;
        payload.into_text().ok_or(GeminiError::EmptyResponse)
    }
}

fn request_error(err: reqwest::Error) -> GeminiError {
    if err.is_timeout() {
        GeminiError::Timeout
    } else {
        GeminiError::Request(err)
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
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
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated part text of the first candidate that carries any;
    /// `None` when every candidate is empty.
    fn into_text(self) -> Option<String> {
        self.candidates.into_iter().find_map(|candidate| {
            let parts = candidate.content?.parts;
            let text: String = parts.into_iter().filter_map(|part| part.text).collect();
            if text.trim().is_empty() { None } else { Some(text) }
        })
    }
}
