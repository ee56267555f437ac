// Content generator backed by the Gemini `generateContent` REST endpoint.
// The call is blocking and made exactly once per run; there is no retry.
// Any failure comes back as a `GenerationError` so the caller can stop
// before anything is published.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

/// Public Gemini API host.
pub const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

/// Model used when none is given on the command line.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Anything that turns a seed sentence into blog content.
pub trait ContentGenerator {
    fn generate(&self, sentence: &str) -> Result<String, GenerationError>;
}

/// Failures of the generation step. All of them are fatal for the run.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("failed to reach the LLM service: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("LLM service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("could not decode LLM response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("LLM response contained no text")]
    EmptyResponse,

    #[error("invalid LLM API key: {0}")]
    InvalidKey(#[source] reqwest::header::InvalidHeaderValue),
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize, Debug)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ErrorEnvelope {
    error: ErrorDetail,
}

#[derive(Deserialize, Debug)]
struct ErrorDetail {
    message: String,
}

/// Blocking Gemini client holding the key for the duration of one run.
pub struct GeminiGenerator {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiGenerator {
    /// Client for the public Gemini API.
    pub fn new(api_key: &str, model: &str) -> Result<Self, GenerationError> {
        Self::with_endpoint(DEFAULT_ENDPOINT, api_key, model)
    }

    /// Same as [`GeminiGenerator::new`] but against another host, e.g. a
    /// local gateway. Proxy settings from the environment are ignored.
    pub fn with_endpoint(endpoint: &str, api_key: &str, model: &str) -> Result<Self, GenerationError> {
        let client = Client::builder().no_proxy().build()?;
        Ok(Self::from_client(client, endpoint, api_key, model))
    }

    /// Use an already configured reqwest client.
    pub fn from_client(client: Client, endpoint: &str, api_key: &str, model: &str) -> Self {
        GeminiGenerator {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.to_string(),
        }
    }

    fn url(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.endpoint, self.model)
    }

    fn headers(&self) -> Result<HeaderMap, GenerationError> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(&self.api_key).map_err(GenerationError::InvalidKey)?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);
        Ok(headers)
    }
}

impl ContentGenerator for GeminiGenerator {
    fn generate(&self, sentence: &str) -> Result<String, GenerationError> {
        let body = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: sentence }],
            }],
        };

        debug!(model = %self.model, prompt_len = sentence.len(), "requesting content");
        let res = self
            .client
            .post(self.url())
            .headers(self.headers()?)
            .json(&body)
            .send()?;

        let status = res.status();
        let txt = res.text()?;
        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&txt)
                .map(|e| e.error.message)
                .unwrap_or(txt);
            warn!(status = status.as_u16(), "content generation rejected");
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&txt).map_err(GenerationError::Decode)?;
        let text = extract_text(parsed).ok_or(GenerationError::EmptyResponse)?;
        debug!(content_len = text.len(), "content generated");
        Ok(text)
    }
}

/// Join the text parts of the first candidate. `None` when there is nothing.
fn extract_text(response: GenerateResponse) -> Option<String> {
    let content = response.candidates.into_iter().next()?.content?;
    let texts: Vec<String> = content.parts.into_iter().filter_map(|p| p.text).collect();
    if texts.is_empty() {
        None
    } else {
        Some(texts.concat())
    }
}
