//! Google Gemini `generateContent` client.
//!
//! Every AI call in the service goes through [`GeminiClient`] via the
//! [`AiClient`] trait, so tests swap it for a canned implementation.

use crate::domain::ai::AiClient;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, instrument, warn};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);
const MAX_RETRIES: u32 = 3;
const BASE_RETRY_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Error)]
pub enum AiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Gemini returned no text content")]
    EmptyContent,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() { None } else { Some(text) }
    }
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Result<Self, AiError> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            api_key,
            model,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/{}:generateContent", GEMINI_API_BASE, self.model)
    }

    /// Retries 429, 5xx and transport failures up to [`MAX_RETRIES`] times
    /// with exponential backoff (0.5s, 1s, 2s) plus up to 50% jitter.
    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    pub async fn generate_content(&self, prompt: &str) -> Result<String, AiError> {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };
        let client = self;
        let body = &body;
        with_retries(BASE_RETRY_DELAY, move || client.attempt(body)).await
    }

    async fn attempt(&self, body: &GenerateRequest<'_>) -> Outcome<String> {
        let response = match self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => return Outcome::Retry(AiError::Http(e)),
        };

        let status = response.status();
        if status.as_u16() == 429 || status.is_server_error() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Gemini returned a retryable status");
            return Outcome::Retry(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if !status.is_success() {
            let raw = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&raw)
                .map(|e| e.error.message)
                .unwrap_or(raw);
            return Outcome::Done(Err(AiError::Api {
                status: status.as_u16(),
                message,
            }));
        }

        let parsed: GenerateResponse = match response.json().await {
            Ok(parsed) => parsed,
            Err(e) => return Outcome::Done(Err(AiError::Http(e))),
        };
        let result = parsed.text().ok_or(AiError::EmptyContent);
        if let Ok(text) = &result {
            debug!(reply_len = text.len(), "Gemini call succeeded");
        }
        Outcome::Done(result)
    }
}

enum Outcome<T> {
    Done(Result<T, AiError>),
    Retry(AiError),
}

/// Runs `op` once, then again after each retryable failure, at most
/// `MAX_RETRIES` more times.
async fn with_retries<T, F, Fut>(base_delay: Duration, mut op: F) -> Result<T, AiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Outcome<T>>,
{
    let mut retry = 0;
    loop {
        match op().await {
            Outcome::Done(result) => return result,
            Outcome::Retry(e) if retry >= MAX_RETRIES => return Err(e),
            Outcome::Retry(e) => {
                retry += 1;
                let backoff = base_delay * (1 << (retry - 1));
                let delay = backoff + backoff.mul_f64(fastrand::f64() * 0.5);
                warn!(retry, error = %e, delay_ms = delay.as_millis() as u64, "Retrying Gemini call");
                tokio::time::sleep(delay).await;
            }
        }
    }
}

#[async_trait]
impl AiClient for GeminiClient {
    async fn generate(&self, prompt: &str) -> anyhow::Result<String> {
        Ok(self.generate_content(prompt).await?)
    }
}
