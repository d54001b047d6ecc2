use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::services::LanguageModelService;

const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// A request can carry a full diff chunk plus instructions; the model needs
/// room to chew on it before this collaborator-side timeout trips.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            http: Client::new(),
            api_key,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{API_BASE}/{}:generateContent?key={}",
            self.model, self.api_key
        )
    }
}

#[async_trait]
impl LanguageModelService for GeminiClient {
    async fn summarize(&self, prompt: &str) -> AppResult<String> {
        let response = self
            .http
            .post(self.endpoint())
            .timeout(REQUEST_TIMEOUT)
            .json(&GeminiGenerateRequest::new(prompt))
            .send()
            .await
            .map_err(|err| AppError::Summarization(format!("failed to call Gemini: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Summarization(format!(
                "Gemini responded with {status}: {body}"
            )));
        }

        let payload: GeminiGenerateResponse = response.json().await.map_err(|err| {
            AppError::Summarization(format!("failed to parse Gemini response: {err}"))
        })?;

        payload.into_text().ok_or_else(|| {
            AppError::Summarization("Gemini response contained no text".to_string())
        })
    }
}

#[derive(Serialize)]
struct GeminiGenerateRequest {
    contents: Vec<GeminiContent>,
}

impl GeminiGenerateRequest {
    fn new(prompt: &str) -> Self {
        Self {
            contents: vec![GeminiContent {
                parts: vec![GeminiPart {
                    text: prompt.to_string(),
                }],
            }],
        }
    }
}

#[derive(Serialize)]
struct GeminiContent {
    parts: Vec<GeminiPart>,
}

#[derive(Serialize)]
struct GeminiPart {
    text: String,
}

#[derive(Deserialize)]
struct GeminiGenerateResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

impl GeminiGenerateResponse {
    fn into_text(self) -> Option<String> {
        let candidate = self.candidates.into_iter().next()?;
        let text = candidate
            .content
            .parts
            .into_iter()
            .map(|part| part.text)
            .collect::<String>();
        let text = text.trim().to_string();
        (!text.is_empty()).then_some(text)
    }
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiCandidateContent,
}

#[derive(Deserialize)]
struct GeminiCandidateContent {
    #[serde(default)]
    parts: Vec<GeminiResponsePart>,
}

#[derive(Deserialize)]
struct GeminiResponsePart {
    #[serde(default)]
    text: String,
}
