use anyhow::Context;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument};

use crate::{config::GeminiConfig, error::FetchError};

use super::{ProviderId, SearchProvider};

/// Gemini `generateContent` with Google Search grounding.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    api_key: String,
    config: GeminiConfig,
    http: Client,
}

impl GeminiProvider {
    pub fn new(api_key: String, config: GeminiConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { api_key, config, http })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    tools: Vec<Tool>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Debug, Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct Tool {
    google_search: GoogleSearch,
}

#[derive(Debug, Serialize)]
struct GoogleSearch {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateResponse {
    /// Text of the first candidate, all text parts joined.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();

        if text.trim().is_empty() { None } else { Some(text) }
    }
}

#[async_trait]
impl SearchProvider for GeminiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::Gemini
    }

    #[instrument(skip(self, prompt), fields(model = %self.config.model))]
    async fn search(&self, prompt: &str) -> Result<String, FetchError> {
        let body = GenerateRequest {
            contents: vec![Content { role: "user", parts: vec![TextPart { text: prompt }] }],
            tools: vec![Tool { google_search: GoogleSearch {} }],
            generation_config: GenerationConfig { response_mime_type: "application/json" },
        };

        let url = self.endpoint();
        debug!(url = %url, "Sending search request");

        let res = self
            .http
            .post(&url)
            .header("x-goog-api-key", self.api_key.as_str())
            .json(&body)
            .send()
            .await
            .map_err(|e| FetchError::Unreachable(e.to_string()))?;

        let status = res.status();
        let text = res.text().await.map_err(|e| FetchError::Unreachable(e.to_string()))?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(FetchError::RateLimited);
        }
        if status.is_server_error() {
            return Err(FetchError::ServiceUnavailable(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(FetchError::Status { status: status.as_u16(), body: truncate_body(&text) });
        }

        let parsed: GenerateResponse =
            serde_json::from_str(&text).map_err(|e| FetchError::Malformed(e.to_string()))?;

        let answer = parsed.into_text().ok_or(FetchError::EmptyResponse)?;
        debug!(bytes = answer.len(), "Received search answer");

        Ok(answer)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_base_and_model() {
        let cfg = GeminiConfig {
            base_url: "http://localhost:1234/v1beta/".into(),
            model: "gemini-test".into(),
            timeout_secs: 5,
        };
        let provider = GeminiProvider::new("KEY".into(), cfg).unwrap();
        assert_eq!(
            provider.endpoint(),
            "http://localhost:1234/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn new_keeps_key_and_config() -> anyhow::Result<()> {
        let cfg = GeminiConfig { timeout_secs: 1, ..GeminiConfig::default() };
        let provider = GeminiProvider::new("KEY".into(), cfg.clone())?;

        assert_eq!(provider.api_key, "KEY");
        assert_eq!(provider.config, cfg);
        assert_eq!(provider.id(), ProviderId::Gemini);
        Ok(())
    }

    #[test]
    fn request_body_enables_search_and_json() {
        let body = GenerateRequest {
            contents: vec![Content { role: "user", parts: vec![TextPart { text: "hi" }] }],
            tools: vec![Tool { google_search: GoogleSearch {} }],
            generation_config: GenerationConfig { response_mime_type: "application/json" },
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "hi");
        assert_eq!(json["tools"][0]["google_search"], serde_json::json!({}));
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let resp: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[
                {"content":{"parts":[{"text":"[1,"},{"text":"2]"}]}},
                {"content":{"parts":[{"text":"ignored"}]}}
            ]}"#,
        )
        .unwrap();
        assert_eq!(resp.into_text().as_deref(), Some("[1,2]"));
    }

    #[test]
    fn no_candidates_means_no_text() {
        let resp: GenerateResponse = serde_json::from_str(r#"{"promptFeedback":{}}"#).unwrap();
        assert_eq!(resp.into_text(), None);
    }

    #[test]
    fn truncate_body_respects_char_boundaries() {
        let long = "é".repeat(300);
        let out = truncate_body(&long);
        assert!(out.ends_with("..."));
        assert_eq!(out.chars().count(), 203);
        assert_eq!(truncate_body("short"), "short");
    }
}
