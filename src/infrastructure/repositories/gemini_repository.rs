use super::completion_repository::CompletionRepository;
use async_trait::async_trait;
use serde::Deserialize;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
const GEMINI_MODEL: &str = "gemini-pro";

/// Google Gemini generative-content adapter. The credential rides as the
/// `key` query parameter, so the request URL is never logged.
pub struct GeminiRepository {
    client: reqwest::Client,
    api_base: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiRepository {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_api_base(client, GEMINI_API_BASE)
    }

    pub fn with_api_base(client: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
        }
    }

    fn generate_url(&self, credential: &str) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.api_base.trim_end_matches('/'),
            GEMINI_MODEL,
            urlencoding::encode(credential)
        )
    }
}

#[async_trait]
impl CompletionRepository for GeminiRepository {
    async fn complete(&self, prompt: &str, credential: &str) -> Result<String, String> {
        tracing::debug!(
            model = GEMINI_MODEL,
            prompt_length = prompt.len(),
            "Calling Gemini generateContent API"
        );

        let body = serde_json::json!({
            "contents": [{
                "parts": [{"text": prompt}]
            }]
        });

        let response = self
            .client
            .post(self.generate_url(credential))
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(format!("{status}: {body}"));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| format!("invalid response payload: {e}"))?;

        payload
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| "response contained no candidates".to_string())
    }
}
