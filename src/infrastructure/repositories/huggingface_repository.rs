use super::completion_repository::CompletionRepository;
use async_trait::async_trait;
use serde::Deserialize;

const HUGGINGFACE_API_BASE: &str = "https://api-inference.huggingface.co";
const HUGGINGFACE_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";

const MAX_NEW_TOKENS: u32 = 1000;
const TEMPERATURE: f32 = 0.7;

/// Hugging Face text-generation inference adapter
pub struct HuggingFaceRepository {
    client: reqwest::Client,
    api_base: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct Generation {
    generated_text: String,
}

impl HuggingFaceRepository {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_api_base(client, HUGGINGFACE_API_BASE)
    }

    pub fn with_api_base(client: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
            model: HUGGINGFACE_MODEL.to_string(),
        }
    }

    fn inference_url(&self) -> String {
        format!(
            "{}/models/{}",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl CompletionRepository for HuggingFaceRepository {
    async fn complete(&self, prompt: &str, credential: &str) -> Result<String, String> {
        tracing::debug!(
            model = %self.model,
            prompt_length = prompt.len(),
            "Calling Hugging Face inference API"
        );

        let body = serde_json::json!({
            "inputs": prompt,
            "parameters": {
                "max_new_tokens": MAX_NEW_TOKENS,
                "temperature": TEMPERATURE,
                "return_full_text": false
            }
        });

        let response = self
            .client
            .post(self.inference_url())
            .bearer_auth(credential)
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

        let payload: Vec<Generation> = response
            .json()
            .await
            .map_err(|e| format!("invalid response payload: {e}"))?;

        payload
            .into_iter()
            .next()
            .map(|generation| generation.generated_text)
            .ok_or_else(|| "response contained no generations".to_string())
    }
}
