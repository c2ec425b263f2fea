use super::completion_repository::CompletionRepository;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

const PERPLEXITY_API_BASE: &str = "https://api.perplexity.ai";
const PERPLEXITY_MODEL: &str = "sonar";

const MISTRAL_API_BASE: &str = "https://api.mistral.ai/v1";
const MISTRAL_MODEL: &str = "mistral-small-latest";

const MAX_TOKENS: u32 = 1000;

/// Generic adapter for OpenAI-compatible `/chat/completions` APIs.
/// Perplexity and Mistral share this shape; only base URL and model
/// differ.
pub struct ChatCompletionsRepository {
    client: reqwest::Client,
    api_base: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    content: Option<String>,
}

impl ChatCompletionsRepository {
    pub fn new(
        client: reqwest::Client,
        api_base: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            api_base: api_base.into(),
            model: model.into(),
        }
    }

    pub fn perplexity(client: reqwest::Client) -> Self {
        Self::new(client, PERPLEXITY_API_BASE, PERPLEXITY_MODEL)
    }

    pub fn mistral(client: reqwest::Client) -> Self {
        Self::new(client, MISTRAL_API_BASE, MISTRAL_MODEL)
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionRepository for ChatCompletionsRepository {
    async fn complete(&self, prompt: &str, credential: &str) -> Result<String, String> {
        tracing::debug!(
            model = %self.model,
            api_base = %self.api_base,
            prompt_length = prompt.len(),
            "Calling chat completions API"
        );

        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(credential)
            .json(&request)
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

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|e| format!("invalid response payload: {e}"))?;

        payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| "response contained no choices".to_string())
    }
}
