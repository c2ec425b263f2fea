use super::completion_repository::CompletionRepository;
use async_openai::{
    config::OpenAIConfig,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
    Client,
};
use async_trait::async_trait;

const OPENAI_MODEL: &str = "gpt-3.5-turbo";
const MAX_TOKENS: u32 = 1000;

/// OpenAI chat provider via the official-style SDK.
///
/// The SDK client is rebuilt on every call: the credential is
/// per-request and must not outlive it.
pub struct OpenAiRepository {
    model: String,
}

impl OpenAiRepository {
    pub fn new() -> Self {
        Self {
            model: OPENAI_MODEL.to_string(),
        }
    }
}

impl Default for OpenAiRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CompletionRepository for OpenAiRepository {
    async fn complete(&self, prompt: &str, credential: &str) -> Result<String, String> {
        tracing::debug!(
            model = %self.model,
            prompt_length = prompt.len(),
            "Calling OpenAI chat API"
        );

        let client = Client::with_config(OpenAIConfig::new().with_api_key(credential));

        let message = ChatCompletionRequestUserMessageArgs::default()
            .content(prompt)
            .build()
            .map_err(|e| format!("failed to build message: {e}"))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(self.model.as_str())
            .max_tokens(MAX_TOKENS)
            .messages([message.into()])
            .build()
            .map_err(|e| format!("failed to build request: {e}"))?;

        let response = client
            .chat()
            .create(request)
            .await
            .map_err(|e| format!("OpenAI error: {e}"))?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| "response contained no choices".to_string())
    }
}
