use super::tts_repository::TtsRepository;
use crate::domain::speech::LanguageCode;
use async_openai::{
    config::OpenAIConfig,
    types::{CreateSpeechRequest, SpeechModel, Voice},
    Client,
};
use async_trait::async_trait;

/// OpenAI speech implementation of the TTS repository.
///
/// Unlike the completion providers, the credential here is the server's
/// own (config-sourced): audio jobs outlive the request that created
/// them, so there is no per-request key to borrow.
pub struct OpenAiTtsRepository {
    client: Client<OpenAIConfig>,
    model: String,
}

impl OpenAiTtsRepository {
    pub fn new(api_key: String, model: impl Into<String>) -> Self {
        Self {
            client: Client::with_config(OpenAIConfig::new().with_api_key(api_key)),
            model: model.into(),
        }
    }

    /// Select the appropriate OpenAI voice for a language
    /// Based on voice characteristics that suit each language
    fn voice_for_language(language: LanguageCode) -> Voice {
        match language {
            LanguageCode::English => Voice::Alloy,
            LanguageCode::Spanish => Voice::Echo,
            LanguageCode::French => Voice::Nova,
            LanguageCode::German => Voice::Onyx,
            LanguageCode::Italian => Voice::Fable,
            LanguageCode::Portuguese => Voice::Shimmer,
        }
    }

    fn speech_model(&self) -> SpeechModel {
        match self.model.as_str() {
            "tts-1" => SpeechModel::Tts1,
            "tts-1-hd" => SpeechModel::Tts1Hd,
            other => SpeechModel::Other(other.to_string()),
        }
    }
}

#[async_trait]
impl TtsRepository for OpenAiTtsRepository {
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>, String> {
        let voice = Self::voice_for_language(language);

        tracing::debug!(
            model = %self.model,
            language = %language,
            voice = ?voice,
            text_length = text.len(),
            "Calling OpenAI TTS API"
        );

        let request = CreateSpeechRequest {
            model: self.speech_model(),
            input: text.to_string(),
            voice,
            response_format: None, // Defaults to MP3
            speed: None,           // Defaults to 1.0
        };

        let response = self
            .client
            .audio()
            .speech(request)
            .await
            .map_err(|e| format!("OpenAI TTS error: {e}"))?;

        let audio_bytes = response.bytes.to_vec();
        tracing::debug!(audio_size = audio_bytes.len(), "TTS audio received");

        Ok(audio_bytes)
    }
}
