use super::tts_repository::TtsRepository;
use crate::domain::speech::LanguageCode;
use async_trait::async_trait;

const TRANSLATE_TTS_BASE: &str = "https://translate.google.com";

/// Google Translate TTS implementation of the TTS repository.
///
/// Uses the unauthenticated `translate_tts` endpoint (the same one the
/// gTTS tooling wraps); one GET per utterance, MP3 bytes back. Input per
/// call must stay within the endpoint's length tolerance, which the
/// pipeline's 900-character chunks guarantee.
pub struct GoogleTtsRepository {
    client: reqwest::Client,
    api_base: String,
}

impl GoogleTtsRepository {
    pub fn new(client: reqwest::Client) -> Self {
        Self::with_api_base(client, TRANSLATE_TTS_BASE)
    }

    pub fn with_api_base(client: reqwest::Client, api_base: impl Into<String>) -> Self {
        Self {
            client,
            api_base: api_base.into(),
        }
    }

    fn tts_url(&self, text: &str, language: LanguageCode) -> String {
        format!(
            "{}/translate_tts?ie=UTF-8&client=tw-ob&tl={}&q={}",
            self.api_base.trim_end_matches('/'),
            language.as_str(),
            urlencoding::encode(text)
        )
    }
}

#[async_trait]
impl TtsRepository for GoogleTtsRepository {
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>, String> {
        tracing::debug!(
            language = %language,
            text_length = text.len(),
            "Calling Google Translate TTS"
        );

        let response = self
            .client
            .get(self.tts_url(text, language))
            .send()
            .await
            .map_err(|e| format!("TTS request failed: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(format!("TTS API error {status}: {body}"));
        }

        let audio_bytes = response
            .bytes()
            .await
            .map_err(|e| format!("TTS response read failed: {e}"))?
            .to_vec();

        tracing::debug!(audio_size = audio_bytes.len(), "TTS audio received");

        Ok(audio_bytes)
    }
}
