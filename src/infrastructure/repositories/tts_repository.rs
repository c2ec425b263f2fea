use crate::domain::speech::LanguageCode;
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying speech backend (Google Translate, OpenAI, ...)
///
/// Implementations synthesize one utterance per call; splitting long text
/// into chunks is owned by the speech pipeline, which also merges the
/// resulting audio in chunk order.
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize one utterance to MP3 bytes
    ///
    /// # Arguments
    /// * `text` - Plain text (no markup, normalized whitespace)
    /// * `language` - The target language for synthesis
    ///
    /// # Errors
    /// Returns error if synthesis fails or the backend is unavailable
    async fn synthesize(&self, text: &str, language: LanguageCode) -> Result<Vec<u8>, String>;
}
