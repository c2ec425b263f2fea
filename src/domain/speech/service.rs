use super::error::SpeechServiceError;
use super::language::LanguageCode;
use super::queue::{SynthesisJob, SynthesisQueue};
use super::text::{flatten_markdown, split_text};
use crate::infrastructure::repositories::TtsRepository;
use crate::infrastructure::storage::AudioStore;
use chrono::Utc;
use lingua::{LanguageDetector, LanguageDetectorBuilder};
use std::sync::Arc;
use uuid::Uuid;

/// Upper bound per synthesized utterance; longer texts are chunked
const MAX_CHUNK_CHARS: usize = 900;

/// Owns the speech synthesis pipeline: accepts jobs, runs them on the
/// worker pool, and answers readiness/fetch queries from artifact
/// presence alone.
pub struct SpeechService {
    tts_repo: Arc<dyn TtsRepository>,
    store: Arc<AudioStore>,
    queue: SynthesisQueue,
    language_detector: LanguageDetector,
}

impl SpeechService {
    pub fn new(
        tts_repo: Arc<dyn TtsRepository>,
        store: Arc<AudioStore>,
        queue: SynthesisQueue,
    ) -> Self {
        let language_detector = LanguageDetectorBuilder::from_all_languages().build();
        Self {
            tts_repo,
            store,
            queue,
            language_detector,
        }
    }

    /// Accept a synthesis job and return its id immediately.
    ///
    /// The returned id is the only handle: the caller polls
    /// [`Self::is_ready`] and later fetches the artifact.
    pub fn start_synthesis(
        &self,
        text: String,
        language: Option<String>,
    ) -> Result<Uuid, SpeechServiceError> {
        if text.trim().is_empty() {
            return Err(SpeechServiceError::Invalid(
                "Text cannot be empty".to_string(),
            ));
        }

        let language = self.resolve_language(&text, language.as_deref());
        let id = Uuid::new_v4();

        tracing::info!(
            job_id = %id,
            language = %language,
            text_length = text.len(),
            "Synthesis job accepted"
        );

        self.queue.enqueue(SynthesisJob { id, text, language })?;
        Ok(id)
    }

    /// Run one synthesis job to completion. Called by a queue worker;
    /// never retried. On failure the partial chunk artifacts are removed
    /// so the job leaves no trace besides the log.
    pub async fn run_job(&self, job: SynthesisJob) -> Result<(), SpeechServiceError> {
        let result = self.synthesize_chunked(&job).await;
        if result.is_err() {
            self.store.remove_parts(job.id).await;
        }
        result
    }

    async fn synthesize_chunked(&self, job: &SynthesisJob) -> Result<(), SpeechServiceError> {
        // 1. Flatten markdown to plain speakable text
        let plain_text = flatten_markdown(&job.text);

        // 2. Split into word-bounded chunks the TTS backend can handle
        let chunks = split_text(&plain_text, MAX_CHUNK_CHARS);
        if chunks.is_empty() {
            return Err(SpeechServiceError::Invalid(
                "no speakable text after markup removal".to_string(),
            ));
        }

        tracing::info!(
            job_id = %job.id,
            chunk_count = chunks.len(),
            plain_length = plain_text.len(),
            "Text split into chunks"
        );

        // 3. Synthesize each chunk into a positional part artifact
        let mut part_paths = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            let audio = self
                .tts_repo
                .synthesize(chunk, job.language)
                .await
                .map_err(SpeechServiceError::Dependency)?;
            let path = self.store.write_part(job.id, index, &audio).await?;

            tracing::debug!(
                job_id = %job.id,
                chunk_index = index,
                chunk_chars = chunk.len(),
                audio_size = audio.len(),
                "Chunk synthesized"
            );
            part_paths.push(path);
        }

        // 4. Concatenate the parts in chunk order, then drop them.
        // Parts are gone before the final artifact appears, so a ready
        // poll never observes leftover temporaries.
        let mut merged_audio = Vec::new();
        for path in &part_paths {
            merged_audio.extend(self.store.read(path).await?);
        }
        self.store.remove_parts(job.id).await;

        // 5. Persist the final artifact
        self.store.write_final(job.id, &merged_audio).await?;

        tracing::info!(
            job_id = %job.id,
            chunk_count = part_paths.len(),
            audio_size = merged_audio.len(),
            "Audio artifact persisted"
        );

        Ok(())
    }

    /// Ready means exactly: the final artifact exists on disk.
    /// Unknown ids and failed jobs are both simply not ready.
    pub async fn is_ready(&self, id: Uuid) -> bool {
        self.store.final_exists(id).await
    }

    /// The artifact bytes, or None when absent ("not yet ready" and
    /// "unknown id" are indistinguishable to the caller).
    pub async fn fetch(&self, id: Uuid) -> Option<Vec<u8>> {
        self.store.read_final(id).await
    }

    /// Synchronous single-shot synthesis: one direct TTS call, no
    /// chunking, timestamp-derived filename. Returns None on failure.
    pub async fn synthesize_now(&self, text: &str, language: Option<&str>) -> Option<String> {
        let plain_text = flatten_markdown(text);
        let language = self.resolve_language(&plain_text, language);

        let timestamp = Utc::now().format("%Y%m%d_%H%M%S");
        let filename = format!("motivation_{timestamp}.mp3");

        let audio = match self.tts_repo.synthesize(&plain_text, language).await {
            Ok(audio) => audio,
            Err(error) => {
                tracing::error!(error = %error, "Error in text-to-speech");
                return None;
            }
        };

        match self.store.write_named(&filename, &audio).await {
            Ok(path) => {
                tracing::debug!(path = %path.display(), "Audio file saved");
                Some(filename)
            }
            Err(error) => {
                tracing::error!(error = %error, filename = %filename, "Failed to save audio file");
                None
            }
        }
    }

    /// Caller-provided language code when valid, otherwise detected from
    /// the text, falling back to English.
    fn resolve_language(&self, text: &str, requested: Option<&str>) -> LanguageCode {
        if let Some(code) = requested.and_then(LanguageCode::parse) {
            return code;
        }
        match self.language_detector.detect_language_of(text) {
            Some(language) => LanguageCode::from_lingua(language),
            None => {
                tracing::warn!("Could not detect language, falling back to English");
                LanguageCode::English
            }
        }
    }
}
