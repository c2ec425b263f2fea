pub mod error;
pub mod language;
pub mod queue;
pub mod service;
pub mod text;

pub use error::SpeechServiceError;
pub use language::LanguageCode;
pub use queue::{SynthesisJob, SynthesisQueue};
pub use service::SpeechService;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request for POST /generate_audio and POST /synthesize
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateAudioRequest {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Response for POST /generate_audio
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateAudioResponse {
    pub audio_id: Uuid,
}

/// Response for GET /audio_status/:id
#[derive(Debug, Serialize, Deserialize)]
pub struct AudioStatusResponse {
    pub ready: bool,
}

/// Response for POST /synthesize
#[derive(Debug, Serialize, Deserialize)]
pub struct SynthesizeResponse {
    pub filename: String,
}
