use axum::{
    body::Body,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    Json,
};
use std::sync::Arc;
use uuid::Uuid;

use crate::{
    domain::speech::{
        AudioStatusResponse, GenerateAudioRequest, GenerateAudioResponse, SpeechService,
        SynthesizeResponse,
    },
    error::{AppError, AppResult},
};

pub struct AudioController {
    speech_service: Arc<SpeechService>,
}

impl AudioController {
    pub fn new(speech_service: Arc<SpeechService>) -> Self {
        Self { speech_service }
    }

    /// POST /generate_audio - Start asynchronous speech synthesis
    pub async fn generate_audio(
        State(controller): State<Arc<AudioController>>,
        Json(request): Json<GenerateAudioRequest>,
    ) -> AppResult<Json<GenerateAudioResponse>> {
        let audio_id = controller
            .speech_service
            .start_synthesis(request.text, request.language)
            .map_err(AppError::from)?;

        Ok(Json(GenerateAudioResponse { audio_id }))
    }

    /// GET /audio_status/:audio_id - Poll synthesis readiness
    ///
    /// Unknown and malformed ids are simply not ready; the client cannot
    /// distinguish them from a job still in flight.
    pub async fn audio_status(
        State(controller): State<Arc<AudioController>>,
        Path(audio_id): Path<String>,
    ) -> Json<AudioStatusResponse> {
        let ready = match Uuid::parse_str(&audio_id) {
            Ok(id) => controller.speech_service.is_ready(id).await,
            Err(_) => false,
        };

        Json(AudioStatusResponse { ready })
    }

    /// GET /audio/:filename - Serve a finished artifact (`{id}.mp3`)
    pub async fn serve_audio(
        State(controller): State<Arc<AudioController>>,
        Path(filename): Path<String>,
    ) -> AppResult<(StatusCode, HeaderMap, Body)> {
        let id = filename
            .strip_suffix(".mp3")
            .and_then(|stem| Uuid::parse_str(stem).ok())
            .ok_or_else(|| AppError::NotFound(format!("audio file {filename}")))?;

        let audio = controller
            .speech_service
            .fetch(id)
            .await
            .ok_or_else(|| AppError::NotFound(format!("audio file {filename}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(header::CONTENT_TYPE, "audio/mpeg".parse().unwrap());

        Ok((StatusCode::OK, headers, Body::from(audio)))
    }

    /// POST /synthesize - Synchronous single-shot synthesis
    pub async fn synthesize(
        State(controller): State<Arc<AudioController>>,
        Json(request): Json<GenerateAudioRequest>,
    ) -> AppResult<Json<SynthesizeResponse>> {
        if request.text.trim().is_empty() {
            return Err(AppError::BadRequest("Text cannot be empty".to_string()));
        }

        match controller
            .speech_service
            .synthesize_now(&request.text, request.language.as_deref())
            .await
        {
            Some(filename) => Ok(Json(SynthesizeResponse { filename })),
            None => Err(AppError::ExternalService(
                "speech synthesis failed".to_string(),
            )),
        }
    }
}
