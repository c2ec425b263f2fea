use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;
use wiremock::MockServer;

use motivation_backend::controllers::audio::AudioController;
use motivation_backend::controllers::motivation::MotivationController;
use motivation_backend::domain::motivation::{MotivationService, Provider};
use motivation_backend::domain::speech::{SpeechService, SynthesisQueue};
use motivation_backend::infrastructure::http::build_router;
use motivation_backend::infrastructure::repositories::{
    ChatCompletionsRepository, CompletionRepository, GeminiRepository, GoogleTtsRepository,
    HuggingFaceRepository, TtsRepository,
};
use motivation_backend::infrastructure::storage::AudioStore;

/// Everything an end-to-end test needs: the assembled router, the mock
/// upstream servers, and the temporary audio directory.
pub struct TestContext {
    pub router: Router,
    pub provider_server: MockServer,
    pub tts_server: MockServer,
    pub audio_dir: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        let provider_server = MockServer::start().await;
        let tts_server = MockServer::start().await;
        let audio_dir = TempDir::new().unwrap();

        let http_client = reqwest::Client::new();

        // Every HTTP-based provider points at the mock server
        let mut completion_repos: HashMap<Provider, Arc<dyn CompletionRepository>> =
            HashMap::new();
        completion_repos.insert(
            Provider::Perplexity,
            Arc::new(ChatCompletionsRepository::new(
                http_client.clone(),
                provider_server.uri(),
                "sonar",
            )),
        );
        completion_repos.insert(
            Provider::Mistral,
            Arc::new(ChatCompletionsRepository::new(
                http_client.clone(),
                provider_server.uri(),
                "mistral-small-latest",
            )),
        );
        completion_repos.insert(
            Provider::Gemini,
            Arc::new(GeminiRepository::with_api_base(
                http_client.clone(),
                provider_server.uri(),
            )),
        );
        completion_repos.insert(
            Provider::Huggingface,
            Arc::new(HuggingFaceRepository::with_api_base(
                http_client.clone(),
                provider_server.uri(),
            )),
        );
        let motivation_service =
            Arc::new(MotivationService::new(completion_repos, HashMap::new()));

        let store = Arc::new(AudioStore::new(audio_dir.path()));
        let tts_repo: Arc<dyn TtsRepository> = Arc::new(GoogleTtsRepository::with_api_base(
            http_client,
            tts_server.uri(),
        ));
        let (queue, queue_rx) = SynthesisQueue::channel();
        let speech_service = Arc::new(SpeechService::new(tts_repo, store, queue));
        SynthesisQueue::spawn_workers(2, queue_rx, speech_service.clone());

        let router = build_router(
            Arc::new(MotivationController::new(motivation_service)),
            Arc::new(AudioController::new(speech_service)),
        );

        Self {
            router,
            provider_server,
            tts_server,
            audio_dir,
        }
    }

    pub async fn post_json(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> (StatusCode, serde_json::Value) {
        let request = Request::builder()
            .method("POST")
            .uri(path)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    pub async fn get(&self, path: &str) -> (StatusCode, Vec<u8>) {
        let request = Request::builder()
            .method("GET")
            .uri(path)
            .body(Body::empty())
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec())
    }

    /// Poll /audio_status until the artifact is ready, failing the test
    /// after a few seconds of not-ready.
    pub async fn wait_until_ready(&self, audio_id: Uuid) {
        for _ in 0..200 {
            let (status, body) = self.get(&format!("/audio_status/{audio_id}")).await;
            assert_eq!(status, StatusCode::OK);
            let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
            if json["ready"] == serde_json::Value::Bool(true) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(25)).await;
        }
        panic!("audio {audio_id} never became ready");
    }

    /// Names of all files currently in the audio directory
    pub fn audio_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(self.audio_dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}
