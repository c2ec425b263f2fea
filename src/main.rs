use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use motivation_backend::controllers::audio::AudioController;
use motivation_backend::controllers::motivation::MotivationController;
use motivation_backend::domain::motivation::{MotivationService, Provider};
use motivation_backend::domain::speech::{SpeechService, SynthesisQueue};
use motivation_backend::infrastructure::config::{Config, LogFormat, TtsBackend};
use motivation_backend::infrastructure::http::start_http_server;
use motivation_backend::infrastructure::repositories::{
    ChatCompletionsRepository, CompletionRepository, GeminiRepository, GoogleTtsRepository,
    HuggingFaceRepository, OpenAiRepository, OpenAiTtsRepository, TtsRepository,
};
use motivation_backend::infrastructure::storage::AudioStore;

/// Outbound calls to providers and TTS backends get a bounded timeout
/// instead of hanging for as long as the transport allows
const OUTBOUND_TIMEOUT: Duration = Duration::from_secs(120);

const CLEANUP_INTERVAL: Duration = Duration::from_secs(3600);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        "Starting Motivation Backend on {}:{}",
        config.host,
        config.port
    );

    // Shared HTTP client for provider and TTS calls
    let http_client = reqwest::Client::builder()
        .timeout(OUTBOUND_TIMEOUT)
        .build()?;

    // Audio artifact store
    let audio_store = Arc::new(AudioStore::new(&config.audio_dir));
    audio_store.ensure_dir().await?;
    tracing::info!(dir = %config.audio_dir.display(), "Audio directory ready");

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Instantiate completion repositories, one per provider
    tracing::info!("Instantiating provider repositories...");
    let mut completion_repos: HashMap<Provider, Arc<dyn CompletionRepository>> = HashMap::new();
    completion_repos.insert(
        Provider::Perplexity,
        Arc::new(ChatCompletionsRepository::perplexity(http_client.clone())),
    );
    completion_repos.insert(
        Provider::Mistral,
        Arc::new(ChatCompletionsRepository::mistral(http_client.clone())),
    );
    completion_repos.insert(Provider::Openai, Arc::new(OpenAiRepository::new()));
    completion_repos.insert(
        Provider::Gemini,
        Arc::new(GeminiRepository::new(http_client.clone())),
    );
    completion_repos.insert(
        Provider::Huggingface,
        Arc::new(HuggingFaceRepository::new(http_client.clone())),
    );

    // Environment-sourced default credentials, overridable per request
    let mut default_credentials = HashMap::new();
    for (provider, key) in [
        (Provider::Perplexity, &config.perplexity_api_key),
        (Provider::Openai, &config.openai_api_key),
        (Provider::Gemini, &config.google_api_key),
        (Provider::Huggingface, &config.huggingface_api_key),
        (Provider::Mistral, &config.mistral_api_key),
    ] {
        if let Some(key) = key {
            default_credentials.insert(provider, key.clone());
        }
    }

    // 2. Instantiate the TTS repository for the configured backend
    let tts_repo: Arc<dyn TtsRepository> = match config.tts_backend {
        TtsBackend::Google => Arc::new(GoogleTtsRepository::new(http_client.clone())),
        TtsBackend::Openai => {
            let api_key = config
                .openai_api_key
                .clone()
                .ok_or("OPENAI_API_KEY is required when TTS_BACKEND=openai")?;
            Arc::new(OpenAiTtsRepository::new(api_key, "tts-1"))
        }
    };
    tracing::info!(backend = ?config.tts_backend, "TTS backend selected");

    // 3. Instantiate services (inject repositories)
    tracing::info!("Instantiating services...");
    let motivation_service = Arc::new(MotivationService::new(
        completion_repos,
        default_credentials,
    ));

    let (queue, queue_rx) = SynthesisQueue::channel();
    let speech_service = Arc::new(SpeechService::new(tts_repo, audio_store.clone(), queue));
    SynthesisQueue::spawn_workers(config.synthesis_workers, queue_rx, speech_service.clone());
    tracing::info!(workers = config.synthesis_workers, "Synthesis workers started");

    // Periodically purge finished artifacts past their retention age
    let max_age = Duration::from_secs(config.audio_max_age_hours * 3600);
    let cleanup_store = audio_store.clone();
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            ticker.tick().await;
            match cleanup_store.purge_stale(max_age).await {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "Purged stale audio artifacts"),
                Err(error) => tracing::warn!(error = %error, "Audio cleanup pass failed"),
            }
        }
    });

    // 4. Instantiate controllers (inject services)
    tracing::info!("Instantiating controllers...");
    let motivation_controller = Arc::new(MotivationController::new(motivation_service));
    let audio_controller = Arc::new(AudioController::new(speech_service));

    // Start HTTP server with all routes
    start_http_server(Arc::new(config), motivation_controller, audio_controller).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "motivation_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "motivation_backend=debug,tower_http=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
