use serde::Deserialize;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Audio pipeline
    pub audio_dir: PathBuf,
    pub synthesis_workers: usize,
    pub audio_max_age_hours: u64,
    pub tts_backend: TtsBackend,
    // Default provider credentials, overridable per request
    pub perplexity_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub google_api_key: Option<String>,
    pub huggingface_api_key: Option<String>,
    pub mistral_api_key: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

/// Which speech backend synthesizes audio chunks
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum TtsBackend {
    Google,
    Openai,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "production" => Environment::Production,
                    _ => Environment::Development,
                })?,
            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "pretty".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "json" => LogFormat::Json,
                    _ => LogFormat::Pretty,
                })?,
            audio_dir: env::var("AUDIO_DIR")
                .unwrap_or_else(|_| "./audio".to_string())
                .into(),
            synthesis_workers: env::var("SYNTHESIS_WORKERS")
                .unwrap_or_else(|_| "4".to_string())
                .parse()?,
            audio_max_age_hours: env::var("AUDIO_MAX_AGE_HOURS")
                .unwrap_or_else(|_| "24".to_string())
                .parse()?,
            tts_backend: env::var("TTS_BACKEND")
                .unwrap_or_else(|_| "google".to_string())
                .parse::<String>()
                .map(|s| match s.as_str() {
                    "openai" => TtsBackend::Openai,
                    _ => TtsBackend::Google,
                })?,
            perplexity_api_key: env::var("PERPLEXITY_API_KEY").ok(),
            openai_api_key: env::var("OPENAI_API_KEY").ok(),
            google_api_key: env::var("GOOGLE_API_KEY").ok(),
            huggingface_api_key: env::var("HUGGINGFACE_API_KEY").ok(),
            mistral_api_key: env::var("MISTRAL_API_KEY").ok(),
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }
}
