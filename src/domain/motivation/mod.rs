pub mod prompt;
pub mod provider;
pub mod service;

pub use provider::Provider;
pub use service::MotivationService;

use serde::{Deserialize, Serialize};

/// Request for POST /get_motivation
#[derive(Debug, Serialize, Deserialize)]
pub struct MotivationRequest {
    pub text: String,
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default)]
    pub api_key: String,
}

fn default_provider() -> String {
    "perplexity".to_string()
}

/// Response for POST /get_motivation
///
/// Always status 200; provider failures arrive as diagnostic text in `text`.
#[derive(Debug, Serialize, Deserialize)]
pub struct MotivationResponse {
    pub text: String,
}
