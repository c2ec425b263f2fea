use super::prompt::motivational_prompt;
use super::provider::Provider;
use crate::infrastructure::repositories::CompletionRepository;
use std::collections::HashMap;
use std::sync::Arc;

/// Returned verbatim when the request names a provider we do not know.
pub const INVALID_PROVIDER: &str = "Invalid provider selected";

/// Dispatches motivation requests to the selected LLM provider.
///
/// The service never fails past its boundary: unknown providers and
/// transport errors are folded into user-visible diagnostic text.
pub struct MotivationService {
    repositories: HashMap<Provider, Arc<dyn CompletionRepository>>,
    default_credentials: HashMap<Provider, String>,
}

impl MotivationService {
    pub fn new(
        repositories: HashMap<Provider, Arc<dyn CompletionRepository>>,
        default_credentials: HashMap<Provider, String>,
    ) -> Self {
        Self {
            repositories,
            default_credentials,
        }
    }

    /// Get a motivational response for `user_input` from `provider_id`.
    ///
    /// The credential comes from the request body when present, otherwise
    /// from the provider's environment-sourced default. It is held only
    /// for the duration of this call.
    pub async fn get_motivation(
        &self,
        user_input: &str,
        provider_id: &str,
        api_key: &str,
    ) -> String {
        let Some(provider) = Provider::parse(provider_id) else {
            tracing::warn!(provider = provider_id, "unknown provider requested");
            return INVALID_PROVIDER.to_string();
        };

        let Some(repository) = self.repositories.get(&provider) else {
            tracing::warn!(provider = %provider, "provider has no configured repository");
            return INVALID_PROVIDER.to_string();
        };

        let credential = if api_key.is_empty() {
            self.default_credentials
                .get(&provider)
                .cloned()
                .unwrap_or_default()
        } else {
            api_key.to_string()
        };

        let prompt = motivational_prompt(user_input);

        tracing::info!(
            provider = %provider,
            input_length = user_input.len(),
            "Motivation request"
        );

        let text = match repository.complete(&prompt, &credential).await {
            Ok(text) => text,
            Err(detail) => {
                tracing::error!(provider = %provider, error = %detail, "Provider call failed");
                format!("Error getting response from {provider}: {detail}")
            }
        };

        // Remove reference markers like [1], [2], etc.
        strip_citations(&text)
    }
}

/// Strip provider citation markers of the form `[<digits>]`.
pub fn strip_citations(text: &str) -> String {
    let citation_pattern = regex::Regex::new(r"\[\d+\]").unwrap();
    citation_pattern.replace_all(text, "").into_owned()
}
