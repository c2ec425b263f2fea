use async_trait::async_trait;

/// Repository for LLM completion calls.
/// Abstracts the underlying provider (Perplexity, OpenAI, Gemini, ...)
///
/// Implementations are responsible for:
/// - Building the provider-specific request shape
/// - Extracting the completion text from the provider-specific response
/// - Folding transport failures into a readable error string
/// - Holding the credential only for the duration of the call
#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// Request a completion for `prompt`, authenticated with `credential`
    ///
    /// # Errors
    /// Returns a human-readable error string carrying the status line and
    /// body when the provider answered, or the transport error otherwise
    async fn complete(&self, prompt: &str, credential: &str) -> Result<String, String>;
}
