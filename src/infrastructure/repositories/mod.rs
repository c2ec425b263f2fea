pub mod chat_completions_repository;
pub mod completion_repository;
pub mod gemini_repository;
pub mod google_tts_repository;
pub mod huggingface_repository;
pub mod openai_repository;
pub mod openai_tts_repository;
pub mod tts_repository;

pub use chat_completions_repository::ChatCompletionsRepository;
pub use completion_repository::CompletionRepository;
pub use gemini_repository::GeminiRepository;
pub use google_tts_repository::GoogleTtsRepository;
pub use huggingface_repository::HuggingFaceRepository;
pub use openai_repository::OpenAiRepository;
pub use openai_tts_repository::OpenAiTtsRepository;
pub use tts_repository::TtsRepository;
