use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LlmError {
    #[error("language model API key not configured")]
    MissingApiKey,

    #[error("request to language model failed: {0}")]
    Transport(String),

    #[error("language model returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("language model returned an unexpected payload: {0}")]
    Payload(String),

    #[error("language model returned no text")]
    EmptyCompletion,
}

/// A text-completion service: prompt in, completion text out.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}
