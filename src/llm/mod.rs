pub mod openrouter;
pub mod prompts;

use async_trait::async_trait;

pub use openrouter::OpenRouterClient;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("completion service is not configured")]
    NotConfigured,
    #[error("completion request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("completion service returned HTTP {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("could not decode completion response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("completion service returned no answer")]
    EmptyResponse,
}

/// What the assistant does after a failed completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    Fallback,
}

impl CompletionError {
    pub fn recovery(&self) -> Recovery {
        match self {
            CompletionError::NotConfigured
            | CompletionError::Http(_)
            | CompletionError::Status { .. }
            | CompletionError::Decode(_)
            | CompletionError::EmptyResponse => Recovery::Fallback,
        }
    }
}

/// Black-box text completion grounded on a context block.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, context: &str, question: &str) -> Result<String, CompletionError>;
}
