use std::time::Duration;

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument};

use super::prompts::{chat_messages, ChatMessage};
use super::{CompletionError, CompletionService};
use crate::config::LlmConfig;

/// OpenAI-compatible chat completions client pointed at OpenRouter.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenRouterClient {
    /// `None` when no usable API key is configured.
    pub fn from_config(config: &LlmConfig) -> anyhow::Result<Option<Self>> {
        let Some(api_key) = config.usable_api_key() else {
            return Ok(None);
        };
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Some(Self {
            client,
            api_key: api_key.to_string(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        }))
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[async_trait]
impl CompletionService for OpenRouterClient {
    #[instrument(skip(self, context), fields(model = %self.model))]
    async fn complete(&self, context: &str, question: &str) -> Result<String, CompletionError> {
        let request = ChatRequest {
            model: &self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            messages: chat_messages(context, question),
        };

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%status, "completion service error");
            return Err(CompletionError::Status { status, body });
        }

        let raw = response.text().await?;
        let answer = extract_answer(&raw)?;
        debug!(chars = answer.len(), "completion received");
        Ok(answer)
    }
}

fn extract_answer(raw: &str) -> Result<String, CompletionError> {
    let parsed: ChatResponse = serde_json::from_str(raw)?;
    let content = parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .unwrap_or_default();
    let answer = strip_reasoning(&content);
    if answer.is_empty() {
        return Err(CompletionError::EmptyResponse);
    }
    Ok(answer)
}

/// Reasoning models may prepend a `<think>` block; only the answer is shown.
fn strip_reasoning(content: &str) -> String {
    lazy_static! {
        static ref THINK_RE: Regex = Regex::new(r"(?s)<think>.*?</think>").unwrap();
    }
    THINK_RE.replace_all(content, "").trim().to_string()
}
