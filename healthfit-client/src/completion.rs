use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use crate::{send, Error, Result};

#[mockall::automock]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the first choice's text, or `None` when the model produced no content.
    async fn complete(&self, system_prompt: &str, prompt: &str) -> Result<Option<String>>;
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl CompletionResponse {
    fn into_content(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
    }
}

/// Any OpenAI-compatible `/chat/completions` endpoint (Groq by default).
pub struct OpenAiCompletionProvider {
    base_url: String,
    api_key: String,
    model: String,
    client: reqwest::Client,
}

impl OpenAiCompletionProvider {
    fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            api_key,
            model,
            client: reqwest::Client::new(),
        }
    }
}

pub fn create(base_url: String, api_key: String, model: String) -> impl CompletionProvider {
    OpenAiCompletionProvider::new(base_url, api_key, model)
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionProvider {
    async fn complete(&self, system_prompt: &str, prompt: &str) -> Result<Option<String>> {
        let request = CompletionRequest {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: system_prompt,
                },
                Message {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        debug!("Requesting completion from {}", self.model);
        send(
            self.client
                .post(format!("{}/chat/completions", self.base_url))
                .bearer_auth(&self.api_key)
                .json(&request),
        )
        .await?
        .json::<CompletionResponse>()
        .await
        .map(CompletionResponse::into_content)
        .map_err(|_| Error::ResponseError)
    }
}

/// Used when no API key is configured: every request fails as unreachable.
pub struct OfflineCompletionProvider;

#[async_trait]
impl CompletionProvider for OfflineCompletionProvider {
    async fn complete(&self, _system_prompt: &str, _prompt: &str) -> Result<Option<String>> {
        Err(Error::CommunicationError)
    }
}
