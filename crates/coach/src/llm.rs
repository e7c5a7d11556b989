use crate::error::{CoachError, Result};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use utoipa::ToSchema;

pub const DEFAULT_API_URL: &str = "https://api.deepseek.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-chat";

/// Only the most recent turns are forwarded to the model.
pub const HISTORY_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: u32,
    pub top_p: f32,
    pub frequency_penalty: f32,
    pub presence_penalty: f32,
}

#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoiceMessage {
    pub content: Option<String>,
}

/// Client for the OpenAI-compatible DeepSeek chat completions API
pub struct DeepSeekClient {
    client: Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl DeepSeekClient {
    pub fn new(api_key: String, api_url: Option<String>) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(CoachError::MissingApiKey);
        }

        let client = Client::builder().timeout(Duration::from_secs(60)).build()?;

        Ok(Self {
            client,
            api_url: api_url.unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Assembles system prompt, trimmed history and the new user turn.
    pub fn build_request(&self, system_prompt: &str, history: &[ChatMessage], user_message: &str) -> ChatCompletionRequest {
        let skip = history.len().saturating_sub(HISTORY_LIMIT);

        let mut messages = Vec::with_capacity(HISTORY_LIMIT + 2);
        messages.push(ChatMessage::new(ChatRole::System, system_prompt));
        messages.extend(history.iter().skip(skip).cloned());
        messages.push(ChatMessage::new(ChatRole::User, user_message));

        ChatCompletionRequest {
            model: self.model.clone(),
            messages,
            temperature: 0.7,
            max_tokens: 800,
            top_p: 1.0,
            frequency_penalty: 0.0,
            presence_penalty: 0.0,
        }
    }

    /// Returns the raw reply text, action line included.
    pub async fn chat(&self, system_prompt: &str, history: &[ChatMessage], user_message: &str) -> Result<String> {
        let request = self.build_request(system_prompt, history, user_message);

        tracing::info!(
            "Sending chat request (model: {}, {} messages, prompt length: {} chars)",
            self.model,
            request.messages.len(),
            system_prompt.len()
        );

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            tracing::error!("Chat API error ({}): {}", status, error_text);
            return Err(CoachError::ApiError {
                status: status.as_u16(),
                message: error_text,
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;

        let reply = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| CoachError::ApiError {
                status: 200,
                message: "Response contained no message content".to_string(),
            })?;

        tracing::info!("Chat reply received ({} chars)", reply.len());
        Ok(reply)
    }
}
