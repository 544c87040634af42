//! OpenAI-compatible chat completions client

use crate::config::EnhancerConfig;
use crate::error::{Result, ResumeScorerError};
use crate::llm::enhancer::{EnhancementLabel, EnhancementRequest, TextEnhancer};
use crate::llm::prompts::PromptTemplates;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

pub struct OpenAiEnhancer {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
    templates: PromptTemplates,
}

impl OpenAiEnhancer {
    pub fn from_config(config: &EnhancerConfig) -> Result<Self> {
        let api_key = config.resolve_api_key().ok_or_else(|| {
            ResumeScorerError::Configuration(
                "No API key configured for the enhancer (set enhancer.api_key or OPENAI_API_KEY)".to_string(),
            )
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            templates: PromptTemplates::default(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request<'a>(&'a self, label: EnhancementLabel, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: label.max_tokens().min(self.max_tokens),
            temperature: self.temperature,
        }
    }
}

impl TextEnhancer for OpenAiEnhancer {
    async fn enhance(&self, label: EnhancementLabel, request: &EnhancementRequest<'_>) -> Result<String> {
        let prompt = self.templates.render(label, request);
        let body = self.build_request(label, &prompt);

        log::debug!("Requesting {} enhancement from {} ({})", label, self.endpoint, self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(ResumeScorerError::Enhancement(api_error_message(status.as_u16(), &text)));
        }

        parse_completion(&text)
    }
}

fn api_error_message(status: u16, body: &str) -> String {
    let message = serde_json::from_str::<ApiError>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_string());
    format!("API error (status {}): {}", status, message)
}

fn parse_completion(body: &str) -> Result<String> {
    let response: ChatResponse = serde_json::from_str(body)?;
    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or_else(|| ResumeScorerError::Enhancement("Model returned empty content".to_string()))
}
