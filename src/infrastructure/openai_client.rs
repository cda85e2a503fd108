// OpenAI-compatible advice client
use crate::application::advice_generator::AdviceGenerator;
use crate::domain::advice::{AdvicePrompt, AdviceResponse};
use crate::domain::error::AdviceError;
use crate::infrastructure::chat_models::{ChatMessage, ChatRequest, ChatResponse};
use crate::infrastructure::config::AdviceSettings;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

pub const SYSTEM_INSTRUCTION: &str = "You are an environmental specialist. Provide concise, personalized water-saving advice based on the user's input and data.";

#[derive(Clone)]
pub struct OpenAiAdviceClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
    api_key_env: String,
    max_retries: u32,
}

/// One failed attempt, and whether another attempt may succeed.
#[derive(Debug)]
struct CallFailure {
    message: String,
    transient: bool,
}

impl CallFailure {
    fn from_transport(e: reqwest::Error) -> Self {
        Self {
            transient: e.is_timeout() || e.is_connect(),
            message: format!("request failed: {e}"),
        }
    }

    fn from_status(status: StatusCode, body: &str) -> Self {
        Self {
            transient: status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error(),
            message: format!("API error {status}: {body}"),
        }
    }

    fn permanent(message: String) -> Self {
        Self {
            message,
            transient: false,
        }
    }
}

impl OpenAiAdviceClient {
    pub fn new(settings: &AdviceSettings, api_key: Option<String>) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key,
            api_key_env: settings.api_key_env.clone(),
            max_retries: settings.max_retries.min(1),
        })
    }

    async fn call_api(&self, request: &ChatRequest, api_key: &str) -> Result<String, CallFailure> {
        let resp = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(CallFailure::from_transport)?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(CallFailure::from_status(status, &body));
        }

        let chat_resp: ChatResponse = resp.json().await.map_err(|e| {
            CallFailure::permanent(format!("failed to parse chat completion: {e}"))
        })?;

        tracing::debug!(
            model = ?chat_resp.model,
            usage = ?chat_resp.usage,
            "Chat completion received"
        );

        chat_resp
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content.unwrap_or_default())
            .ok_or_else(|| CallFailure::permanent("no choices in chat completion".to_string()))
    }
}

#[async_trait]
impl AdviceGenerator for OpenAiAdviceClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: AdvicePrompt) -> Result<AdviceResponse, AdviceError> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AdviceError::Configuration(format!("{} is not set", self.api_key_env))
        })?;

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(SYSTEM_INSTRUCTION),
                ChatMessage::user(prompt.as_str()),
            ],
        };

        tracing::debug!(
            model = %self.model,
            prompt_length = prompt.as_str().len(),
            "Calling chat completions API"
        );

        let mut attempt = 0;
        loop {
            match self.call_api(&request, api_key).await {
                Ok(text) => return Ok(AdviceResponse::new(text)),
                Err(failure) if failure.transient && attempt < self.max_retries => {
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        error = %failure.message,
                        "Transient advice failure, retrying"
                    );
                }
                Err(failure) => {
                    tracing::error!(error = %failure.message, "Advice request failed");
                    return Err(AdviceError::GenerationService(failure.message));
                }
            }
        }
    }
}
