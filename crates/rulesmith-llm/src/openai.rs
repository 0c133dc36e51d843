//! OpenAI Provider Implementation
//!
//! Integration with OpenAI-compatible chat completion APIs. Any server that
//! speaks `POST /chat/completions` (OpenAI, Azure-style gateways, a local
//! Ollama or vLLM instance) can be targeted by changing the base URL.
//!
//! # Features
//!
//! - Async HTTP communication, exposed through the synchronous `LlmProvider` trait
//! - Configurable endpoint, model, temperature and request timeout
//! - Single attempt per prompt; failures are reported, never retried
//!
//! # Examples
//!
//! ```no_run
//! use rulesmith_llm::OpenAiProvider;
//! use rulesmith_domain::LlmProvider;
//!
//! # fn example() -> Result<(), rulesmith_llm::LlmError> {
//! let provider = OpenAiProvider::new("sk-...", "gpt-4o-mini")?
//!     .with_temperature(0.0);
//! let answer = provider.generate("Return an empty JSON object")?;
//! # Ok(())
//! # }
//! ```

use crate::LlmError;
use rulesmith_domain::LlmProvider as LlmProviderTrait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default OpenAI API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default timeout for LLM requests (120 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default sampling temperature (deterministic)
pub const DEFAULT_TEMPERATURE: f32 = 0.0;

/// OpenAI-compatible chat completions provider
///
/// Owns a current-thread tokio runtime so that each synchronous `generate`
/// call blocks until the service answers. Must not be called from inside
/// another tokio runtime.
pub struct OpenAiProvider {
    base_url: String,
    model: String,
    api_key: String,
    temperature: f32,
    timeout: Duration,
    client: reqwest::Client,
    runtime: tokio::runtime::Runtime,
}

/// Request body for the chat completions API
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Response from the chat completions API
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `api_key`: Bearer token for the service
    /// - `model`: Model to use (e.g., "gpt-4o-mini")
    ///
    /// # Errors
    ///
    /// Returns `LlmError::MissingCredential` if `api_key` is blank, and
    /// `LlmError::Other` if the HTTP client or runtime cannot be built.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::MissingCredential(
                "an API key is required for the extraction service".to_string(),
            ));
        }

        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?;

        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
            api_key,
            temperature: DEFAULT_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            client,
            runtime,
        })
    }

    /// Point the provider at a different OpenAI-compatible server
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the sampling temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the per-request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    /// Send `prompt` as a single user message and return the reply text
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The server cannot be reached
    /// - The model is unknown (HTTP 404)
    /// - The server is rate limiting (HTTP 429)
    /// - The response has no message content
    pub async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        let request_body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: self.temperature,
        };

        debug!("POST {} (model {}, {} prompt chars)", self.endpoint(), self.model, prompt.len());

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(LlmError::Communication(format!("HTTP {}: {}", status, error_text)));
        }

        let completion = response
            .json::<ChatCompletionResponse>()
            .await
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        first_message_content(completion)
    }
}

fn first_message_content(completion: ChatCompletionResponse) -> Result<String, LlmError> {
    completion
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| LlmError::InvalidResponse("Response contained no message content".to_string()))
}

impl LlmProviderTrait for OpenAiProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        // Blocking wrapper for the async client
        self.runtime.block_on(self.complete(prompt))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
