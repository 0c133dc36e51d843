//! Rulesmith LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `rulesmith-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI-compatible chat completions API
//!
//! # Examples
//!
//! ```
//! use rulesmith_llm::MockProvider;
//! use rulesmith_domain::LlmProvider;
//!
//! let provider = MockProvider::new("Hello from LLM!");
//! let result = provider.generate("test prompt").unwrap();
//! assert_eq!(result, "Hello from LLM!");
//! ```

#![warn(missing_docs)]

pub mod openai;

use rulesmith_domain::LlmProvider as LlmProviderTrait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use thiserror::Error;

pub use openai::OpenAiProvider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// No API key was supplied for the service
    #[error("Missing credential: {0}")]
    MissingCredential(String),

    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error,
}

#[derive(Debug, Default)]
struct MockState {
    by_prompt: HashMap<String, MockReply>,
    queued: VecDeque<MockReply>,
    prompts: Vec<String>,
}

/// Mock LLM provider for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Lookup order for each call: an exact-prompt response, then the next
/// queued response, then the default response.
///
/// # Examples
///
/// ```
/// use rulesmith_llm::MockProvider;
/// use rulesmith_domain::LlmProvider;
///
/// // Simple fixed response
/// let provider = MockProvider::new("Fixed response");
/// assert_eq!(provider.generate("any prompt").unwrap(), "Fixed response");
///
/// // Responses consumed in call order
/// let provider = MockProvider::default();
/// provider.push_response("first");
/// provider.push_error();
/// assert_eq!(provider.generate("a").unwrap(), "first");
/// assert!(provider.generate("b").is_err());
/// assert_eq!(provider.generate("c").unwrap(), "Default mock response");
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    model: String,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            model: "mock".to_string(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Set the model name reported in run metadata
    pub fn with_model_name(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Add a specific response for a given prompt
    pub fn add_response(&self, prompt: impl Into<String>, response: impl Into<String>) {
        self.state
            .lock()
            .unwrap()
            .by_prompt
            .insert(prompt.into(), MockReply::Text(response.into()));
    }

    /// Configure to return an error for a specific prompt
    pub fn add_error(&self, prompt: impl Into<String>) {
        self.state
            .lock()
            .unwrap()
            .by_prompt
            .insert(prompt.into(), MockReply::Error);
    }

    /// Queue a response for the next call that has no prompt-specific reply
    pub fn push_response(&self, response: impl Into<String>) {
        self.state
            .lock()
            .unwrap()
            .queued
            .push_back(MockReply::Text(response.into()));
    }

    /// Queue an error for the next call that has no prompt-specific reply
    pub fn push_error(&self) {
        self.state.lock().unwrap().queued.push_back(MockReply::Error);
    }

    /// Get the number of times generate was called
    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().prompts.len()
    }

    /// Prompts received so far, in call order
    pub fn prompts(&self) -> Vec<String> {
        self.state.lock().unwrap().prompts.clone()
    }

    /// Forget recorded prompts
    pub fn reset_call_count(&self) {
        self.state.lock().unwrap().prompts.clear();
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("Default mock response")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn generate(&self, prompt: &str) -> Result<String, Self::Error> {
        let mut guard = self.state.lock().unwrap();
        let state = &mut *guard;
        state.prompts.push(prompt.to_string());

        let reply = state
            .by_prompt
            .get(prompt)
            .cloned()
            .or_else(|| state.queued.pop_front());

        match reply {
            Some(MockReply::Text(text)) => Ok(text),
            Some(MockReply::Error) => Err(LlmError::Other("Mock error".to_string())),
            None => Ok(self.default_response.clone()),
        }
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_provider_default() {
        let provider = MockProvider::new("Test response");
        let result = provider.generate("any prompt");
        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "Test response");
    }

    #[test]
    fn test_mock_provider_specific_responses() {
        let provider = MockProvider::default();
        provider.add_response("hello", "world");
        provider.add_response("foo", "bar");

        assert_eq!(provider.generate("hello").unwrap(), "world");
        assert_eq!(provider.generate("foo").unwrap(), "bar");
        assert_eq!(provider.generate("unknown").unwrap(), "Default mock response");
    }

    #[test]
    fn test_mock_provider_queue_order() {
        let provider = MockProvider::new("fallback");
        provider.push_response("one");
        provider.push_response("two");

        assert_eq!(provider.generate("a").unwrap(), "one");
        assert_eq!(provider.generate("b").unwrap(), "two");
        assert_eq!(provider.generate("c").unwrap(), "fallback");
    }

    #[test]
    fn test_prompt_specific_reply_does_not_consume_queue() {
        let provider = MockProvider::new("fallback");
        provider.add_response("pinned", "pinned reply");
        provider.push_response("queued");

        assert_eq!(provider.generate("pinned").unwrap(), "pinned reply");
        assert_eq!(provider.generate("other").unwrap(), "queued");
    }

    #[test]
    fn test_mock_provider_call_count() {
        let provider = MockProvider::new("test");

        assert_eq!(provider.call_count(), 0);

        provider.generate("prompt1").unwrap();
        assert_eq!(provider.call_count(), 1);

        provider.generate("prompt2").unwrap();
        assert_eq!(provider.call_count(), 2);
        assert_eq!(provider.prompts(), vec!["prompt1", "prompt2"]);

        provider.reset_call_count();
        assert_eq!(provider.call_count(), 0);
    }

    #[test]
    fn test_mock_provider_error() {
        let provider = MockProvider::default();
        provider.add_error("bad prompt");

        let result = provider.generate("bad prompt");
        assert!(matches!(result.unwrap_err(), LlmError::Other(_)));
    }

    #[test]
    fn test_pinned_replies_through_shared_handle() {
        let provider = MockProvider::default();
        let handle = provider.clone();
        handle.add_response("hello", "world");
        handle.add_error("bad prompt");

        assert_eq!(provider.generate("hello").unwrap(), "world");
        assert!(provider.generate("bad prompt").is_err());
    }

    #[test]
    fn test_mock_provider_model_name() {
        assert_eq!(MockProvider::default().model_name(), "mock");
        let provider = MockProvider::default().with_model_name("gpt-test");
        assert_eq!(provider.model_name(), "gpt-test");
    }

    #[test]
    fn test_mock_provider_clone() {
        let provider1 = MockProvider::new("test");
        let provider2 = provider1.clone();

        provider1.generate("test").unwrap();

        // Both share state through the Arc
        assert_eq!(provider1.call_count(), 1);
        assert_eq!(provider2.call_count(), 1);
    }
}
