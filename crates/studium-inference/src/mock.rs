//! Mock completion provider for deterministic testing.
//!
//! ## Usage
//!
//! ```rust
//! use studium_inference::mock::MockProvider;
//! use studium_core::{CompletionProvider, ModelParams, PromptMessage};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let provider = MockProvider::new().with_response("Front: A\nBack: B");
//! let candidates = provider
//!     .complete(&[PromptMessage::user("hi")], &ModelParams::default())
//!     .await
//!     .unwrap();
//! assert_eq!(candidates, vec!["Front: A\nBack: B".to_string()]);
//! # }
//! ```

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use studium_core::{CompletionProvider, Error, ModelParams, PromptMessage, Result};

/// One recorded call for assertions.
#[derive(Debug, Clone)]
pub struct MockCall {
    pub messages: Vec<PromptMessage>,
    pub params: ModelParams,
}

#[derive(Debug, Default)]
struct MockState {
    /// Scripted per-call candidate lists, consumed front to back.
    scripted: VecDeque<Vec<String>>,
    /// Fallback candidates once the script is exhausted.
    default_candidates: Vec<String>,
    /// When set, every call fails with this provider error.
    failure: Option<String>,
    calls: Vec<MockCall>,
}

/// Mock completion provider with builder configuration and a call log.
#[derive(Clone)]
pub struct MockProvider {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create a mock that returns a single "Mock response" candidate.
    pub fn new() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                default_candidates: vec!["Mock response".to_string()],
                ..Default::default()
            })),
        }
    }

    /// Set the fallback response (a single candidate).
    pub fn with_response(self, response: impl Into<String>) -> Self {
        self.state.lock().unwrap().default_candidates = vec![response.into()];
        self
    }

    /// Set the fallback candidate list verbatim. An empty list makes the
    /// provider return zero candidates, for exercising `EmptyCompletion`
    /// handling.
    pub fn with_candidates(self, candidates: Vec<String>) -> Self {
        self.state.lock().unwrap().default_candidates = candidates;
        self
    }

    /// Queue a scripted candidate list for the next un-scripted call.
    /// Scripted responses are consumed in order before the fallback applies.
    pub fn with_scripted(self, candidates: Vec<String>) -> Self {
        self.state.lock().unwrap().scripted.push_back(candidates);
        self
    }

    /// Make every call fail with `Error::Provider(message)`.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.state.lock().unwrap().failure = Some(message.into());
        self
    }

    /// All recorded calls.
    pub fn calls(&self) -> Vec<MockCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Number of recorded calls.
    pub fn call_count(&self) -> usize {
        self.state.lock().unwrap().calls.len()
    }
}

#[async_trait]
impl CompletionProvider for MockProvider {
    async fn complete(
        &self,
        messages: &[PromptMessage],
        params: &ModelParams,
    ) -> Result<Vec<String>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(MockCall {
            messages: messages.to_vec(),
            params: params.clone(),
        });

        if let Some(message) = &state.failure {
            return Err(Error::Provider(message.clone()));
        }
        if let Some(scripted) = state.scripted.pop_front() {
            return Ok(scripted);
        }
        Ok(state.default_candidates.clone())
    }

    fn model_name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_default_response() {
        let provider = MockProvider::new();
        let candidates = provider
            .complete(&[PromptMessage::user("x")], &ModelParams::default())
            .await
            .unwrap();
        assert_eq!(candidates, vec!["Mock response".to_string()]);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_scripted_then_fallback() {
        let provider = MockProvider::new()
            .with_scripted(vec!["first".into()])
            .with_response("fallback");

        let first = provider
            .complete(&[], &ModelParams::default())
            .await
            .unwrap();
        let second = provider
            .complete(&[], &ModelParams::default())
            .await
            .unwrap();
        assert_eq!(first, vec!["first".to_string()]);
        assert_eq!(second, vec!["fallback".to_string()]);
    }

    #[tokio::test]
    async fn test_empty_candidates() {
        let provider = MockProvider::new().with_candidates(vec![]);
        let candidates = provider
            .complete(&[], &ModelParams::default())
            .await
            .unwrap();
        assert!(candidates.is_empty());
    }

    #[tokio::test]
    async fn test_failure_mode() {
        let provider = MockProvider::new().with_failure("connection reset");
        let err = provider
            .complete(&[], &ModelParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Provider(_)));
        // The failed call is still recorded.
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn test_call_log_records_messages() {
        let provider = MockProvider::new();
        provider
            .complete(
                &[PromptMessage::system("s"), PromptMessage::user("u")],
                &ModelParams::default(),
            )
            .await
            .unwrap();

        let calls = provider.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].messages.len(), 2);
        assert_eq!(calls[0].messages[1].content, "u");
    }
}
