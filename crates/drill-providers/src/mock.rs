//! Scripted provider for offline runs and tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use drill_core::error::ProviderError;
use drill_core::traits::{ChatRequest, ChatResponse, LlmProvider, TokenUsage};

/// Answers requests from a queue of canned replies.
///
/// Once the queue is empty every call gets the fallback reply, or fails
/// with a network error when there is none.
pub struct MockProvider {
    script: Mutex<VecDeque<Result<String, String>>>,
    fallback: Option<String>,
    call_count: AtomicU32,
    last_request: Mutex<Option<ChatRequest>>,
}

impl MockProvider {
    /// Replies in order; `Err` entries fail that call with the message.
    pub fn scripted(script: Vec<Result<String, String>>) -> Self {
        Self {
            script: Mutex::new(script.into()),
            fallback: None,
            call_count: AtomicU32::new(0),
            last_request: Mutex::new(None),
        }
    }

    /// Replies in order, then fails.
    pub fn new(responses: Vec<String>) -> Self {
        Self::scripted(responses.into_iter().map(Ok).collect())
    }

    /// Always returns the same reply.
    pub fn with_fixed_response(response: &str) -> Self {
        Self {
            fallback: Some(response.to_string()),
            ..Self::scripted(Vec::new())
        }
    }

    /// Every call fails.
    pub fn failing() -> Self {
        Self::scripted(Vec::new())
    }

    /// Number of calls made to this provider.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }

    /// The last request made to this provider.
    pub fn last_request(&self) -> Option<ChatRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    async fn complete(&self, request: &ChatRequest) -> anyhow::Result<ChatResponse> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        *self.last_request.lock().unwrap_or_else(|e| e.into_inner()) = Some(request.clone());

        let next = self
            .script
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        let content = match next {
            Some(Ok(content)) => content,
            Some(Err(message)) => return Err(ProviderError::NetworkError(message).into()),
            None => match &self.fallback {
                Some(content) => content.clone(),
                None => {
                    return Err(ProviderError::NetworkError("mock script exhausted".into()).into())
                }
            },
        };

        let prompt_tokens = request
            .messages
            .iter()
            .map(|m| m.content.len() / 4)
            .sum::<usize>() as u32;
        let completion_tokens = (content.len() / 4) as u32;

        Ok(ChatResponse {
            content,
            model: request.model.clone(),
            usage: TokenUsage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            },
            latency_ms: 1,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(prompt: &str) -> ChatRequest {
        ChatRequest::new("mock-model", "system", prompt, 0.0)
    }

    #[tokio::test]
    async fn fixed_response() {
        let provider = MockProvider::with_fixed_response("# Hello");
        let response = provider.complete(&request("anything")).await.unwrap();
        assert_eq!(response.content, "# Hello");
        let response = provider.complete(&request("again")).await.unwrap();
        assert_eq!(response.content, "# Hello");
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn scripted_in_order_then_exhausted() {
        let provider = MockProvider::scripted(vec![
            Ok("first".into()),
            Err("rate limited".into()),
            Ok("third".into()),
        ]);

        assert_eq!(provider.complete(&request("a")).await.unwrap().content, "first");
        let err = provider.complete(&request("b")).await.unwrap_err();
        assert!(err.to_string().contains("rate limited"));
        assert_eq!(provider.complete(&request("c")).await.unwrap().content, "third");
        assert!(provider.complete(&request("d")).await.is_err());

        assert_eq!(provider.call_count(), 4);
        assert_eq!(provider.last_request().unwrap().user_prompt(), Some("d"));
    }

    #[tokio::test]
    async fn failing_provider() {
        let provider = MockProvider::failing();
        let err = provider.complete(&request("x")).await.unwrap_err();
        assert!(err.downcast_ref::<ProviderError>().is_some());
    }
}
