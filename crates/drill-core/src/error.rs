//! Error types.
//!
//! `ProviderError` lives here rather than in `drill-providers` so the
//! session can downcast and classify a failed model call without string
//! matching.

use thiserror::Error;

/// Errors that can occur when calling a chat-completion endpoint.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// No API key was configured.
    #[error("no API key configured (set OPENAI_API_KEY or provider.api_key)")]
    MissingApiKey,

    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The response parsed but carried no text.
    #[error("model returned an empty response")]
    EmptyResponse,

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ProviderError {
    /// Returns `true` if retrying the same call cannot succeed without a
    /// configuration change.
    pub fn is_permanent(&self) -> bool {
        matches!(
            self,
            ProviderError::MissingApiKey | ProviderError::AuthenticationFailed(_)
        )
    }
}

/// Errors surfaced by [`crate::session::Session`] operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// "Continue" was requested with no active multi-part sequence.
    #[error("no multi-part problem in progress")]
    NoProgress,

    /// The model call failed; no state was changed.
    #[error("generation failed: {0:#}")]
    GenerationFailed(#[source] anyhow::Error),

    /// The history or progress document could not be written.
    #[error("failed to persist state: {0:#}")]
    Persist(#[source] anyhow::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permanent_errors() {
        assert!(ProviderError::MissingApiKey.is_permanent());
        assert!(ProviderError::AuthenticationFailed("bad key".into()).is_permanent());
        assert!(!ProviderError::RateLimited { retry_after_ms: 5000 }.is_permanent());
        assert!(!ProviderError::NetworkError("refused".into()).is_permanent());
    }

    #[test]
    fn generation_failed_shows_cause_chain() {
        let cause = anyhow::Error::new(ProviderError::Timeout(120)).context("calling gpt-4o");
        let err = SessionError::GenerationFailed(cause);
        let msg = err.to_string();
        assert!(msg.contains("generation failed"));
        assert!(msg.contains("timed out after 120s"));
    }
}
