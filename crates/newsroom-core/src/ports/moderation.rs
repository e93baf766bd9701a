use async_trait::async_trait;

/// Content-safety check against an external moderation service.
#[async_trait]
pub trait ContentModerator: Send + Sync {
    /// Returns `true` when the upstream service flags the text.
    async fn check_safety(&self, text: &str) -> Result<bool, ModerationError>;
}

/// Moderation call errors.
#[derive(Debug, thiserror::Error)]
pub enum ModerationError {
    /// The upstream service answered with an error payload.
    #[error("{0}")]
    Upstream(String),

    #[error("moderation request failed: {0}")]
    Transport(String),

    #[error("unexpected moderation response: {0}")]
    MalformedResponse(String),
}
