use thiserror::Error;

/// Failures the chat core can produce.
#[derive(Debug, Error)]
pub enum ChatError {
    /// A role string outside `system`, `user`, and `assistant`.
    #[error("unknown role '{0}'")]
    InvalidRole(String),

    /// The backend could not produce a reply. Covers an unreachable
    /// endpoint, an error status, a timed-out request, and a body that
    /// does not parse.
    #[error("inference backend unavailable: {0}")]
    InferenceUnavailable(String),
}
