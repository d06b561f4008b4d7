use super::{ConfigurationError, ExternalServiceError, SessionError};

/// Top-level error type for the Jackpot engine.
#[derive(Debug, thiserror::Error)]
pub enum JackpotError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("session error: {0}")]
    Session(#[from] SessionError),

    #[error("external service error: {0}")]
    ExternalService(#[from] ExternalServiceError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("config parse error: {0}")]
    ConfigError(#[from] toml::de::Error),
}

impl JackpotError {
    /// Whether the caller can keep using the engine after this error.
    ///
    /// Session and external-service errors reject or degrade one request.
    /// Configuration errors mean the engine never became usable.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Configuration(_) | Self::ConfigError(_))
    }

    /// Shorthand for the out-of-turns rejection.
    pub fn out_of_turns(clue_count: usize, max: usize) -> Self {
        SessionError::OutOfTurns { clue_count, max }.into()
    }

    /// Shorthand for an unknown session id.
    pub fn session_not_found(session_id: impl Into<String>) -> Self {
        SessionError::SessionNotFound {
            session_id: session_id.into(),
        }
        .into()
    }
}

/// Convenience result alias.
pub type JackpotResult<T> = Result<T, JackpotError>;
