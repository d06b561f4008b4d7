/// Text-generation failures. Always recovered inside the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum ExternalServiceError {
    #[error("{service} timed out after {timeout_ms}ms")]
    Timeout { service: String, timeout_ms: u64 },

    #[error("{service} returned a malformed response: {reason}")]
    MalformedResponse { service: String, reason: String },

    #[error("{service} unavailable: {reason}")]
    Unavailable { service: String, reason: String },
}
