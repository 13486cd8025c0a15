use thiserror::Error;

/// Failures inside the executor client.
///
/// `send` never surfaces these: it folds them into a generic connection
/// failure. The auxiliary endpoints and server parsing return them directly.
#[derive(Debug, Error)]
pub enum ExecutorError {
    #[error("invalid server '{input}': {reason}")]
    InvalidServer { input: String, reason: String },

    #[error("invalid header '{0}' (expected KEY=VALUE with a valid header name and value)")]
    InvalidHeader(String),

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("server rejected the request: {0}")]
    Rejected(String),

    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("no WhatsApp number configured (use --whatsapp or DRIVECMD_WHATSAPP)")]
    MissingIdentity,
}

impl ExecutorError {
    pub fn invalid_server(input: &str, reason: impl Into<String>) -> Self {
        ExecutorError::InvalidServer {
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the server rejected the caller's credentials.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ExecutorError::Status { status: 401, .. })
    }
}
