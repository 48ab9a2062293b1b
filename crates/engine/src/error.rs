use reqwest::StatusCode;

pub type Result<T> = std::result::Result<T, AgentError>;

/// Failures raised while running an agent invocation.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    #[error("Could not load AWS credentials: {0}")]
    Credentials(String),

    #[error("Failed to sign request: {0}")]
    Signing(String),

    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Model request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("Agent stopped after {0} model calls without a final answer")]
    MaxIterations(usize),

    #[error("Model returned no message")]
    EmptyResponse,
}

impl AgentError {
    pub fn api<S: Into<String>>(status: StatusCode, message: S) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }
}
