use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const DEFAULT_PROMPT: &str = "Hello";
pub const SESSION_ID_HEADER: &str = "x-amzn-bedrock-agentcore-runtime-session-id";

// Invocation endpoint
#[derive(Deserialize, Debug, Default)]
pub struct InvocationRequest {
    pub prompt: Option<String>,
    /// Anything else the caller sent; accepted and ignored.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl InvocationRequest {
    pub fn prompt(&self) -> &str {
        self.prompt.as_deref().unwrap_or(DEFAULT_PROMPT)
    }
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct InvocationResponse {
    pub response: String,
    pub model: Option<String>,
}

// Health
#[derive(Serialize, Deserialize, Debug)]
pub struct PingResponse {
    pub status: String,
    pub time_of_last_update: i64,
}
