use axum::{
    extract::{FromRequestParts, Json, State},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::Instrument;

use crate::error::AgentError;
use crate::state::AppState;

use super::types::*;

/// Per-request context supplied by the hosting runtime. Only logged.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub session_id: Option<String>,
}

impl<S: Send + Sync> FromRequestParts<S> for RequestContext {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let session_id = parts
            .headers
            .get(SESSION_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        Ok(Self { session_id })
    }
}

/// Invocation failure surfaced as `500 {"error": ...}`.
#[derive(Debug)]
pub struct ApiError(AgentError);

impl From<AgentError> for ApiError {
    fn from(e: AgentError) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}

pub async fn handle_invocation(
    State(state): State<AppState>,
    context: RequestContext,
    Json(req): Json<InvocationRequest>,
) -> Result<Json<InvocationResponse>, ApiError> {
    let request_id = uuid::Uuid::new_v4().to_string();
    let span = tracing::info_span!(
        "invocation",
        %request_id,
        session_id = context.session_id.as_deref().unwrap_or("-"),
    );

    async move {
        let prompt = req.prompt();
        tracing::info!(prompt_chars = prompt.chars().count(), "invoking agent");

        let agent = state.build_agent();
        let response = agent.invoke(prompt).await.map_err(|e| {
            tracing::error!(error = %e, "invocation failed");
            ApiError::from(e)
        })?;

        tracing::info!(
            stop_reason = ?response.stop_reason,
            total_tokens = response.usage.total_tokens,
            "invocation complete"
        );

        Ok::<_, ApiError>(Json(InvocationResponse {
            response: response.to_string(),
            model: state.config.model_id.clone(),
        }))
    }
    .instrument(span)
    .await
}

pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        status: "Healthy".to_string(),
        time_of_last_update: chrono::Utc::now().timestamp(),
    })
}
