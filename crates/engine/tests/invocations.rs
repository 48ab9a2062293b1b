use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{HeaderMap, Request, StatusCode, Uri};
use serde_json::{json, Value};
use tower::ServiceExt;

use parv_engine::agent::DEFAULT_MODEL_ID;
use parv_engine::agent::types::{ConverseOutput, ConverseRequest, ConverseResponse, Message, StopReason, Usage};
use parv_engine::api::create_router;
use parv_engine::error::Result;
use parv_engine::{AgentError, AppState, Config, ModelClient};
use parv_shared::ToolRegistry;

/// Answers every prompt with "echo: <prompt>" and remembers what it was asked.
#[derive(Default)]
struct EchoModel {
    prompts: Mutex<Vec<String>>,
    fail: bool,
}

#[async_trait]
impl ModelClient for EchoModel {
    async fn converse(&self, request: ConverseRequest) -> Result<ConverseResponse> {
        let prompt = request.messages[0].text();
        self.prompts.lock().unwrap().push(prompt.clone());

        if self.fail {
            return Err(AgentError::api(reqwest::StatusCode::TOO_MANY_REQUESTS, "Too many tokens"));
        }

        Ok(ConverseResponse {
            output: ConverseOutput {
                message: Some(Message::assistant(format!("echo: {}", prompt))),
            },
            stop_reason: StopReason::EndTurn,
            usage: Usage::default(),
        })
    }

    fn name(&self) -> &str {
        "echo"
    }
}

fn app(model_id: Option<&str>, model: Arc<EchoModel>) -> axum::Router {
    let config = Config {
        model_id: model_id.map(str::to_string),
        ..Config::default()
    };
    let state = AppState::new(config, ToolRegistry::builtin().unwrap(), model);
    create_router(state)
}

async fn post_invocation(app: axum::Router, body: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/invocations")
                .header("content-type", "application/json")
                .header("x-amzn-bedrock-agentcore-runtime-session-id", "session-123")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn prompt_is_forwarded_verbatim() {
    let model = Arc::new(EchoModel::default());
    let (status, body) = post_invocation(
        app(Some("us.anthropic.claude-sonnet-4-5-20250929-v1:0"), model.clone()),
        r#"{"prompt": "X"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "response": "echo: X",
            "model": "us.anthropic.claude-sonnet-4-5-20250929-v1:0"
        })
    );
    assert_eq!(*model.prompts.lock().unwrap(), vec!["X".to_string()]);
}

#[tokio::test]
async fn missing_prompt_defaults_to_hello() {
    let model = Arc::new(EchoModel::default());
    let (status, body) = post_invocation(app(Some("m"), model.clone()), r#"{"other": 1}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "echo: Hello");
    assert_eq!(*model.prompts.lock().unwrap(), vec!["Hello".to_string()]);
}

#[tokio::test]
async fn unset_model_is_null_and_agent_still_runs() {
    let model = Arc::new(EchoModel::default());
    let (status, body) = post_invocation(app(None, model.clone()), r#"{"prompt": "hi"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["model"], Value::Null);
    assert_eq!(model.prompts.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn model_failure_becomes_server_error() {
    let model = Arc::new(EchoModel {
        fail: true,
        ..EchoModel::default()
    });
    let (status, body) = post_invocation(app(Some("m"), model), r#"{"prompt": "hi"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("Too many tokens"));
}

#[tokio::test]
async fn malformed_body_is_rejected_by_the_framework() {
    let model = Arc::new(EchoModel::default());
    let (status, _) = post_invocation(app(Some("m"), model.clone()), "{not json").await;

    assert!(status.is_client_error());
    assert!(model.prompts.lock().unwrap().is_empty());
}

#[tokio::test]
async fn ping_reports_healthy() {
    let model = Arc::new(EchoModel::default());
    let response = app(None, model)
        .oneshot(Request::builder().uri("/ping").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "Healthy");
    assert!(body["time_of_last_update"].is_i64());
}

/// Bedrock runtime stand-in; records each request's path and headers.
async fn bedrock_stub() -> (String, Arc<Mutex<Vec<(String, HeaderMap)>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let recorder = seen.clone();

    let app = axum::Router::new().fallback(move |uri: Uri, headers: HeaderMap| {
        let recorder = recorder.clone();
        async move {
            recorder.lock().unwrap().push((uri.path().to_string(), headers));
            axum::Json(json!({
                "output": { "message": { "role": "assistant", "content": [{ "text": "Hello from Bedrock" }] } },
                "stopReason": "end_turn",
                "usage": { "inputTokens": 4, "outputTokens": 4, "totalTokens": 8 }
            }))
        }
    });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}", addr), seen)
}

#[tokio::test]
async fn unset_model_uses_default_id_against_bedrock() {
    let (endpoint, seen) = bedrock_stub().await;
    let config = Config {
        model_id: None,
        endpoint: Some(endpoint),
        api_key: Some("test-key".into()),
        ..Config::default()
    };
    let state = AppState::from_config(config).await.unwrap();

    let (status, body) = post_invocation(create_router(state), r#"{"prompt": "hi"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "Hello from Bedrock");
    assert_eq!(body["model"], Value::Null);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, format!("/model/{}/converse", urlencoding::encode(DEFAULT_MODEL_ID)));
    assert_eq!(seen[0].1["authorization"], "Bearer test-key");
}
