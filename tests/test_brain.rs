// Integration tests for Brain against an in-process chat completions mock

use axum::extract::State as AxumState;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use sweagent::agent::{Agent, AgentConfig, State, SweAgent};
use sweagent::brain::{Brain, BrainConfig, BrainError, RequestBuilder};
use sweagent::Action;
use tokio::net::TcpListener;

/// Initialize tracing subscriber for tests
fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_target(true)
            .with_test_writer()
            .init();
    });
}

#[derive(Clone, Default)]
struct MockState {
    responses: Arc<Mutex<VecDeque<(StatusCode, Value)>>>,
    requests: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn chat_completions_handler(
    AxumState(state): AxumState<MockState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.requests.lock().unwrap().push((auth, body));

    match state.responses.lock().unwrap().pop_front() {
        Some((status, body)) => (status, Json(body)),
        None => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"error": "no more responses"})),
        ),
    }
}

struct MockLlmServer {
    addr: SocketAddr,
    state: MockState,
}

impl MockLlmServer {
    async fn start(responses: Vec<(StatusCode, Value)>) -> Self {
        let state = MockState::default();
        state.responses.lock().unwrap().extend(responses);

        let app = Router::new()
            .route("/v1/chat/completions", post(chat_completions_handler))
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, state }
    }

    fn requests(&self) -> Vec<(Option<String>, Value)> {
        self.state.requests.lock().unwrap().clone()
    }

    fn config(&self) -> BrainConfig {
        BrainConfig {
            endpoint: format!("http://{}", self.addr),
            api_key: "test-key".to_string(),
            default_model: "test-model".to_string(),
            max_retries: 1,
            base_retry_delay_ms: 1,
            request_timeout_secs: 5,
            max_output_tokens: 256,
        }
    }
}

fn completion(text: &str) -> (StatusCode, Value) {
    (
        StatusCode::OK,
        json!({
            "id": "chatcmpl-test",
            "object": "chat.completion",
            "model": "test-model",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": text}, "finish_reason": "stop"}
            ],
            "usage": {"prompt_tokens": 20, "completion_tokens": 7, "total_tokens": 27}
        }),
    )
}

fn server_error() -> (StatusCode, Value) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({"error": "overloaded"}),
    )
}

#[tokio::test]
async fn test_inference_basic() {
    init_tracing();
    let server = MockLlmServer::start(vec![completion("2")]).await;
    let brain = Brain::new(server.config()).await.unwrap();

    let request = RequestBuilder::new(brain.default_model())
        .system("You answer with a number.")
        .user_text("What is 1 + 1?")
        .temperature(0.05)
        .max_tokens(brain.max_output_tokens())
        .build()
        .unwrap();

    let response = brain.infer(request).await.unwrap();
    assert_eq!(response.first_content(), Some("2"));
    assert_eq!(response.usage.unwrap().total_tokens, 27);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    let (auth, body) = &requests[0];
    assert_eq!(auth.as_deref(), Some("Bearer test-key"));
    assert_eq!(body["model"], "test-model");
    assert_eq!(body["messages"][0]["role"], "system");
    assert_eq!(body["messages"][1]["role"], "user");
    assert_eq!(body["max_tokens"], 256);
    let temperature = body["temperature"].as_f64().unwrap();
    assert!((temperature - 0.05).abs() < 1e-6);
}

#[tokio::test]
async fn test_auth_failure_is_not_retried() {
    init_tracing();
    let server = MockLlmServer::start(vec![(
        StatusCode::UNAUTHORIZED,
        json!({"error": "bad key"}),
    )])
    .await;
    let brain = Brain::new(server.config()).await.unwrap();

    let request = RequestBuilder::new("test-model")
        .user_text("hi")
        .build()
        .unwrap();
    let result = brain.infer(request).await;

    assert!(matches!(result, Err(BrainError::AuthenticationFailed(_))));
    assert_eq!(server.requests().len(), 1);
}

#[tokio::test]
async fn test_server_error_retried_then_succeeds() {
    init_tracing();
    let server = MockLlmServer::start(vec![server_error(), completion("ok")]).await;
    let brain = Brain::new(server.config()).await.unwrap();

    let request = RequestBuilder::new("test-model")
        .user_text("hi")
        .build()
        .unwrap();
    let response = brain.infer(request).await.unwrap();

    assert_eq!(response.first_content(), Some("ok"));
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_server_error_exhausts_retries() {
    init_tracing();
    let server = MockLlmServer::start(vec![server_error(), server_error()]).await;
    let brain = Brain::new(server.config()).await.unwrap();

    let request = RequestBuilder::new("test-model")
        .user_text("hi")
        .build()
        .unwrap();
    let result = brain.infer(request).await;

    assert!(matches!(result, Err(BrainError::Exhausted { retries: 2, .. })));
    assert_eq!(server.requests().len(), 2);
}

#[tokio::test]
async fn test_agent_step_over_http() {
    init_tracing();
    let server = MockLlmServer::start(vec![
        completion("Not sure yet."),
        completion("Open the module.\n```\nread src/lib.rs 1 40\n```"),
    ])
    .await;
    let brain = Brain::new(server.config()).await.unwrap();
    let mut agent = SweAgent::new(brain, AgentConfig::default());

    let action = agent.step(&State::new("document lib.rs")).await.unwrap();

    assert_eq!(
        action,
        Action::Read {
            path: "src/lib.rs".to_string(),
            start: 1,
            end: Some(40),
        }
    );
    assert_eq!(agent.cursor().file, "src/lib.rs");
    assert_eq!(agent.cursor().line, 1);

    let requests = server.requests();
    assert_eq!(requests.len(), 2);
    // the retry carries the feedback message after system + task
    let retry_messages = requests[1].1["messages"].as_array().unwrap();
    assert_eq!(retry_messages.len(), 3);
    assert!(
        retry_messages[2]["content"]
            .as_str()
            .unwrap()
            .contains("Not sure yet.")
    );
}
