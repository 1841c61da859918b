//! Integration tests for the Gemini client.
//!
//! Each test starts a stub `generateContent` endpoint on a random port and
//! points a real [`GeminiClient`] at it.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use mindful::{EMPTY_RESPONSE_PLACEHOLDER, GeminiClient, GenerateError, TextGenerator};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// What the stub saw for one request.
#[derive(Clone, Debug)]
struct Seen {
    call: String,
    query: HashMap<String, String>,
    content_type: Option<String>,
    body: serde_json::Value,
}

#[derive(Clone)]
struct Stub {
    status: StatusCode,
    body: &'static str,
    seen: Arc<Mutex<Vec<Seen>>>,
}

async fn generate(
    State(stub): State<Stub>,
    Path(call): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
    body: String,
) -> (StatusCode, &'static str) {
    stub.seen.lock().unwrap().push(Seen {
        call,
        query,
        content_type: headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_str(&body).unwrap_or_default(),
    });
    (stub.status, stub.body)
}

/// Helper: spawn a stub endpoint and return a client pointed at it.
async fn spawn_stub(
    status: StatusCode,
    body: &'static str,
) -> (GeminiClient, Arc<Mutex<Vec<Seen>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let stub = Stub {
        status,
        body,
        seen: seen.clone(),
    };
    let router = Router::new()
        .route("/v1beta/models/{call}", post(generate))
        .with_state(stub);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let url = format!("http://{addr}/v1beta/models/gemini-1.5-flash:generateContent");
    let client = GeminiClient::new("test-key", &url).unwrap();
    (client, seen)
}

const OK_BODY: &str = r#"{
  "candidates": [
    {"content": {"parts": [{"text": "**Great** start.\n- keep going"}], "role": "model"}}
  ]
}"#;

// ── Request shape ────────────────────────────────────────────────────

#[tokio::test]
async fn sends_prompt_envelope_with_key_in_query() {
    let (client, seen) = spawn_stub(StatusCode::OK, OK_BODY).await;

    let text = client.generate_content("hello \"world\"").await.unwrap();
    assert_eq!(text, "**Great** start.\n- keep going");

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let req = &seen[0];
    assert_eq!(req.call, "gemini-1.5-flash:generateContent");
    assert_eq!(req.query.get("key").map(String::as_str), Some("test-key"));
    assert_eq!(req.content_type.as_deref(), Some("application/json"));
    assert_eq!(
        req.body,
        serde_json::json!({"contents": [{"parts": [{"text": "hello \"world\""}]}]})
    );
}

#[tokio::test]
async fn works_through_the_trait() {
    let (client, _seen) = spawn_stub(StatusCode::OK, OK_BODY).await;
    let generator: &dyn TextGenerator = &client;
    let text = generator.generate("p").await.unwrap();
    assert!(text.starts_with("**Great**"));
}

// ── Failure modes ────────────────────────────────────────────────────

#[tokio::test]
async fn non_success_status_is_request_failed() {
    for status in [
        StatusCode::BAD_REQUEST,
        StatusCode::FORBIDDEN,
        StatusCode::TOO_MANY_REQUESTS,
        StatusCode::INTERNAL_SERVER_ERROR,
    ] {
        let (client, seen) = spawn_stub(status, r#"{"error": {"message": "nope"}}"#).await;
        let err = client.generate_content("p").await.unwrap_err();
        assert!(matches!(err, GenerateError::RequestFailed), "{status}");
        assert_eq!(err.to_string(), "API request failed");
        // Exactly one attempt, no retry.
        assert_eq!(seen.lock().unwrap().len(), 1);
    }
}

/// Helper: a raw TCP endpoint that answers every request with `head` and
/// `body`, then closes. `head` may promise more bytes than `body` carries.
async fn spawn_raw(head: &'static str, body: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        // Read the whole request so closing does not reset the connection.
        let mut request = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&chunk[..n]);
            if request_complete(&request) {
                break;
            }
        }
        socket.write_all(head.as_bytes()).await.unwrap();
        socket.write_all(body.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
        let _ = socket.read_to_end(&mut request).await;
    });
    format!("http://{addr}/v1beta/models/m:generateContent")
}

fn request_complete(request: &[u8]) -> bool {
    let text = String::from_utf8_lossy(request);
    let Some((head, body)) = text.split_once("\r\n\r\n") else {
        return false;
    };
    let length = head
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())
                .flatten()
        })
        .unwrap_or(0);
    body.len() >= length
}

#[tokio::test]
async fn failed_status_wins_over_unreadable_body() {
    let url = spawn_raw(
        "HTTP/1.1 500 Internal Server Error\r\ncontent-type: application/json\r\ncontent-length: 100\r\nconnection: close\r\n\r\n",
        r#"{"error":"#,
    )
    .await;
    let client = GeminiClient::new("k", &url).unwrap();
    let err = client.generate_content("p").await.unwrap_err();
    assert!(matches!(err, GenerateError::RequestFailed), "{err:?}");
}

#[tokio::test]
async fn truncated_success_body_is_transport_error() {
    let url = spawn_raw(
        "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 100\r\nconnection: close\r\n\r\n",
        r#"{"candidates":"#,
    )
    .await;
    let client = GeminiClient::new("k", &url).unwrap();
    let err = client.generate_content("p").await.unwrap_err();
    assert!(matches!(err, GenerateError::Transport(_)), "{err:?}");
}

#[tokio::test]
async fn unexpected_shape_degrades_to_placeholder() {
    let (client, _seen) = spawn_stub(StatusCode::OK, r#"{"candidates": []}"#).await;
    let text = client.generate_content("p").await.unwrap();
    assert_eq!(text, EMPTY_RESPONSE_PLACEHOLDER);
}

#[tokio::test]
async fn non_json_success_body_fails() {
    let (client, _seen) = spawn_stub(StatusCode::OK, "<html>gateway</html>").await;
    let err = client.generate_content("p").await.unwrap_err();
    assert!(matches!(err, GenerateError::InvalidBody(_)));
}

#[tokio::test]
async fn connection_refused_is_transport_error() {
    // Grab a free port, then close it so nothing is listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let url = format!("http://{addr}/v1beta/models/m:generateContent");
    let client = GeminiClient::new("k", &url).unwrap();
    let err = client.generate_content("p").await.unwrap_err();
    assert!(matches!(err, GenerateError::Transport(_)));
}
