use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Value,
}

/// How `/api/inpaint` answers.
#[derive(Debug, Clone, Copy)]
pub enum InpaintReply {
    Ok,
    /// Replies with the request body; honours a `delay_ms` field in it.
    Echo,
    Status(u16),
    DelayMs(u64),
}

#[derive(Clone)]
struct ServerState {
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
    inpaint_reply: InpaintReply,
}

pub struct TestServer {
    pub base_url: String,
    recorded: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(InpaintReply::Ok).await
    }

    pub async fn start_with(inpaint_reply: InpaintReply) -> Self {
        let recorded = Arc::new(Mutex::new(Vec::new()));
        let state = ServerState {
            recorded: Arc::clone(&recorded),
            inpaint_reply,
        };

        let app = Router::new().fallback(handle_request).with_state(state);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let address = listener.local_addr().expect("listener address");

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            base_url: format!("http://{}", address),
            recorded,
            handle,
        }
    }

    pub fn recorded(&self) -> Vec<RecordedRequest> {
        self.recorded.lock().unwrap().clone()
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A base URL nothing is listening on.
pub fn unused_local_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    format!("http://127.0.0.1:{}", port)
}

async fn handle_request(
    State(state): State<ServerState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let body_value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
    };

    let header_values = headers
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|v| (name.as_str().to_string(), v.to_string()))
        })
        .collect();

    state.recorded.lock().unwrap().push(RecordedRequest {
        method: method.to_string(),
        path: uri.path().to_string(),
        headers: header_values,
        body: body_value.clone(),
    });

    match uri.path() {
        "/api/inpaint" => reply_to_inpaint(state.inpaint_reply, body_value).await,
        "/empty" => StatusCode::OK.into_response(),
        "/fail" => (StatusCode::INTERNAL_SERVER_ERROR, "backend exploded").into_response(),
        "/text" => (StatusCode::OK, "plain text, not json").into_response(),
        "/slow" => {
            tokio::time::sleep(Duration::from_secs(5)).await;
            Json(json!({"late": true})).into_response()
        }
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn reply_to_inpaint(reply: InpaintReply, body: Value) -> Response {
    match reply {
        InpaintReply::Ok => Json(json!({"result": "ok"})).into_response(),
        InpaintReply::Echo => {
            if let Some(delay_ms) = body.get("delay_ms").and_then(Value::as_u64) {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
            Json(body).into_response()
        }
        InpaintReply::Status(code) => {
            let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(json!({"error": "inpainting failed"}))).into_response()
        }
        InpaintReply::DelayMs(delay_ms) => {
            tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            Json(json!({"result": "late"})).into_response()
        }
    }
}
