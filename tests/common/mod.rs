//! In-process mock of the status-check API, served by axum on a random port.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;

/// Knobs for making the mock misbehave in specific ways.
#[derive(Debug, Clone)]
pub struct Behavior {
    /// Wrap the router in a permissive CORS layer.
    pub cors: bool,
    /// Reject bodies without `client_name` with 422.
    pub validate: bool,
    /// Answer POSTs normally but never store the record.
    pub drop_creates: bool,
    /// Store and return records without a `timestamp` field.
    pub omit_timestamp: bool,
    /// Delay before `GET /` answers.
    pub root_delay: Option<Duration>,
    /// Answer `GET /` with this status instead of 200.
    pub root_status: Option<StatusCode>,
    /// Answer `GET /status` with this status instead of 200.
    pub list_status: Option<StatusCode>,
    /// Answer `POST /status` with this status instead of creating a record.
    pub create_status: Option<StatusCode>,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            cors: true,
            validate: true,
            drop_creates: false,
            omit_timestamp: false,
            root_delay: None,
            root_status: None,
            list_status: None,
            create_status: None,
        }
    }
}

#[derive(Clone)]
struct MockState {
    behavior: Behavior,
    records: Arc<Mutex<Vec<Value>>>,
}

pub struct MockBackend {
    pub base_url: String,
    records: Arc<Mutex<Vec<Value>>>,
}

impl MockBackend {
    pub async fn spawn(behavior: Behavior) -> Self {
        let records = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            behavior: behavior.clone(),
            records: records.clone(),
        };

        let mut app = Router::new()
            .route("/api/", get(root))
            .route("/api/status", get(list_status).post(create_status))
            .with_state(state);
        if behavior.cors {
            app = app.layer(CorsLayer::permissive());
        }

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api", addr),
            records,
        }
    }

    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn client_names(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter_map(|r| r["client_name"].as_str().map(str::to_string))
            .collect()
    }
}

/// Base URL of a port nothing is listening on.
pub fn unreachable_base_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

fn error_body(code: StatusCode) -> (StatusCode, Json<Value>) {
    (code, Json(json!({ "detail": "mock backend error" })))
}

async fn root(State(state): State<MockState>) -> (StatusCode, Json<Value>) {
    if let Some(delay) = state.behavior.root_delay {
        tokio::time::sleep(delay).await;
    }
    if let Some(code) = state.behavior.root_status {
        return error_body(code);
    }
    (StatusCode::OK, Json(json!({ "message": "Hello World" })))
}

async fn list_status(State(state): State<MockState>) -> (StatusCode, Json<Value>) {
    if let Some(code) = state.behavior.list_status {
        return error_body(code);
    }
    (
        StatusCode::OK,
        Json(Value::Array(state.records.lock().unwrap().clone())),
    )
}

async fn create_status(
    State(state): State<MockState>,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if let Some(code) = state.behavior.create_status {
        return error_body(code);
    }
    let client_name = body.get("client_name").and_then(Value::as_str);
    if client_name.is_none() && state.behavior.validate {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({
                "detail": [{ "loc": ["body", "client_name"], "msg": "field required" }]
            })),
        );
    }

    let mut record = json!({
        "id": uuid::Uuid::new_v4().to_string(),
        "client_name": client_name.unwrap_or_default(),
    });
    if !state.behavior.omit_timestamp {
        record["timestamp"] = json!(chrono::Utc::now().to_rfc3339());
    }
    if !state.behavior.drop_creates {
        state.records.lock().unwrap().push(record.clone());
    }
    (StatusCode::OK, Json(record))
}
