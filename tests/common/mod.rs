#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tokio::sync::{Mutex, Notify};

use relfinder::data_models::{PersonMatch, PersonQuery};
use relfinder::error::LookupError;
use relfinder::lookup::PersonLookup;

/// What the fake WikiTree endpoint answers with.
#[derive(Clone)]
pub enum FakeReply {
    Json(serde_json::Value),
    Text(StatusCode, &'static str),
}

/// One request as the fake endpoint saw it.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub content_type: Option<String>,
    pub body: serde_json::Value,
}

#[derive(Clone)]
struct FakeState {
    reply: FakeReply,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

async fn fake_api(State(state): State<FakeState>, headers: HeaderMap, body: Bytes) -> Response {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());
    let body = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    state.requests.lock().await.push(RecordedRequest { content_type, body });

    match state.reply {
        FakeReply::Json(value) => axum::Json(value).into_response(),
        FakeReply::Text(status, text) => (status, text).into_response(),
    }
}

/// Starts a stand-in WikiTree endpoint on a random local port.
/// Returns its URL and the log of requests it received.
pub async fn spawn_fake_wikitree(reply: FakeReply) -> (String, Arc<Mutex<Vec<RecordedRequest>>>) {
    let requests = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/api.php", post(fake_api))
        .with_state(FakeState {
            reply,
            requests: requests.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/api.php", addr), requests)
}

/// A URL nothing is listening on.
pub async fn unreachable_endpoint() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api.php", addr)
}

pub fn john_doe_response() -> serde_json::Value {
    serde_json::json!({ "persons": [{ "firstName": "John", "lastName": "Doe" }] })
}

/// In-memory lookup: fixed reply, counts calls, remembers queries, and can
/// hold every call until released.
#[derive(Clone)]
pub struct FakeLookup {
    reply: Arc<dyn Fn() -> Result<Vec<PersonMatch>, LookupError> + Send + Sync>,
    pub calls: Arc<AtomicUsize>,
    pub finished: Arc<AtomicUsize>,
    pub queries: Arc<Mutex<Vec<PersonQuery>>>,
    gate: Option<Arc<Notify>>,
}

impl FakeLookup {
    pub fn new<F>(reply: F) -> FakeLookup
    where
        F: Fn() -> Result<Vec<PersonMatch>, LookupError> + Send + Sync + 'static,
    {
        FakeLookup {
            reply: Arc::new(reply),
            calls: Arc::new(AtomicUsize::new(0)),
            finished: Arc::new(AtomicUsize::new(0)),
            queries: Arc::new(Mutex::new(Vec::new())),
            gate: None,
        }
    }

    pub fn matches(matches: Vec<PersonMatch>) -> FakeLookup {
        Self::new(move || Ok(matches.clone()))
    }

    pub fn failing_to_parse() -> FakeLookup {
        Self::new(|| {
            Err(LookupError::Parse(
                serde_json::from_str::<serde_json::Value>("<html>").unwrap_err(),
            ))
        })
    }

    /// Calls block until `Notify::notify_one` is called on the returned handle.
    pub fn gated(mut self) -> (FakeLookup, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        self.gate = Some(gate.clone());
        (self, gate)
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Calls that ran to completion (were not dropped while gated).
    pub fn finished_count(&self) -> usize {
        self.finished.load(Ordering::SeqCst)
    }
}

impl PersonLookup for FakeLookup {
    async fn find_person(&self, query: &PersonQuery) -> Result<Vec<PersonMatch>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().await.push(query.clone());
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.finished.fetch_add(1, Ordering::SeqCst);
        (self.reply)()
    }
}
