//! Shared fixtures for gemgate-proxy integration tests.
//!
//! - a mock `generateContent` upstream built on axum, bound to an ephemeral
//!   port, that records every request it receives
//! - a helper that runs the real accept loop on an ephemeral port
//! - fake forwarders for listener-only tests

// Each test binary uses a different subset of these helpers.
#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
};
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use gemgate_core::{ForwardError, ListenConfig, Prompt, PromptForwarder, UpstreamConfig};
use gemgate_proxy::{GeminiForwarder, ServeError, bind, serve};

/// Model id the mock upstream is addressed with.
pub const TEST_MODEL: &str = "test-model";

/// API key used by tests that expect the upstream to be called.
pub const TEST_API_KEY: &str = "test-key-123";

/// Canonical successful upstream body.
pub const HI_THERE: &str = r#"{"candidates":[{"content":{"parts":[{"text":"Hi there"}]}}]}"#;

// =============================================================================
// Mock upstream
// =============================================================================

/// One request as seen by the mock upstream.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Request body parsed as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.body).expect("request body is JSON")
    }
}

/// Requests received by a mock upstream.
#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<RecordedRequest>>>);

impl Recorder {
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

struct UpstreamState {
    recorder: Recorder,
    status: StatusCode,
    body: String,
}

async fn respond(
    State(state): State<Arc<UpstreamState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, String) {
    state.recorder.0.lock().unwrap().push(RecordedRequest {
        method,
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        content_type: headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: body.to_vec(),
    });
    (state.status, state.body.clone())
}

/// Start an upstream that answers every request with `status` and `body`.
pub async fn spawn_upstream(status: u16, body: &str) -> (SocketAddr, Recorder) {
    let recorder = Recorder::default();
    let state = Arc::new(UpstreamState {
        recorder: recorder.clone(),
        status: StatusCode::from_u16(status).unwrap(),
        body: body.to_string(),
    });

    let app = Router::new().fallback(respond).with_state(state);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (addr, recorder)
}

/// Upstream configuration pointing at a mock upstream.
pub fn upstream_config(addr: SocketAddr, api_key: Option<&str>) -> UpstreamConfig {
    UpstreamConfig::new()
        .with_base_url(format!("http://{addr}"))
        .with_model(TEST_MODEL)
        .with_optional_api_key(api_key.map(str::to_string))
}

/// Real forwarder pointing at a mock upstream.
pub fn forwarder_for(addr: SocketAddr, api_key: Option<&str>) -> GeminiForwarder {
    GeminiForwarder::new(upstream_config(addr, api_key)).unwrap()
}

// =============================================================================
// Gateway
// =============================================================================

/// A running accept loop on an ephemeral port.
pub struct Gateway {
    pub addr: SocketAddr,
    cancel: CancellationToken,
    handle: JoinHandle<Result<(), ServeError>>,
}

impl Gateway {
    /// Stop accepting and wait for the loop to exit cleanly.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        self.handle.await.unwrap().unwrap();
    }
}

/// Bind 127.0.0.1:0 and run the accept loop with `forwarder`.
pub async fn spawn_gateway(forwarder: Arc<dyn PromptForwarder>) -> Gateway {
    let listener = bind(&ListenConfig::new("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    let cancel = CancellationToken::new();
    let handle = tokio::spawn(serve(listener, forwarder, cancel.clone()));

    Gateway {
        addr,
        cancel,
        handle,
    }
}

// =============================================================================
// Fake forwarders
// =============================================================================

/// Answers `echo: <prompt>` and records prompts.
#[derive(Default)]
pub struct Echo {
    prompts: Mutex<Vec<String>>,
}

impl Echo {
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl PromptForwarder for Echo {
    async fn forward(&self, prompt: &Prompt) -> Result<String, ForwardError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(format!("echo: {prompt}"))
    }
}

/// Blocks every call until a permit is released, like a slow upstream.
pub struct Gated {
    prompts: Mutex<Vec<String>>,
    permits: Semaphore,
}

impl Gated {
    pub fn new() -> Self {
        Self {
            prompts: Mutex::new(Vec::new()),
            permits: Semaphore::new(0),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    /// Let `n` blocked or future calls complete.
    pub fn release(&self, n: usize) {
        self.permits.add_permits(n);
    }

    /// Wait until at least `n` calls have started.
    pub async fn wait_for_calls(&self, n: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.prompts().len() < n {
                tokio::time::sleep(Duration::from_millis(10)).await;
            }
        })
        .await
        .expect("forwarder was not called in time");
    }
}

#[async_trait]
impl PromptForwarder for Gated {
    async fn forward(&self, prompt: &Prompt) -> Result<String, ForwardError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.permits
            .acquire()
            .await
            .expect("semaphore is never closed")
            .forget();
        Ok(format!("answer to {prompt}"))
    }
}
