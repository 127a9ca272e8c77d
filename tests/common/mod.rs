//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Body,
    extract::{RawQuery, State},
    http::header::CONTENT_TYPE,
    response::Response,
    routing::get,
    Router,
};
use tap_cors_proxy::{HttpServer, RelayConfig, Shutdown};
use tokio::net::TcpListener;

/// What the mock upstream answers with.
#[derive(Clone)]
pub struct MockReply {
    pub status: u16,
    pub content_type: Option<&'static str>,
    pub body: Vec<u8>,
    pub delay: Option<Duration>,
}

impl MockReply {
    pub fn ok(content_type: &'static str, body: &[u8]) -> Self {
        Self {
            status: 200,
            content_type: Some(content_type),
            body: body.to_vec(),
            delay: None,
        }
    }
}

#[derive(Clone)]
struct MockState {
    reply: Arc<MockReply>,
    calls: Arc<AtomicUsize>,
    last_query: Arc<Mutex<Option<String>>>,
}

/// A running mock TAP service.
pub struct MockUpstream {
    pub addr: SocketAddr,
    calls: Arc<AtomicUsize>,
    last_query: Arc<Mutex<Option<String>>>,
}

#[allow(dead_code)]
impl MockUpstream {
    pub fn base_url(&self) -> String {
        format!("http://{}/TAP/sync", self.addr)
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Decoded query-string pairs of the last request received.
    pub fn last_pairs(&self) -> Vec<(String, String)> {
        let raw = self.last_query.lock().unwrap().clone().unwrap_or_default();
        url::form_urlencoded::parse(raw.as_bytes())
            .into_owned()
            .collect()
    }
}

async fn tap_sync(State(state): State<MockState>, RawQuery(query): RawQuery) -> Response {
    state.calls.fetch_add(1, Ordering::SeqCst);
    *state.last_query.lock().unwrap() = query;

    if let Some(delay) = state.reply.delay {
        tokio::time::sleep(delay).await;
    }

    let mut builder = Response::builder().status(state.reply.status);
    if let Some(content_type) = state.reply.content_type {
        builder = builder.header(CONTENT_TYPE, content_type);
    }
    builder.body(Body::from(state.reply.body.clone())).unwrap()
}

/// Start a mock upstream on an ephemeral port.
pub async fn start_mock_upstream(reply: MockReply) -> MockUpstream {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let state = MockState {
        reply: Arc::new(reply),
        calls: Arc::new(AtomicUsize::new(0)),
        last_query: Arc::new(Mutex::new(None)),
    };
    let upstream = MockUpstream {
        addr,
        calls: state.calls.clone(),
        last_query: state.last_query.clone(),
    };

    let app = Router::new().route("/TAP/sync", get(tap_sync)).with_state(state);
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    upstream
}

/// An address that refuses connections.
#[allow(dead_code)]
pub async fn closed_port_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/TAP/sync", addr)
}

/// Start the relay against the given config on an ephemeral port.
pub async fn start_relay(mut config: RelayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    config.listener.bind_address = addr.to_string();

    let server = HttpServer::new(config).unwrap();
    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Relay pointed at `base_url` with defaults otherwise.
pub async fn start_relay_for(base_url: String) -> (SocketAddr, Shutdown) {
    let mut config = RelayConfig::default();
    config.upstream.base_url = base_url;
    start_relay(config).await
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
