//! Local stand-ins for upload backends.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::routing::post;
use axum::Router;
use tokio::io::AsyncReadExt;
use url::Url;

use crate::backend::Backend;

#[derive(Debug, Clone)]
pub struct ReceivedPart {
    pub name: Option<String>,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub data: Bytes,
}

#[derive(Debug, Clone)]
pub struct ReceivedRequest {
    pub content_type: String,
    pub user_agent: String,
    pub parts: Vec<ReceivedPart>,
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: Vec<u8>,
    delay: Option<Duration>,
    requests: Arc<Mutex<Vec<ReceivedRequest>>>,
}

/// An HTTP server answering every upload with a fixed status and body.
pub struct MockBackend {
    pub backend: Backend,
    requests: Arc<Mutex<Vec<ReceivedRequest>>>,
}

impl MockBackend {
    pub async fn spawn(status: StatusCode, body: &str) -> Self {
        Self::start(status, body.as_bytes().to_vec(), None).await
    }

    pub async fn spawn_bytes(status: StatusCode, body: Vec<u8>) -> Self {
        Self::start(status, body, None).await
    }

    /// Like [`MockBackend::spawn`], but holds each response for `delay`.
    pub async fn spawn_slow(status: StatusCode, body: &str, delay: Duration) -> Self {
        Self::start(status, body.as_bytes().to_vec(), Some(delay)).await
    }

    async fn start(status: StatusCode, body: Vec<u8>, delay: Option<Duration>) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            body,
            delay,
            requests: requests.clone(),
        };

        let app = Router::new().route("/", post(receive)).with_state(state);

        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let server = axum::Server::from_tcp(listener)
            .unwrap()
            .serve(app.into_make_service());
        tokio::spawn(server);

        MockBackend {
            backend: backend(&format!("http://{addr}/")),
            requests,
        }
    }

    pub fn requests(&self) -> Vec<ReceivedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

async fn receive(
    State(state): State<MockState>,
    headers: HeaderMap,
    mut multipart: Multipart,
) -> (StatusCode, Vec<u8>) {
    let header_value = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_owned()
    };

    let mut parts = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().map(str::to_owned);
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(str::to_owned);
        let data = field.bytes().await.unwrap();
        parts.push(ReceivedPart {
            name,
            file_name,
            content_type,
            data,
        });
    }

    state.requests.lock().unwrap().push(ReceivedRequest {
        content_type: header_value(header::CONTENT_TYPE),
        user_agent: header_value(header::USER_AGENT),
        parts,
    });

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    (state.status, state.body)
}

/// A backend that accepts connections and closes them without answering.
pub async fn spawn_hangup() -> Backend {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((mut stream, _)) = listener.accept().await {
            let mut buf = [0; 64];
            let _ = stream.read(&mut buf).await;
        }
    });

    backend(&format!("http://{addr}/"))
}

/// A backend on a port nothing listens on.
pub fn closed_port() -> Backend {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    backend(&format!("http://{addr}/"))
}

fn backend(endpoint: &str) -> Backend {
    Backend {
        name: "mock".to_owned(),
        endpoint: Url::parse(endpoint).unwrap(),
    }
}
