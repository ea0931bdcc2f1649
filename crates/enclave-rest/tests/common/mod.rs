//! Common test utilities and fixtures for integration tests
//!
//! A local axum server on `127.0.0.1:0` that records every request and
//! answers with a canned response chosen by a closure.

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::{OriginalUri, State};
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use enclave_auth::{sign, Credentials};
use enclave_rest::{Dispatcher, DispatcherConfig, EnclaveClient};
use parking_lot::Mutex;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

pub const KEY_ID: &str = "test-key-id";
pub const SECRET: &str = "test-secret";

/// Sample successful order envelope
pub const ORDER_RESPONSE: &str = r#"{
    "success": true,
    "result": {
        "orderId": "123",
        "clientOrderId": "my-order-1",
        "market": "AVAX-USDC",
        "side": "buy",
        "type": "limit",
        "status": "open",
        "price": "20.5",
        "size": "1.25",
        "filledSize": "0",
        "filledCost": "0",
        "fee": "0",
        "timeInForce": "GTC",
        "createdAt": "2024-01-15T10:30:00Z"
    },
    "error": "",
    "error_code": ""
}"#;

/// Sample fills envelope
pub const FILLS_RESPONSE: &str = r#"{
    "success": true,
    "result": [{
        "id": "f-1",
        "orderId": "123",
        "market": "AVAX-USDC",
        "side": "buy",
        "price": "20.5",
        "size": "0.5",
        "filledCost": "10.25",
        "fee": "0.01",
        "time": "2024-01-15T10:31:00Z"
    }]
}"#;

/// Sample envelope rejected by the exchange
pub const INSUFFICIENT_BALANCE: &str =
    r#"{"success":false,"error":"insufficient balance","error_code":"E100"}"#;

/// A request as it arrived at the server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Path and query exactly as sent
    pub target: String,
    /// Header names lowercased
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn header_count(&self, name: &str) -> usize {
        let name = name.to_ascii_lowercase();
        self.headers.iter().filter(|(n, _)| *n == name).count()
    }

    pub fn path(&self) -> &str {
        self.target.split('?').next().unwrap_or_default()
    }

    pub fn query(&self) -> Option<&str> {
        self.target.split_once('?').map(|(_, q)| q)
    }

    pub fn body_str(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap()
    }

    /// Recompute the signature the way the exchange does
    pub fn expected_signature(&self) -> String {
        let timestamp: u64 = self.header("ENCLAVE-TIMESTAMP").unwrap().parse().unwrap();
        sign(
            SECRET.as_bytes(),
            timestamp,
            &self.method,
            &self.target,
            &self.body,
        )
    }

    pub fn signature_is_valid(&self) -> bool {
        self.header("ENCLAVE-SIGN") == Some(self.expected_signature().as_str())
    }
}

/// Response the server sends back
#[derive(Debug, Clone)]
pub struct CannedResponse {
    pub status: u16,
    pub body: String,
    pub delay: Option<Duration>,
}

impl CannedResponse {
    pub fn ok(body: impl Into<String>) -> Self {
        Self::status(200, body)
    }

    pub fn status(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

type Responder = Arc<dyn Fn(&RecordedRequest) -> CannedResponse + Send + Sync>;

#[derive(Clone)]
struct ServerState {
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    responder: Responder,
}

/// Local server recording requests and replaying canned responses
pub struct TestServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start a server that answers every request through `responder`
    pub async fn start<F>(responder: F) -> Self
    where
        F: Fn(&RecordedRequest) -> CannedResponse + Send + Sync + 'static,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let requests = Arc::new(Mutex::new(Vec::new()));

        let state = ServerState {
            requests: Arc::clone(&requests),
            responder: Arc::new(responder),
        };
        let app = Router::new().fallback(record).with_state(state);

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    /// Start a server that always answers `status` with `body`
    pub async fn respond_with(status: u16, body: &str) -> Self {
        let body = body.to_string();
        Self::start(move |_| CannedResponse::status(status, body.clone())).await
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn config(&self) -> DispatcherConfig {
        DispatcherConfig::new(credentials()).with_base_url(self.base_url())
    }

    pub fn dispatcher(&self) -> Dispatcher {
        Dispatcher::with_config(self.config()).unwrap()
    }

    pub fn client(&self) -> EnclaveClient {
        EnclaveClient::with_config(self.config()).unwrap()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    pub fn last_request(&self) -> RecordedRequest {
        self.requests
            .lock()
            .last()
            .cloned()
            .expect("server received no requests")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

pub fn credentials() -> Credentials {
    Credentials::new(KEY_ID, SECRET).unwrap()
}

/// Fallback handler: every method and path lands here
async fn record(
    State(state): State<ServerState>,
    method: Method,
    OriginalUri(uri): OriginalUri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let request = RecordedRequest {
        method: method.as_str().to_string(),
        target: uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| uri.path().to_string()),
        headers: headers
            .iter()
            .map(|(name, value)| {
                let value = String::from_utf8_lossy(value.as_bytes()).to_string();
                (name.as_str().to_string(), value)
            })
            .collect(),
        body: body.to_vec(),
    };
    state.requests.lock().push(request.clone());

    let canned = (state.responder)(&request);
    if let Some(delay) = canned.delay {
        tokio::time::sleep(delay).await;
    }

    let status = StatusCode::from_u16(canned.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, [(header::CONTENT_TYPE, "application/json")], canned.body).into_response()
}
