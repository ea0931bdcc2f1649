//! Signed request dispatcher
//!
//! Composes the URL, signs the exact path, query and body that go on the
//! wire, attaches the auth headers and performs the exchange. Decoding is
//! left to the caller (see [`crate::response`]).

use enclave_auth::{now_millis, Credentials};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Response, Url};
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, instrument};

use crate::error::{RestError, RestResult, TransportError};
use crate::request::{OutboundRequest, Query};

/// Default request timeout
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default user agent
const DEFAULT_USER_AGENT: &str = concat!("enclave-rest/", env!("CARGO_PKG_VERSION"));

/// Content type added to POST/PUT bodies unless the caller set one
const JSON_CONTENT_TYPE: &str = "application/json";

/// Exchange environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    Production,
    Sandbox,
    Custom(String),
}

impl Endpoint {
    pub fn base_url(&self) -> &str {
        match self {
            Self::Production => "https://api.enclave.market",
            Self::Sandbox => "https://api-sandbox.enclave.market",
            Self::Custom(url) => url,
        }
    }
}

/// Configuration for a [`Dispatcher`]
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    /// API credentials used to sign every request
    pub credentials: Credentials,
    /// Base URL, trailing slashes are ignored
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
    /// Custom user agent
    pub user_agent: Option<String>,
}

impl DispatcherConfig {
    /// Production endpoint with the default timeout
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            base_url: Endpoint::Production.base_url().to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_endpoint(mut self, endpoint: Endpoint) -> Self {
        self.base_url = endpoint.base_url().to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}

/// Signs and sends requests to the exchange
///
/// Cloning is cheap and clones share the connection pool. All fields are
/// fixed at construction, so one instance can serve any number of
/// concurrent calls.
///
/// # Example
///
/// ```no_run
/// use enclave_auth::Credentials;
/// use enclave_rest::{Dispatcher, Query};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let creds = Credentials::new("key-id", "secret")?;
/// let dispatcher = Dispatcher::new(creds, "https://api-sandbox.enclave.market")?;
///
/// let response = dispatcher
///     .get("/v1/perps/positions", Query::new())
///     .await?;
/// let positions: serde_json::Value = enclave_rest::response::decode(response).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Dispatcher {
    http_client: Client,
    base_url: String,
    credentials: Arc<Credentials>,
    timeout: Duration,
}

impl Dispatcher {
    /// Create a dispatcher for `base_url` with default settings
    pub fn new(credentials: Credentials, base_url: impl Into<String>) -> RestResult<Self> {
        Self::with_config(DispatcherConfig::new(credentials).with_base_url(base_url))
    }

    /// Create a dispatcher with custom configuration
    pub fn with_config(config: DispatcherConfig) -> RestResult<Self> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)
            .map_err(|e| RestError::Config(format!("invalid base URL {:?}: {}", base_url, e)))?;

        let http_client = Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT))
            .build()
            .map_err(|e| RestError::Config(format!("failed to create HTTP client: {}", e)))?;

        info!(base_url = %base_url, timeout_ms = config.timeout.as_millis() as u64, "Created Enclave dispatcher");

        Ok(Self {
            http_client,
            base_url,
            credentials: Arc::new(config.credentials),
            timeout: config.timeout,
        })
    }

    /// Base URL without a trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn key_id(&self) -> &str {
        self.credentials.key_id()
    }

    /// Compose base URL, path and merged query
    ///
    /// Parameters in `query` replace same-named parameters already in `path`.
    /// When `query` is empty the path's own query is left untouched.
    pub(crate) fn build_url(&self, path: &str, query: &Query) -> RestResult<Url> {
        let separator = if path.starts_with('/') { "" } else { "/" };
        let raw = format!("{}{}{}", self.base_url, separator, path);
        let mut url =
            Url::parse(&raw).map_err(|e| RestError::InvalidRequest(format!("invalid URL {:?}: {}", raw, e)))?;

        if !query.is_empty() {
            let mut merged = match url.query() {
                Some(existing) => Query::parse(existing)?,
                None => Query::new(),
            };
            merged.extend(query.clone());
            let encoded = merged.encode()?;
            url.set_query(Some(&encoded));
        } else if url.query() == Some("") {
            url.set_query(None);
        }

        Ok(url)
    }

    /// Build the signed HTTP request for `timestamp_ms`
    pub(crate) fn build_request(
        &self,
        request: &OutboundRequest,
        timestamp_ms: u64,
    ) -> RestResult<reqwest::Request> {
        let url = self.build_url(&request.path, &request.query)?;
        let canonical = canonical_path(&url);

        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            headers.append(header_name(name)?, header_value(value)?);
        }

        if !request.body.is_empty()
            && request.method.allows_default_content_type()
            && !headers.contains_key(CONTENT_TYPE)
        {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
        }

        // Auth headers go last so callers cannot override them
        let auth = self.credentials.auth_headers(
            timestamp_ms,
            request.method.as_str(),
            &canonical,
            &request.body,
        );
        for (name, value) in auth.iter() {
            headers.insert(header_name(name)?, header_value(value)?);
        }

        let mut builder = self
            .http_client
            .request(request.method.into(), url)
            .headers(headers);
        if !request.body.is_empty() {
            builder = builder.body(request.body.clone());
        }

        builder
            .build()
            .map_err(|e| RestError::InvalidRequest(e.to_string()))
    }

    /// Sign and send a request, returning the raw response
    ///
    /// The response is not decoded; use [`crate::response`] for that.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send(&self, request: OutboundRequest) -> RestResult<Response> {
        let timestamp_ms = now_millis()?;
        let http_request = self.build_request(&request, timestamp_ms)?;

        debug!(url = %http_request.url(), "Sending signed request");

        let response = self.http_client.execute(http_request).await?;

        debug!(status = response.status().as_u16(), "Received response");
        Ok(response)
    }

    /// Like [`Dispatcher::send`], but abort when `cancel` completes first
    ///
    /// An aborted exchange yields a `Cancelled` transport error.
    pub async fn send_cancellable<C>(&self, request: OutboundRequest, cancel: C) -> RestResult<Response>
    where
        C: Future<Output = ()>,
    {
        tokio::select! {
            result = self.send(request) => result,
            _ = cancel => {
                debug!("Request cancelled by caller");
                Err(TransportError::cancelled().into())
            }
        }
    }

    /// Send a request described by its parts
    ///
    /// `method` is matched case-insensitively; anything other than GET, POST,
    /// PUT or DELETE fails before any network I/O.
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: impl Into<Vec<u8>>,
        query: Query,
        headers: &[(&str, &str)],
    ) -> RestResult<Response> {
        let request = headers.iter().fold(
            OutboundRequest::from_parts(method, path)?
                .with_query(query)
                .with_body(body),
            |request, (name, value)| request.with_header(*name, *value),
        );
        self.send(request).await
    }

    pub async fn get(&self, path: &str, query: Query) -> RestResult<Response> {
        self.send(OutboundRequest::get(path).with_query(query)).await
    }

    /// POST `body` as JSON
    pub async fn post_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> RestResult<Response> {
        self.send(OutboundRequest::post(path).with_json(body)?).await
    }

    /// PUT `body` as JSON
    pub async fn put_json<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> RestResult<Response> {
        self.send(OutboundRequest::put(path).with_json(body)?).await
    }

    pub async fn delete(&self, path: &str, query: Query) -> RestResult<Response> {
        self.send(OutboundRequest::delete(path).with_query(query)).await
    }

    /// Classify a non-200 response
    pub async fn classify_error(response: Response) -> RestError {
        crate::response::classify_error(response).await
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("base_url", &self.base_url)
            .field("credentials", &self.credentials)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Path plus `?query` exactly as it will be sent
fn canonical_path(url: &Url) -> String {
    match url.query() {
        Some(query) if !query.is_empty() => format!("{}?{}", url.path(), query),
        _ => url.path().to_string(),
    }
}

fn header_name(name: &str) -> RestResult<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| RestError::InvalidRequest(format!("invalid header name {:?}: {}", name, e)))
}

fn header_value(value: &str) -> RestResult<HeaderValue> {
    HeaderValue::from_str(value)
        .map_err(|e| RestError::InvalidRequest(format!("invalid header value: {}", e)))
}
