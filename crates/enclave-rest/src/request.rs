//! Outbound request model

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use crate::error::{RestError, RestResult};

/// HTTP verbs the exchange accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Parse a method name, ignoring case
    pub fn parse(method: &str) -> RestResult<Self> {
        match method.to_ascii_uppercase().as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            _ => Err(RestError::UnsupportedMethod(method.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Whether a JSON content type is added by default when there is a body
    pub fn allows_default_content_type(&self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Query parameters with unique keys
///
/// Keys are kept sorted so the encoding is stable; the same string is used
/// for signing and for the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(BTreeMap<String, String>);

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a parameter, replacing any previous value for the key
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.insert(key.into(), value.to_string());
    }

    /// Set a parameter only when a value is present
    pub fn insert_opt<V: ToString>(&mut self, key: impl Into<String>, value: Option<V>) {
        if let Some(value) = value {
            self.insert(key, value);
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    pub fn with_opt<V: ToString>(mut self, key: impl Into<String>, value: Option<V>) -> Self {
        self.insert_opt(key, value);
        self
    }

    /// Merge `other` into this query; keys in `other` win
    pub fn extend(&mut self, other: Query) {
        self.0.extend(other.0);
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Form-urlencode the parameters in key order
    pub fn encode(&self) -> RestResult<String> {
        serde_urlencoded::to_string(&self.0).map_err(|e| RestError::InvalidRequest(e.to_string()))
    }

    /// Parse a raw query string; later duplicates replace earlier ones
    pub fn parse(raw: &str) -> RestResult<Self> {
        let pairs: Vec<(String, String)> = serde_urlencoded::from_str(raw)
            .map_err(|e| RestError::InvalidRequest(format!("invalid query string: {}", e)))?;
        Ok(Self(pairs.into_iter().collect()))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Query {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }
}

/// One logical call, before URL composition and signing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundRequest {
    pub method: HttpMethod,
    /// Path relative to the base URL, may carry its own `?query`
    pub path: String,
    pub query: Query,
    /// Exact body bytes, empty for none
    pub body: Vec<u8>,
    /// Extra headers; auth headers are always set by the dispatcher
    pub headers: Vec<(String, String)>,
}

impl OutboundRequest {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Query::new(),
            body: Vec::new(),
            headers: Vec::new(),
        }
    }

    /// Build from a method name, rejecting verbs the exchange does not accept
    pub fn from_parts(method: &str, path: impl Into<String>) -> RestResult<Self> {
        Ok(Self::new(HttpMethod::parse(method)?, path))
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn with_query(mut self, query: Query) -> Self {
        self.query.extend(query);
        self
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Serialize `value` as the JSON body
    pub fn with_json<T: Serialize + ?Sized>(self, value: &T) -> RestResult<Self> {
        let body = serde_json::to_vec(value)
            .map_err(|e| RestError::InvalidRequest(format!("failed to encode body: {}", e)))?;
        Ok(self.with_body(body))
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}
