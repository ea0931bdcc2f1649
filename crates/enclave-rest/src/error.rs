//! Error types for REST API operations

use enclave_auth::AuthError;
use serde::Deserialize;
use std::fmt;

use crate::envelope::null_as_empty;
use crate::validate::ValidationError;

/// What went wrong below the HTTP layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    /// The client-wide timeout elapsed
    Timeout,
    /// Could not connect (DNS, refused, TLS)
    Connect,
    /// The caller cancelled the in-flight request
    Cancelled,
    /// Reading the response body failed
    Body,
    /// Any other request failure
    Request,
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Cancelled => "cancelled",
            Self::Body => "body",
            Self::Request => "request",
        };
        f.write_str(s)
    }
}

/// Network level failure, surfaced to the caller as-is
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Transport error ({kind}): {message}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub message: String,
}

impl TransportError {
    pub fn new(kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn cancelled() -> Self {
        Self::new(TransportErrorKind::Cancelled, "request cancelled by caller")
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_body() || err.is_decode() {
            TransportErrorKind::Body
        } else {
            TransportErrorKind::Request
        };
        Self::new(kind, err.to_string())
    }
}

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// HTTP verb outside GET, POST, PUT, DELETE
    #[error("Unsupported HTTP method: {0}")]
    UnsupportedMethod(String),

    /// Network, DNS, timeout or cancellation failure
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Non-200 response carrying a decodable error envelope
    #[error("API error: {message} (code: {code}, status: {status})")]
    Api {
        status: u16,
        message: String,
        code: String,
    },

    /// Non-200 response whose body is not an error envelope
    #[error("Failed to decode error response (status: {status}): {reason}")]
    Decode {
        status: u16,
        /// Raw response body
        body: String,
        reason: String,
    },

    /// 200 response with `success: false`
    #[error("API error: {message} (code: {code})")]
    Envelope { message: String, code: String },

    /// 200 response that does not match the expected shape
    #[error("Parse error: {0}")]
    Parse(String),

    /// Endpoint parameters failed validation
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// URL, header or body could not be built
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP client could not be configured
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential or clock failure
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl From<reqwest::Error> for RestError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.into())
    }
}

/// Error body returned on non-200 responses
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    #[serde(default, deserialize_with = "null_as_empty")]
    error: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    error_code: String,
}

impl RestError {
    /// Classify a non-200 response body
    ///
    /// Any JSON object becomes [`RestError::Api`], with missing or `null`
    /// `error`/`error_code` read as empty. A body that is not a JSON object
    /// becomes [`RestError::Decode`] with the status code kept.
    pub fn from_error_body(status: u16, body: &str) -> Self {
        let decoded = serde_json::from_str::<serde_json::Map<String, serde_json::Value>>(body)
            .and_then(|object| ErrorEnvelope::deserialize(serde_json::Value::Object(object)));
        match decoded {
            Ok(envelope) => Self::Api {
                status,
                message: envelope.error,
                code: envelope.error_code,
            },
            Err(e) => Self::Decode {
                status,
                body: body.to_string(),
                reason: e.to_string(),
            },
        }
    }

    /// HTTP status code, for errors that came from a response
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } | Self::Decode { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Exchange error code, for errors the exchange explained
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } | Self::Envelope { code, .. } => Some(code),
            _ => None,
        }
    }

    /// Check if the exchange rejected the request and said why
    pub fn is_api_error(&self) -> bool {
        matches!(self, Self::Api { .. } | Self::Envelope { .. })
    }

    /// Check if this error is a transport timeout
    pub fn is_timeout(&self) -> bool {
        matches!(
            self,
            Self::Transport(TransportError {
                kind: TransportErrorKind::Timeout,
                ..
            })
        )
    }

    /// Check if the caller cancelled the request
    pub fn is_cancelled(&self) -> bool {
        matches!(
            self,
            Self::Transport(TransportError {
                kind: TransportErrorKind::Cancelled,
                ..
            })
        )
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
