//! API credentials for authenticated requests
//!
//! # Security
//!
//! The API secret is stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use secrecy::{ExposeSecret, SecretBox};

use crate::error::{AuthError, AuthResult};
use crate::signer::{self, KEY_ID_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER};

/// Environment variable holding the API key ID
const KEY_ENV_VAR: &str = "enclave_key";
/// Environment variable holding the API secret
const SECRET_ENV_VAR: &str = "enclave_secret";

/// API key ID and secret
///
/// The secret is zeroized when the Credentials are dropped.
pub struct Credentials {
    /// API key ID (sent verbatim in `ENCLAVE-KEY-ID`)
    key_id: String,
    /// API secret used as the HMAC key
    secret: SecretBox<Vec<u8>>,
}

impl Credentials {
    /// Create new credentials from a key ID and secret
    ///
    /// The secret is used as raw bytes; it is not decoded.
    pub fn new(key_id: impl Into<String>, secret: impl AsRef<[u8]>) -> AuthResult<Self> {
        let key_id = key_id.into();
        let secret = secret.as_ref();

        if key_id.is_empty() {
            return Err(AuthError::InvalidCredentials("empty key id".to_string()));
        }
        if secret.is_empty() {
            return Err(AuthError::InvalidCredentials("empty secret".to_string()));
        }

        Ok(Self {
            key_id,
            secret: SecretBox::new(Box::new(secret.to_vec())),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `enclave_key` and `enclave_secret` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let key_id = std::env::var(KEY_ENV_VAR)
            .map_err(|_| AuthError::EnvVarNotSet(KEY_ENV_VAR.to_string()))?;
        let secret = std::env::var(SECRET_ENV_VAR)
            .map_err(|_| AuthError::EnvVarNotSet(SECRET_ENV_VAR.to_string()))?;

        Self::new(key_id, secret)
    }

    /// Get the API key ID
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    /// Sign a request with this secret
    pub fn sign(&self, timestamp_ms: u64, method: &str, path_with_query: &str, body: &[u8]) -> String {
        signer::sign(
            self.secret.expose_secret(),
            timestamp_ms,
            method,
            path_with_query,
            body,
        )
    }

    /// Compute the three authentication headers for a request
    pub fn auth_headers(
        &self,
        timestamp_ms: u64,
        method: &str,
        path_with_query: &str,
        body: &[u8],
    ) -> AuthHeaders {
        AuthHeaders {
            key_id: self.key_id.clone(),
            timestamp: timestamp_ms.to_string(),
            signature: self.sign(timestamp_ms, method, path_with_query, body),
        }
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates new SecretBox with same content)
    fn clone(&self) -> Self {
        Self {
            key_id: self.key_id.clone(),
            secret: SecretBox::new(Box::new(self.secret.expose_secret().clone())),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible = self
            .key_id
            .char_indices()
            .nth(8)
            .map_or(self.key_id.as_str(), |(idx, _)| &self.key_id[..idx]);

        f.debug_struct("Credentials")
            .field("key_id", &format!("{}...", visible))
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// The authentication headers attached to one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthHeaders {
    key_id: String,
    timestamp: String,
    signature: String,
}

impl AuthHeaders {
    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// Header name/value pairs, always exactly three
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (KEY_ID_HEADER, self.key_id.as_str()),
            (TIMESTAMP_HEADER, self.timestamp.as_str()),
            (SIGNATURE_HEADER, self.signature.as_str()),
        ]
        .into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("0123456789abcdef", "super_secret_value").unwrap();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains("super_secret_value"));
        assert!(!debug.contains("0123456789abcdef"));
        assert!(debug.contains("01234567..."));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_short_key_id_debug() {
        let creds = Credentials::new("abc", "s").unwrap();
        assert!(format!("{:?}", creds).contains("abc..."));
    }

    #[test]
    fn test_empty_values_rejected() {
        assert!(matches!(
            Credentials::new("", "secret"),
            Err(AuthError::InvalidCredentials(_))
        ));
        assert!(matches!(
            Credentials::new("key", ""),
            Err(AuthError::InvalidCredentials(_))
        ));
    }

    #[test]
    fn test_auth_headers_match_signer() {
        let creds = Credentials::new("key-1", "secret").unwrap();
        let headers = creds.auth_headers(42, "get", "/v1/perps/positions", b"");

        assert_eq!(headers.key_id(), "key-1");
        assert_eq!(headers.timestamp(), "42");
        assert_eq!(
            headers.signature(),
            signer::sign(b"secret", 42, "GET", "/v1/perps/positions", b"")
        );

        let names: Vec<&str> = headers.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec![KEY_ID_HEADER, TIMESTAMP_HEADER, SIGNATURE_HEADER]);
    }

    #[test]
    fn test_clone_signs_identically() {
        let creds = Credentials::new("key-1", "secret").unwrap();
        let cloned = creds.clone();
        assert_eq!(
            creds.sign(1, "POST", "/v1/orders", b"{}"),
            cloned.sign(1, "POST", "/v1/orders", b"{}")
        );
    }
}
