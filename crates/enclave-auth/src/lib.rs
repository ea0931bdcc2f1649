//! Credentials and request signing for the Enclave REST API
//!
//! Every Enclave request is authenticated with three headers computed from an
//! API key ID, an API secret and the exact bytes of the outgoing request.
//!
//! # Signature
//!
//! ```text
//! ENCLAVE-KEY-ID:    <key id>
//! ENCLAVE-TIMESTAMP: <milliseconds since epoch>
//! ENCLAVE-SIGN:      hex(HMAC-SHA256(secret, timestamp + METHOD + path[?query] + body))
//! ```
//!
//! # Example
//!
//! ```
//! use enclave_auth::Credentials;
//!
//! let creds = Credentials::new("my-key-id", "my-secret").unwrap();
//! let headers = creds.auth_headers(1_700_000_000_000, "GET", "/v1/orders?market=AVAX-USDC", b"");
//! assert_eq!(headers.key_id(), "my-key-id");
//! assert_eq!(headers.signature().len(), 64);
//! ```

mod credentials;
mod error;
pub mod signer;

pub use credentials::{AuthHeaders, Credentials};
pub use error::{AuthError, AuthResult};
pub use signer::{
    now_millis, sign, signing_message, KEY_ID_HEADER, SIGNATURE_HEADER, TIMESTAMP_HEADER,
};
