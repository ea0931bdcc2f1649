//! HMAC-SHA256 request signer
//!
//! Pure functions only: the same inputs always produce the same signature.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::error::{AuthError, AuthResult};

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the API key ID
pub const KEY_ID_HEADER: &str = "ENCLAVE-KEY-ID";
/// Header carrying the request timestamp in milliseconds
pub const TIMESTAMP_HEADER: &str = "ENCLAVE-TIMESTAMP";
/// Header carrying the hex signature
pub const SIGNATURE_HEADER: &str = "ENCLAVE-SIGN";

/// Build the exact byte string that gets signed
///
/// `timestamp + METHOD + path_with_query + body`, no separators. The method is
/// upper-cased here; `path_with_query` must already be the wire encoding.
pub fn signing_message(
    timestamp_ms: u64,
    method: &str,
    path_with_query: &str,
    body: &[u8],
) -> Vec<u8> {
    let timestamp = timestamp_ms.to_string();
    let method = method.to_ascii_uppercase();

    let mut message =
        Vec::with_capacity(timestamp.len() + method.len() + path_with_query.len() + body.len());
    message.extend_from_slice(timestamp.as_bytes());
    message.extend_from_slice(method.as_bytes());
    message.extend_from_slice(path_with_query.as_bytes());
    message.extend_from_slice(body);
    message
}

/// Sign a request
///
/// # Arguments
/// * `secret` - Raw API secret bytes
/// * `timestamp_ms` - Milliseconds since the Unix epoch
/// * `method` - HTTP method (any case)
/// * `path_with_query` - Path plus `?query` if there is one, as sent
/// * `body` - Exact request body, empty when there is none
///
/// # Returns
/// Lowercase hex encoded HMAC-SHA256 digest
pub fn sign(
    secret: &[u8],
    timestamp_ms: u64,
    method: &str,
    path_with_query: &str,
    body: &[u8],
) -> String {
    let message = signing_message(timestamp_ms, method, path_with_query, body);

    // HMAC pads or hashes the key to the block size, so every length is accepted
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC can take key of any size");
    mac.update(&message);

    hex::encode(mac.finalize().into_bytes())
}

/// Current time in milliseconds since the Unix epoch
pub fn now_millis() -> AuthResult<u64> {
    let elapsed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AuthError::SystemClock)?;
    Ok(elapsed.as_millis() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret";
    const TS: u64 = 1_700_000_000_123;

    #[test]
    fn test_signing_message_layout() {
        let message = signing_message(TS, "post", "/v1/orders?market=AVAX-USDC", b"{\"a\":1}");
        assert_eq!(
            message,
            b"1700000000123POST/v1/orders?market=AVAX-USDC{\"a\":1}".to_vec()
        );
    }

    #[test]
    fn test_signing_message_empty_body() {
        let message = signing_message(TS, "GET", "/v1/perps/balance", b"");
        assert_eq!(message, b"1700000000123GET/v1/perps/balance".to_vec());
    }

    #[test]
    fn test_sign_is_deterministic() {
        let first = sign(SECRET, TS, "GET", "/v1/fills?limit=10", b"");
        for _ in 0..10 {
            assert_eq!(sign(SECRET, TS, "GET", "/v1/fills?limit=10", b""), first);
        }
    }

    #[test]
    fn test_sign_is_lowercase_hex() {
        let signature = sign(SECRET, TS, "DELETE", "/v1/orders/abc", b"");
        assert_eq!(signature.len(), 64);
        assert!(signature
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_method_case_does_not_matter() {
        assert_eq!(
            sign(SECRET, TS, "post", "/v1/orders", b"{}"),
            sign(SECRET, TS, "POST", "/v1/orders", b"{}")
        );
    }

    #[test]
    fn test_matches_hmac_over_concatenation() {
        let expected = {
            let mut mac = HmacSha256::new_from_slice(b"key").unwrap();
            mac.update(b"1700000000123PUT/v1/perps/stop_order?market=BTC-USD.P{\"x\":1}");
            hex::encode(mac.finalize().into_bytes())
        };
        assert_eq!(
            sign(b"key", TS, "put", "/v1/perps/stop_order?market=BTC-USD.P", b"{\"x\":1}"),
            expected
        );
    }

    #[test]
    fn test_any_key_length_signs() {
        let long_key = [7u8; 200];
        for key in [&b""[..], &b"k"[..], &long_key[..]] {
            assert_eq!(sign(key, TS, "GET", "/v1/fills", b"").len(), 64);
        }
    }

    #[test]
    fn test_single_byte_changes_alter_signature() {
        let base = sign(SECRET, TS, "POST", "/v1/orders?market=a", b"a");

        assert_ne!(base, sign(SECRET, TS, "POST", "/v1/orders?market=a", b"a "));
        assert_ne!(base, sign(SECRET, TS, "POST", "/v1/orderz?market=a", b"a"));
        assert_ne!(base, sign(SECRET, TS, "POST", "/v1/orders?market=b", b"a"));
        assert_ne!(base, sign(SECRET, TS + 1, "POST", "/v1/orders?market=a", b"a"));
        assert_ne!(base, sign(b"test-secreT", TS, "POST", "/v1/orders?market=a", b"a"));
    }

    #[test]
    fn test_field_boundaries_are_not_ambiguous_for_method() {
        assert_ne!(
            sign(SECRET, TS, "GET", "/x", b""),
            sign(SECRET, TS, "PUT", "/x", b"")
        );
    }

    #[test]
    fn test_now_millis_is_recent() {
        let now = now_millis().unwrap();
        // After 2020-01-01
        assert!(now > 1_577_836_800_000);
    }
}
