//! HMAC-SHA256 webhook signature verification
//!
//! The payment processor signs the raw request body with a shared
//! secret and sends the lowercase hex digest in the `X-Signature`
//! header. Verification compares in constant time and is
//! case-sensitive: a re-cased signature does not verify.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Compute the lowercase hex HMAC-SHA256 signature for a payload.
pub fn sign(payload: &[u8], secret: &[u8]) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret).expect("HMAC accepts keys of any length");
    mac.update(payload);
    hex::encode(mac.finalize().into_bytes())
}

/// Verify a provided signature against the raw payload.
///
/// Empty payloads and empty signatures never verify.
pub fn verify(payload: &[u8], provided: &str, secret: &[u8]) -> bool {
    if payload.is_empty() || provided.is_empty() {
        return false;
    }
    let expected = sign(payload, secret);
    expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test_webhook_secret";

    #[test]
    fn test_sign_produces_lowercase_hex() {
        let sig = sign(b"{\"order_id\":\"abc\"}", SECRET);
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_valid_signature_verifies() {
        let body = br#"{"order_id":"550e8400-e29b-41d4-a716-446655440000","payment_status":"paid"}"#;
        let sig = sign(body, SECRET);
        assert!(verify(body, &sig, SECRET));
    }

    #[test]
    fn test_tampered_payload_fails() {
        let sig = sign(b"original body", SECRET);
        assert!(!verify(b"tampered body", &sig, SECRET));
    }

    #[test]
    fn test_wrong_secret_fails() {
        let body = b"payload";
        let sig = sign(body, SECRET);
        assert!(!verify(body, &sig, b"other_secret"));
    }

    #[test]
    fn test_uppercase_signature_is_rejected() {
        let body = b"payload";
        let sig = sign(body, SECRET).to_uppercase();
        assert!(!verify(body, &sig, SECRET));
    }

    #[test]
    fn test_empty_payload_and_signature_never_verify() {
        assert!(!verify(b"", &sign(b"", SECRET), SECRET));
        assert!(!verify(b"payload", "", SECRET));
    }

    #[test]
    fn test_truncated_signature_fails() {
        let body = b"payload";
        let sig = sign(body, SECRET);
        assert!(!verify(body, &sig[..32], SECRET));
    }
}
