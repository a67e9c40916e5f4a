//! Canonicalization and keyed hashing for VNPay parameter maps.
//!
//! The canonical string is the exact byte sequence both sides hash: keys
//! in lexicographic (byte) order, values form-urlencoded with `+` for
//! space. Any deviation produces a signature the gateway rejects.

use std::collections::BTreeMap;

use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::error::PaymentError;

type HmacSha512 = Hmac<Sha512>;

/// Signature field appended to outbound requests and stripped before
/// verifying inbound ones.
pub const SECURE_HASH_FIELD: &str = "vnp_SecureHash";
/// Legacy metadata field some gateway responses carry; never hashed.
pub const SECURE_HASH_TYPE_FIELD: &str = "vnp_SecureHashType";

/// Builds the sorted, form-urlencoded `k1=v1&k2=v2...` string, skipping
/// the signature fields themselves.
pub fn canonical_query(params: &BTreeMap<String, String>) -> Result<String, PaymentError> {
    let filtered: BTreeMap<&str, &str> = params
        .iter()
        .filter(|(key, _)| {
            key.as_str() != SECURE_HASH_FIELD && key.as_str() != SECURE_HASH_TYPE_FIELD
        })
        .map(|(key, value)| (key.as_str(), value.as_str()))
        .collect();

    serde_urlencoded::to_string(filtered).map_err(|e| PaymentError::Encoding(e.to_string()))
}

/// HMAC-SHA512 digest as lowercase hex (128 characters).
pub fn hmac_sha512_hex(key: &[u8], message: &[u8]) -> Result<String, PaymentError> {
    let mut mac = HmacSha512::new_from_slice(key)
        .map_err(|_| PaymentError::Signature("invalid HMAC key length".to_string()))?;
    mac.update(message);
    let digest = mac.finalize().into_bytes();

    Ok(hex::encode(digest))
}

/// Canonicalizes `params` and signs the result with `secret`. Returns the
/// canonical query and its digest so callers can reuse the exact signed
/// bytes when assembling a URL.
pub fn sign(
    params: &BTreeMap<String, String>,
    secret: &str,
) -> Result<(String, String), PaymentError> {
    let query = canonical_query(params)?;
    let digest = hmac_sha512_hex(secret.as_bytes(), query.as_bytes())?;

    Ok((query, digest))
}
