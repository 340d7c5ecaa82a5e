//! The request signature algorithm
//!
//! 1. Strip the query string from the path
//! 2. message = nonce (decimal) ++ METHOD ++ path ++ body JSON (or "")
//! 3. HMAC-SHA512 keyed with the base64-decoded secret
//! 4. Base64 encode the MAC

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha512;

use crate::error::{AuthError, AuthResult};

type HmacSha512 = Hmac<Sha512>;

/// The part of `path` that is signed: everything before the first `?`
pub fn signing_path(path: &str) -> &str {
    match path.split_once('?') {
        Some((before, _)) => before,
        None => path,
    }
}

/// Build the exact text that gets MACed
///
/// `body` must already be the JSON text that will be transmitted.
pub fn signing_message(nonce: u64, method: &str, path: &str, body: Option<&str>) -> String {
    let path = signing_path(path);
    let body = body.unwrap_or("");
    let mut message = String::with_capacity(20 + method.len() + path.len() + body.len());
    message.push_str(&nonce.to_string());
    message.push_str(&method.to_ascii_uppercase());
    message.push_str(path);
    message.push_str(body);
    message
}

/// Serialize a request body to the text that is both signed and sent
///
/// A body that serializes to JSON `null` counts as no body.
pub(crate) fn body_text<B>(body: Option<&B>) -> AuthResult<Option<String>>
where
    B: Serialize + ?Sized,
{
    match body {
        None => Ok(None),
        Some(body) => {
            let text = serde_json::to_string(body)?;
            Ok((text != "null").then_some(text))
        }
    }
}

/// MAC `message` with raw key bytes and return base64 text
pub(crate) fn mac_base64(key: &[u8], message: &str) -> String {
    let mut mac = HmacSha512::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    BASE64.encode(mac.finalize().into_bytes())
}

/// Compute a request signature
///
/// # Arguments
/// * `secret` - API secret, base64 encoded
/// * `nonce` - Nonce sent in the `NONCE` header
/// * `method` - HTTP method (case-insensitive, signed uppercase)
/// * `path` - Request path; any query string is ignored
/// * `body` - Request body, serialized to JSON exactly as it will be sent
///
/// # Errors
/// [`AuthError::InvalidCredentials`] if `secret` is not base64,
/// [`AuthError::Serialize`] if `body` cannot be serialized.
pub fn sign<B>(secret: &str, nonce: u64, method: &str, path: &str, body: Option<&B>) -> AuthResult<String>
where
    B: Serialize + ?Sized,
{
    let key = BASE64
        .decode(secret)
        .map_err(|e| AuthError::InvalidCredentials(format!("Invalid base64 secret: {}", e)))?;
    let body = body_text(body)?;
    let message = signing_message(nonce, method, path, body.as_deref());
    Ok(mac_base64(&key, &message))
}
