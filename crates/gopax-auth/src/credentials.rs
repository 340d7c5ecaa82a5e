//! Authentication credentials for the GOPAX API
//!
//! # Security
//!
//! Secrets are stored using the `secrecy` crate which:
//! - Zeroizes memory on drop (prevents memory scanning)
//! - Prevents accidental logging via Debug impl
//! - Provides explicit access via `expose_secret()`

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use secrecy::{ExposeSecret, SecretBox};
use serde::Serialize;
use tracing::trace;

use crate::error::{AuthError, AuthResult};
use crate::nonce::{MonotonicNonce, NonceSource};
use crate::request::SignedRequest;
use crate::signing::{body_text, mac_base64, signing_message, signing_path};

/// Process-wide nonce source used when the caller does not supply one
static NONCE_SOURCE: MonotonicNonce = MonotonicNonce::new();

/// Environment variable holding the API key
pub const ENV_API_KEY: &str = "GOPAX_API_KEY";
/// Environment variable holding the base64 secret
pub const ENV_SECRET: &str = "GOPAX_SECRET";

/// API credentials for authenticated requests
///
/// The secret is decoded once and zeroized when the Credentials are dropped.
pub struct Credentials {
    /// API key (public)
    api_key: String,
    /// Secret (decoded from base64, zeroized on drop)
    secret: SecretBox<Vec<u8>>,
}

impl Credentials {
    /// Create new credentials from an API key and a base64 secret
    ///
    /// # Returns
    /// Result containing Credentials or error if the secret is not base64
    pub fn new(api_key: impl Into<String>, secret: impl AsRef<str>) -> AuthResult<Self> {
        let decoded = BASE64.decode(secret.as_ref()).map_err(|e| {
            AuthError::InvalidCredentials(format!("Invalid base64 secret: {}", e))
        })?;

        Ok(Self {
            api_key: api_key.into(),
            secret: SecretBox::new(Box::new(decoded)),
        })
    }

    /// Create credentials from environment variables
    ///
    /// Reads `GOPAX_API_KEY` and `GOPAX_SECRET` from the environment.
    pub fn from_env() -> AuthResult<Self> {
        let api_key = std::env::var(ENV_API_KEY)
            .map_err(|_| AuthError::EnvVarNotSet(ENV_API_KEY.to_string()))?;
        let secret = std::env::var(ENV_SECRET)
            .map_err(|_| AuthError::EnvVarNotSet(ENV_SECRET.to_string()))?;

        Self::new(api_key, secret)
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Generate a nonce from the shared wall-clock source
    pub fn generate_nonce() -> AuthResult<u64> {
        NONCE_SOURCE.next_nonce()
    }

    /// Sign a request
    ///
    /// # Arguments
    /// * `nonce` - Nonce sent with the request
    /// * `method` - HTTP method
    /// * `path` - Request path (query string ignored)
    /// * `body` - JSON body text exactly as transmitted
    ///
    /// # Returns
    /// Base64-encoded signature
    pub fn sign(&self, nonce: u64, method: &str, path: &str, body: Option<&str>) -> String {
        let message = signing_message(nonce, method, path, body);
        mac_base64(self.secret.expose_secret(), &message)
    }
}

impl Clone for Credentials {
    /// Clone credentials (creates new SecretBox with same content)
    fn clone(&self) -> Self {
        Self {
            api_key: self.api_key.clone(),
            secret: SecretBox::new(Box::new(self.secret.expose_secret().clone())),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let visible: String = self.api_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format!("{}...", visible))
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

/// Request signer for building authenticated requests
///
/// Fixes the nonce at construction so the caller can serialize nonce
/// issuance if it needs to.
#[derive(Debug)]
pub struct RequestSigner<'a> {
    credentials: &'a Credentials,
    method: String,
    path: String,
    nonce: u64,
}

impl<'a> RequestSigner<'a> {
    /// Create a new request signer with a fresh nonce
    pub fn new(
        credentials: &'a Credentials,
        method: &str,
        path: impl Into<String>,
    ) -> AuthResult<Self> {
        Ok(Self::with_nonce(credentials, method, path, Credentials::generate_nonce()?))
    }

    /// Create a new request signer with a nonce from `source`
    pub fn from_source(
        credentials: &'a Credentials,
        method: &str,
        path: impl Into<String>,
        source: &dyn NonceSource,
    ) -> AuthResult<Self> {
        Ok(Self::with_nonce(credentials, method, path, source.next_nonce()?))
    }

    /// Create a new request signer with an explicit nonce
    pub fn with_nonce(
        credentials: &'a Credentials,
        method: &str,
        path: impl Into<String>,
        nonce: u64,
    ) -> Self {
        Self {
            credentials,
            method: method.to_ascii_uppercase(),
            path: path.into(),
            nonce,
        }
    }

    /// Get the nonce for this request
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// Get the API key
    pub fn api_key(&self) -> &str {
        self.credentials.api_key()
    }

    /// Sign the request with already-serialized body text
    pub fn sign(&self, body: Option<&str>) -> String {
        self.credentials.sign(self.nonce, &self.method, &self.path, body)
    }

    /// Serialize `body`, sign it, and produce the outbound request
    pub fn finish<B>(self, body: Option<&B>) -> AuthResult<SignedRequest>
    where
        B: Serialize + ?Sized,
    {
        let body = body_text(body)?;
        let signature = self.sign(body.as_deref());
        trace!(method = %self.method, path = %signing_path(&self.path), nonce = self.nonce, "signed request");

        Ok(SignedRequest::from_parts(
            self.credentials.api_key().to_string(),
            self.method,
            self.path,
            self.nonce,
            body,
            signature,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signing::sign;

    const SECRET: &str =
        "kEO9mHCtFMF4KsmTXb46O9KxxuNhHPaDFmuc0nX+jTsm4dnWgcM4ME8k28tirWkVDjC47UZke2PFFcKmjlJc5g==";

    #[test]
    fn test_nonce_generation() {
        let nonce1 = Credentials::generate_nonce().unwrap();
        let nonce2 = Credentials::generate_nonce().unwrap();
        assert!(nonce2 > nonce1);
    }

    #[test]
    fn test_credentials_debug_redacts_secret() {
        let creds = Credentials::new("61c3c6c3-2410-4e11", SECRET).unwrap();
        let debug = format!("{:?}", creds);
        assert!(!debug.contains(SECRET));
        assert!(debug.contains("[REDACTED]"));
        assert!(debug.contains("61c3c6c3..."));
    }

    #[test]
    fn test_invalid_secret_rejected() {
        let err = Credentials::new("key", "%%%").unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials(_)));
    }

    #[test]
    fn test_balances_signature() {
        let creds = Credentials::new("key", SECRET).unwrap();
        let signature = creds.sign(1_521_018_077_000, "GET", "/balances", None);
        assert_eq!(
            signature,
            "APbyYRP/uicji/jHXfnKeoSxURdZN9vXe77xgySbSgvsGjMoSdpS6o17Ab2ck8yEHh20oWT5dU7zFBLZu0i0yA=="
        );
    }

    #[test]
    fn test_matches_free_function() {
        let creds = Credentials::new("key", SECRET).unwrap();
        let via_creds = creds.sign(42, "get", "/orders/7?x=1", None);
        let via_fn = sign::<()>(SECRET, 42, "GET", "/orders/7", None).unwrap();
        assert_eq!(via_creds, via_fn);
    }

    #[test]
    fn test_signer_finish_signs_transmitted_body() {
        let creds = Credentials::new("key", SECRET).unwrap();
        let body = serde_json::json!({"amount": 1});
        let request = RequestSigner::with_nonce(&creds, "post", "/orders", 99)
            .finish(Some(&body))
            .unwrap();

        assert_eq!(request.method(), "POST");
        assert_eq!(request.body(), Some(r#"{"amount":1}"#));
        assert_eq!(request.signature(), creds.sign(99, "POST", "/orders", request.body()));
    }
}
