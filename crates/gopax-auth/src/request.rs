//! Signed outbound requests

use serde::Serialize;

use crate::credentials::{Credentials, RequestSigner};
use crate::error::AuthResult;
use crate::signing::signing_path;

/// Header carrying the API key
pub const HEADER_API_KEY: &str = "API-KEY";
/// Header carrying the signature
pub const HEADER_SIGNATURE: &str = "SIGNATURE";
/// Header carrying the nonce used for the signature
pub const HEADER_NONCE: &str = "NONCE";
/// Content type header name
pub const HEADER_CONTENT_TYPE: &str = "Content-Type";
/// Content type sent with every authenticated request
pub const CONTENT_TYPE_JSON: &str = "application/json";

/// A request ready to be put on the wire
///
/// Holds the body as the exact text that was signed; transports must send
/// [`SignedRequest::body`] verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    api_key: String,
    method: String,
    path: String,
    nonce: u64,
    body: Option<String>,
    signature: String,
}

impl SignedRequest {
    /// Sign a request with a fresh nonce
    ///
    /// `path` may carry a query string; it is transmitted but not signed.
    pub fn new<B>(
        credentials: &Credentials,
        method: &str,
        path: impl Into<String>,
        body: Option<&B>,
    ) -> AuthResult<Self>
    where
        B: Serialize + ?Sized,
    {
        RequestSigner::new(credentials, method, path)?.finish(body)
    }

    pub(crate) fn from_parts(
        api_key: String,
        method: String,
        path: String,
        nonce: u64,
        body: Option<String>,
        signature: String,
    ) -> Self {
        Self {
            api_key,
            method,
            path,
            nonce,
            body,
            signature,
        }
    }

    /// Uppercase HTTP method
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Path as given, including any query string
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Path that was signed (query string removed)
    pub fn signing_path(&self) -> &str {
        signing_path(&self.path)
    }

    /// Nonce that was signed
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    /// JSON body text that was signed, if any
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Base64 signature
    pub fn signature(&self) -> &str {
        &self.signature
    }

    /// The full header set for this request
    ///
    /// `Content-Type: application/json` is included even without a body.
    pub fn headers(&self) -> [(&'static str, String); 4] {
        [
            (HEADER_API_KEY, self.api_key.clone()),
            (HEADER_SIGNATURE, self.signature.clone()),
            (HEADER_NONCE, self.nonce.to_string()),
            (HEADER_CONTENT_TYPE, CONTENT_TYPE_JSON.to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn creds() -> Credentials {
        Credentials::new("my-key", "a2V5").unwrap()
    }

    #[test]
    fn test_header_set() {
        let creds = creds();
        let request = RequestSigner::with_nonce(&creds, "GET", "/balances/KRW", 1_700_000_000_000)
            .finish::<()>(None)
            .unwrap();

        let headers = request.headers();
        assert_eq!(headers[0], ("API-KEY", "my-key".to_string()));
        assert_eq!(headers[1].0, "SIGNATURE");
        assert_eq!(headers[1].1, request.signature());
        assert_eq!(headers[2], ("NONCE", "1700000000000".to_string()));
        assert_eq!(headers[3], ("Content-Type", "application/json".to_string()));
    }

    #[test]
    fn test_query_kept_for_transmission_only() {
        let creds = creds();
        let with_query = RequestSigner::with_nonce(&creds, "GET", "/trades?pastmax=10", 5)
            .finish::<()>(None)
            .unwrap();
        let without = RequestSigner::with_nonce(&creds, "GET", "/trades", 5)
            .finish::<()>(None)
            .unwrap();

        assert_eq!(with_query.path(), "/trades?pastmax=10");
        assert_eq!(with_query.signing_path(), "/trades");
        assert_eq!(with_query.signature(), without.signature());
    }

    #[test]
    fn test_fresh_nonce_per_request() {
        let creds = creds();
        let first = SignedRequest::new::<()>(&creds, "GET", "/orders", None).unwrap();
        let second = SignedRequest::new::<()>(&creds, "GET", "/orders", None).unwrap();
        assert!(second.nonce() > first.nonce());
        assert_ne!(first.signature(), second.signature());
    }
}
