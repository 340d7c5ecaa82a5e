//! HTTP transport shared by the endpoint groups
//!
//! Turns an [`Endpoint`] plus query and body into a request, and the
//! response into either a decoded value or one of the [`RestError`] kinds.
//! Non-2xx answers are never decoded.

use std::sync::Arc;

use gopax_auth::{Credentials, NonceSource, RequestSigner, SignedRequest};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::contract::{is_empty_body, ContractViolation};
use crate::endpoints::Endpoint;
use crate::error::{RestError, RestResult};

/// Production API host
pub const DEFAULT_BASE_URL: &str = "https://api.gopax.co.kr";

#[derive(Clone)]
pub(crate) struct Transport {
    client: Client,
    base_url: String,
    nonce_source: Option<Arc<dyn NonceSource>>,
}

impl Transport {
    pub(crate) fn new(
        client: Client,
        base_url: impl Into<String>,
        nonce_source: Option<Arc<dyn NonceSource>>,
    ) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            nonce_source,
        }
    }

    pub(crate) fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path_and_query: &str) -> String {
        format!("{}{}", self.base_url, path_and_query)
    }

    /// Unsigned GET
    pub(crate) async fn get_public<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint<'_>,
        query: &[(&'static str, String)],
    ) -> RestResult<T> {
        if endpoint.requires_auth() {
            return Err(RestError::AuthRequired);
        }
        let path = endpoint.path_and_query(query)?;
        debug!("GET {}", path);

        let text = self.send(endpoint, self.client.get(self.url(&path))).await?;
        decode(endpoint, &text)
    }

    /// Signed request with a JSON response
    pub(crate) async fn send_signed<T, B>(
        &self,
        credentials: &Credentials,
        endpoint: Endpoint<'_>,
        query: &[(&'static str, String)],
        body: Option<&B>,
    ) -> RestResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let text = self.signed_text(credentials, endpoint, query, body).await?;
        decode(endpoint, &text)
    }

    /// Signed request whose success answer carries no content
    pub(crate) async fn send_signed_empty(
        &self,
        credentials: &Credentials,
        endpoint: Endpoint<'_>,
    ) -> RestResult<()> {
        let text = self.signed_text::<()>(credentials, endpoint, &[], None).await?;
        if !is_empty_body(&text) {
            return Err(ContractViolation::CancelBody(text).into());
        }
        Ok(())
    }

    /// Sign a request for `endpoint` without sending it
    pub(crate) fn sign<B>(
        &self,
        credentials: &Credentials,
        endpoint: Endpoint<'_>,
        query: &[(&'static str, String)],
        body: Option<&B>,
    ) -> RestResult<SignedRequest>
    where
        B: Serialize + ?Sized,
    {
        let path = endpoint.path_and_query(query)?;
        let method = endpoint.method();
        let signer = match &self.nonce_source {
            Some(source) => {
                RequestSigner::from_source(credentials, method.as_str(), path, source.as_ref())?
            }
            None => RequestSigner::new(credentials, method.as_str(), path)?,
        };
        Ok(signer.finish(body)?)
    }

    async fn signed_text<B>(
        &self,
        credentials: &Credentials,
        endpoint: Endpoint<'_>,
        query: &[(&'static str, String)],
        body: Option<&B>,
    ) -> RestResult<String>
    where
        B: Serialize + ?Sized,
    {
        let signed = self.sign(credentials, endpoint, query, body)?;
        debug!("{} {} (nonce {})", signed.method(), signed.path(), signed.nonce());

        let mut builder = self
            .client
            .request(endpoint.method(), self.url(signed.path()));
        for (name, value) in signed.headers() {
            builder = builder.header(name, value);
        }
        if let Some(body) = signed.body() {
            builder = builder.body(body.to_string());
        }

        self.send(endpoint, builder).await
    }

    /// Issue the request and return the body of a 2xx answer
    async fn send(&self, endpoint: Endpoint<'_>, builder: RequestBuilder) -> RestResult<String> {
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), endpoint = endpoint.name(), "request rejected");
            return Err(RestError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

fn decode<T: DeserializeOwned>(endpoint: Endpoint<'_>, text: &str) -> RestResult<T> {
    serde_json::from_str(text).map_err(|e| RestError::Decode {
        endpoint: endpoint.name(),
        message: e.to_string(),
    })
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("base_url", &self.base_url)
            .field("custom_nonce_source", &self.nonce_source.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gopax_auth::MonotonicNonce;

    #[test]
    fn test_base_url_trailing_slash() {
        let transport = Transport::new(Client::new(), "http://localhost:8080/", None);
        assert_eq!(transport.base_url(), "http://localhost:8080");
        assert_eq!(transport.url("/assets"), "http://localhost:8080/assets");
    }

    #[test]
    fn test_sign_uses_configured_nonce_source() {
        let source = Arc::new(MonotonicNonce::new());
        source.next_after(u64::MAX - 10).unwrap();
        let transport =
            Transport::new(Client::new(), DEFAULT_BASE_URL, Some(source as Arc<dyn NonceSource>));
        let creds = Credentials::new("key", "a2V5").unwrap();

        let signed = transport
            .sign::<()>(&creds, Endpoint::Trades, &[("limit", "10".to_string())], None)
            .unwrap();
        assert_eq!(signed.nonce(), u64::MAX - 9);
        assert_eq!(signed.path(), "/trades?limit=10");
        assert_eq!(signed.signing_path(), "/trades");
        assert_eq!(signed.signature(), creds.sign(signed.nonce(), "GET", "/trades", None));
    }

    #[test]
    fn test_sign_fails_locally_when_nonces_run_out() {
        let source = Arc::new(MonotonicNonce::new());
        source.next_after(u64::MAX).unwrap();
        let transport =
            Transport::new(Client::new(), DEFAULT_BASE_URL, Some(source as Arc<dyn NonceSource>));
        let creds = Credentials::new("key", "a2V5").unwrap();

        let err = transport.sign::<()>(&creds, Endpoint::Balances, &[], None).unwrap_err();
        assert!(matches!(err, RestError::NonceExhausted));
        assert!(err.is_local());
    }

    #[test]
    fn test_decode_error_names_endpoint() {
        let err = decode::<Vec<u8>>(Endpoint::Assets, "{}").unwrap_err();
        assert!(matches!(err, RestError::Decode { endpoint: "assets", .. }));
    }
}
