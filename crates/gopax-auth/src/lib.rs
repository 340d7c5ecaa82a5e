//! Request signing and credentials for the GOPAX REST API
//!
//! Private endpoints are authenticated with three headers:
//!
//! - `API-KEY` - the public key
//! - `NONCE` - a fresh, increasing integer (epoch milliseconds)
//! - `SIGNATURE` - `base64(HMAC-SHA512(base64decode(secret), nonce ++ METHOD ++ path ++ body))`
//!
//! where `path` excludes any query string and `body` is the exact JSON text
//! sent on the wire (empty when there is no body).
//!
//! This crate is pure: it computes signatures and header sets but never
//! performs I/O.
//!
//! # Example
//!
//! ```no_run
//! use gopax_auth::{Credentials, RequestSigner};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let creds = Credentials::from_env()?;
//!
//! let request = RequestSigner::new(&creds, "GET", "/balances")?.finish::<()>(None)?;
//! for (name, value) in request.headers() {
//!     println!("{name}: {value}");
//! }
//! # Ok(())
//! # }
//! ```

mod credentials;
mod error;
mod nonce;
mod request;
mod signing;

pub use credentials::{Credentials, RequestSigner};
pub use error::{AuthError, AuthResult};
pub use nonce::{now_millis, MonotonicNonce, NonceSource};
pub use request::{
    SignedRequest, CONTENT_TYPE_JSON, HEADER_API_KEY, HEADER_CONTENT_TYPE, HEADER_NONCE,
    HEADER_SIGNATURE,
};
pub use signing::{sign, signing_message, signing_path};
