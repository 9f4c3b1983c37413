//! Sign API gateway requests with AWS SigV4, without carrying an AWS SDK.
//!
//! gatesign computes the `Authorization` header and fully qualified URL for
//! requests to a credential-protected HTTP endpoint, such as an API Gateway
//! stage behind IAM auth. It owns the signing pipeline only: canonical
//! request construction, credential-scope derivation, chained-HMAC key
//! derivation, signature computation, and header assembly. Issuing the
//! request stays with the caller and any HTTP client they prefer.
//!
//! ## Overview
//!
//! - [`RequestSigner`]: resolves configuration once at build time and signs
//!   requests from then on, safe to share across threads
//! - [`ProvideCredential`]: the seam for credential resolution, with
//!   environment-backed and static implementations included
//! - [`RequestToSign`] / [`SignedRequestData`]: the input and output of one
//!   signing pass
//! - [`RequestSigner::make_request_with_retries`]: drives a caller-supplied
//!   transport callback, re-signing on every attempt
//!
//! ## Example
//!
//! ```
//! use gatesign::{RequestSigner, RequestToSign};
//!
//! fn main() -> gatesign::Result<()> {
//!     let signer = RequestSigner::builder("https://abc123.execute-api.us-east-1.amazonaws.com/prod")
//!         .access_key_id("AKIDEXAMPLE")
//!         .secret_access_key("wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY")
//!         .region("us-east-1")
//!         .build()?;
//!
//!     let request = RequestToSign::new(http::Method::GET, "/pets").with_query("limit", "10");
//!     let signed = signer.sign_request(&request)?;
//!
//!     assert!(signed.headers.contains_key(http::header::AUTHORIZATION));
//!     assert!(signed.url.ends_with("/prod/pets?limit=10"));
//!     Ok(())
//! }
//! ```

mod canonical;
mod constants;

mod credential;
pub use credential::Credential;

mod endpoint;
pub use endpoint::Endpoint;

mod env;
pub use env::{Env, OsEnv, StaticEnv};

mod error;
pub use error::{Error, ErrorKind, Result};

pub mod hash;

mod provide_credential;
pub use provide_credential::{EnvCredentialProvider, ProvideCredential, StaticCredentialProvider};

mod request;
pub use request::{RequestToSign, SignedRequestData};

mod retry;
mod sign;

mod sign_request;
pub use sign_request::{Builder, RequestSigner};

pub mod time;

mod utils;
