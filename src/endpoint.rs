use crate::{Error, Result};
use http::uri::{Authority, Scheme};
use http::Uri;

/// A parsed endpoint, split once at construction into the origin
/// (`scheme://host[:port]`) and the base path every request path is appended
/// to. The split never changes for the signer's lifetime.
#[derive(Debug, Clone)]
pub struct Endpoint {
    scheme: Scheme,
    authority: Authority,
    base_path: String,
}

impl Endpoint {
    /// Parse an endpoint like `https://abc123.execute-api.us-east-1.amazonaws.com/prod`.
    ///
    /// The scheme must be `http` or `https` and a host must be present.
    pub fn parse(endpoint: &str) -> Result<Self> {
        let uri: Uri = endpoint.parse().map_err(|e| {
            Error::config_invalid(format!("endpoint {endpoint} is not a valid uri")).with_source(e)
        })?;

        let scheme = uri.scheme().cloned().ok_or_else(|| {
            Error::config_invalid(format!(
                "endpoint {endpoint} has no scheme, expected http or https"
            ))
        })?;
        if scheme != Scheme::HTTP && scheme != Scheme::HTTPS {
            return Err(Error::config_invalid(format!(
                "endpoint scheme {scheme} is not supported, expected http or https"
            )));
        }

        let authority = uri
            .authority()
            .cloned()
            .ok_or_else(|| Error::config_invalid(format!("endpoint {endpoint} has no host")))?;

        // A bare origin parses with path "/", which is no base path at all.
        let base_path = match uri.path() {
            "/" => String::new(),
            p => p.trim_end_matches('/').to_string(),
        };

        Ok(Self {
            scheme,
            authority,
            base_path,
        })
    }

    /// Origin with the scheme and any explicit port kept, no trailing slash.
    pub fn origin(&self) -> String {
        format!("{}://{}", self.scheme, self.authority)
    }

    /// Hostname with the port stripped, as signed in the `host` header.
    pub fn host(&self) -> &str {
        self.authority.host()
    }

    /// Base path prefix, empty when the endpoint has none.
    pub fn base_path(&self) -> &str {
        &self.base_path
    }
}
