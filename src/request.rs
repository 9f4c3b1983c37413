use crate::Result;
use http::{HeaderMap, Method};
use serde::Serialize;

/// A request to sign.
///
/// Only describes the request; the signer copies out of it and never writes
/// back, so one value can be signed repeatedly (the retry path does exactly
/// that).
#[derive(Debug, Clone, Default)]
pub struct RequestToSign {
    /// HTTP method.
    pub method: Method,
    /// Path relative to the endpoint's base path, starting with `/`.
    pub path: String,
    /// Query parameters, kept in insertion order.
    pub query_params: Vec<(String, String)>,
    /// Headers to sign along with the generated ones.
    pub headers: HeaderMap,
    /// JSON body. GET requests are always signed over the empty payload.
    pub body: Option<serde_json::Value>,
}

impl RequestToSign {
    /// Create a request for `method` and `path`.
    pub fn new(method: Method, path: &str) -> Self {
        Self {
            method,
            path: path.to_string(),
            ..Default::default()
        }
    }

    /// Append a query parameter.
    pub fn with_query(mut self, key: &str, value: &str) -> Self {
        self.query_params.push((key.to_string(), value.to_string()));
        self
    }

    /// Attach a JSON body.
    pub fn with_json_body(mut self, body: &impl Serialize) -> Result<Self> {
        self.body = Some(serde_json::to_value(body)?);
        Ok(self)
    }
}

/// The signed header set and fully qualified URL for one request.
#[derive(Debug, Clone)]
pub struct SignedRequestData {
    /// Headers to transmit, `Authorization` and `x-amz-date` included. The
    /// `host` header is not among them; the HTTP layer sets its own.
    pub headers: HeaderMap,
    /// Fully qualified URL, query string included.
    pub url: String,
}
