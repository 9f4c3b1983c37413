use crate::canonical::{canonical_query_string, canonical_request, signed_header_names};
use crate::constants::{AWS_REGION, X_AMZ_DATE, X_AMZ_SECURITY_TOKEN};
use crate::endpoint::Endpoint;
use crate::env::{Env, OsEnv};
use crate::hash::hex_hmac_sha256;
use crate::provide_credential::{
    EnvCredentialProvider, ProvideCredential, StaticCredentialProvider,
};
use crate::request::{RequestToSign, SignedRequestData};
use crate::sign::{authorization_header, credential_scope, generate_signing_key, string_to_sign};
use crate::time::{self, format_iso8601, DateTime};
use crate::{Credential, Error, Result};
use http::{header, HeaderValue, Method};
use log::debug;

const DEFAULT_SERVICE: &str = "execute-api";
const DEFAULT_REGION: &str = "us-east-1";
const DEFAULT_MEDIA_TYPE: &str = "application/json";

/// Builder for `RequestSigner`.
#[derive(Debug)]
pub struct Builder {
    endpoint: String,

    access_key_id: Option<String>,
    secret_access_key: Option<String>,
    session_token: Option<String>,

    service: Option<String>,
    region: Option<String>,
    default_accept_type: Option<String>,
    default_content_type: Option<String>,

    credential_provider: Option<Box<dyn ProvideCredential>>,
    env: Box<dyn Env>,

    time: Option<DateTime>,
}

impl Builder {
    /// Specify the access key id directly.
    pub fn access_key_id(mut self, v: &str) -> Self {
        self.access_key_id = Some(v.to_string());
        self
    }

    /// Specify the secret access key directly.
    pub fn secret_access_key(mut self, v: &str) -> Self {
        self.secret_access_key = Some(v.to_string());
        self
    }

    /// Specify a session token for temporary credentials.
    pub fn session_token(mut self, v: &str) -> Self {
        self.session_token = Some(v.to_string());
        self
    }

    /// Specify the service the credential scope is bound to.
    pub fn service(mut self, v: &str) -> Self {
        self.service = Some(v.to_string());
        self
    }

    /// Specify the region the credential scope is bound to.
    pub fn region(mut self, v: &str) -> Self {
        self.region = Some(v.to_string());
        self
    }

    /// Specify the `Accept` value applied when a request carries none.
    pub fn default_accept_type(mut self, v: &str) -> Self {
        self.default_accept_type = Some(v.to_string());
        self
    }

    /// Specify the `Content-Type` value applied when a request carries none.
    pub fn default_content_type(mut self, v: &str) -> Self {
        self.default_content_type = Some(v.to_string());
        self
    }

    /// Specify the credential provider consulted when no key material is set
    /// directly. Defaults to `EnvCredentialProvider`.
    pub fn credential_provider(mut self, provider: impl ProvideCredential) -> Self {
        self.credential_provider = Some(Box::new(provider));
        self
    }

    /// Specify the environment used during resolution. Defaults to the
    /// process environment.
    pub fn env(mut self, env: impl Env) -> Self {
        self.env = Box::new(env);
        self
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub(crate) fn time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// Use the collected configuration to build a new signer.
    ///
    /// Fails when the endpoint does not parse or when no valid credential
    /// can be resolved; no partial signer is ever returned.
    pub fn build(self) -> Result<RequestSigner> {
        let endpoint = Endpoint::parse(&self.endpoint)?;

        // Key material set directly wins over any provider, and partial
        // material fails below instead of silently falling through.
        let has_static_material = self.access_key_id.is_some()
            || self.secret_access_key.is_some()
            || self.session_token.is_some();

        let credential = if has_static_material {
            let mut provider = StaticCredentialProvider::new(
                self.access_key_id.as_deref().unwrap_or_default(),
                self.secret_access_key.as_deref().unwrap_or_default(),
            );
            if let Some(token) = &self.session_token {
                provider = provider.with_session_token(token);
            }
            provider.provide_credential(self.env.as_ref())?
        } else {
            match &self.credential_provider {
                Some(provider) => provider.provide_credential(self.env.as_ref())?,
                None => EnvCredentialProvider::new().provide_credential(self.env.as_ref())?,
            }
        };

        let credential = credential.filter(Credential::is_valid).ok_or_else(|| {
            Error::credential_invalid("an access key and secret key must be provided")
        })?;

        let region = self
            .region
            .or_else(|| self.env.var(AWS_REGION).filter(|v| !v.is_empty()))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        debug!("signer region: {region}");

        Ok(RequestSigner {
            credential,
            service: self
                .service
                .unwrap_or_else(|| DEFAULT_SERVICE.to_string()),
            region,
            endpoint,
            default_accept_type: self
                .default_accept_type
                .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string()),
            default_content_type: self
                .default_content_type
                .unwrap_or_else(|| DEFAULT_MEDIA_TYPE.to_string()),
            time: self.time,
        })
    }
}

/// RequestSigner computes SigV4 authorization for requests to one endpoint.
///
/// - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)
///
/// Configuration resolves once at build time and is immutable afterwards.
/// `sign_request` reads only that configuration and its own locals, so one
/// signer can serve concurrent callers without locking.
#[derive(Debug)]
pub struct RequestSigner {
    credential: Credential,
    service: String,
    region: String,
    endpoint: Endpoint,
    default_accept_type: String,
    default_content_type: String,

    time: Option<DateTime>,
}

impl RequestSigner {
    /// Create a builder for the given endpoint.
    pub fn builder(endpoint: &str) -> Builder {
        Builder {
            endpoint: endpoint.to_string(),
            access_key_id: None,
            secret_access_key: None,
            session_token: None,
            service: None,
            region: None,
            default_accept_type: None,
            default_content_type: None,
            credential_provider: None,
            env: Box::new(OsEnv),
            time: None,
        }
    }

    /// Get the region of this signer.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Sign a request, producing the header set and fully qualified URL to
    /// transmit it with.
    ///
    /// A single timestamp is taken per call and drives the `x-amz-date`
    /// header, the credential scope, and the key derivation together; the
    /// caller's request is only read, never mutated.
    pub fn sign_request(&self, req: &RequestToSign) -> Result<SignedRequestData> {
        let now = self.time.unwrap_or_else(time::now);

        let method = req.method.as_str().to_uppercase();
        let path = format!("{}{}", self.endpoint.base_path(), req.path);

        let query = req.query_params.clone();
        let mut headers = req.headers.clone();

        if !headers.contains_key(header::CONTENT_TYPE) {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_str(&self.default_content_type)?,
            );
        }
        if !headers.contains_key(header::ACCEPT) {
            headers.insert(
                header::ACCEPT,
                HeaderValue::from_str(&self.default_accept_type)?,
            );
        }

        // GET requests are signed over the empty payload even when a body is
        // attached.
        let payload = if req.method == Method::GET {
            String::new()
        } else {
            match &req.body {
                Some(body) => serde_json::to_string(body)?,
                None => String::new(),
            }
        };

        // A bodyless request is signed without a content type.
        if payload.is_empty() {
            headers.remove(header::CONTENT_TYPE);
        }

        headers.insert(X_AMZ_DATE, HeaderValue::from_str(&format_iso8601(now))?);
        // The host header participates in signing only; it is removed again
        // before the set is returned.
        headers.insert(header::HOST, HeaderValue::from_str(self.endpoint.host())?);

        let creq = canonical_request(&method, &path, &query, &headers, &payload)?;
        debug!("calculated canonical request: {creq}");

        let scope = credential_scope(now, &self.region, &self.service);
        debug!("calculated scope: {scope}");

        let sts = string_to_sign(now, &scope, &creq);
        debug!("calculated string to sign: {sts}");

        let signing_key = generate_signing_key(
            &self.credential.secret_access_key,
            now,
            &self.region,
            &self.service,
        );
        let signature = hex_hmac_sha256(&signing_key, sts.as_bytes());

        let mut authorization = HeaderValue::from_str(&authorization_header(
            &self.credential.access_key_id,
            &scope,
            &signed_header_names(&headers).join(";"),
            &signature,
        ))?;
        authorization.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, authorization);

        if let Some(token) = self
            .credential
            .session_token
            .as_deref()
            .filter(|t| !t.is_empty())
        {
            let mut value = HeaderValue::from_str(token)?;
            // Keep the token out of logs.
            value.set_sensitive(true);
            headers.insert(X_AMZ_SECURITY_TOKEN, value);
        }

        headers.remove(header::HOST);

        // Transport still wants a content type even when it was excluded
        // from signing.
        if !headers.contains_key(header::CONTENT_TYPE) {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_str(&self.default_content_type)?,
            );
        }

        let mut url = format!("{}{}", self.endpoint.origin(), path);
        let query_string = canonical_query_string(&query);
        if !query_string.is_empty() {
            url.push('?');
            url.push_str(&query_string);
        }

        Ok(SignedRequestData { headers, url })
    }
}
