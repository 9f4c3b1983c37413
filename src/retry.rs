//! Retrying helper around a caller-supplied transport callback.

use crate::request::{RequestToSign, SignedRequestData};
use crate::sign_request::RequestSigner;
use crate::Result;
use log::warn;
use std::future::Future;
use std::time::Duration;

const RETRY_BACKOFF_BASE: Duration = Duration::from_millis(100);

impl RequestSigner {
    /// Drive `callback` with a freshly signed request, retrying failed
    /// attempts up to `retry_count` in total with exponential backoff in
    /// between.
    ///
    /// Signatures expire, so every attempt signs anew rather than reusing a
    /// stale timestamp. Callback failures are counted, not inspected; once
    /// the attempts are exhausted the last failure is swallowed and
    /// `Ok(None)` is returned. Signing failures are structural and surface
    /// as `Err` immediately.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use gatesign::{RequestSigner, RequestToSign};
    /// # #[tokio::main]
    /// # async fn main() -> gatesign::Result<()> {
    /// let signer = RequestSigner::builder("https://example.com")
    ///     .access_key_id("access_key")
    ///     .secret_access_key("secret_key")
    ///     .build()?;
    ///
    /// let request = RequestToSign::new(http::Method::GET, "/health");
    /// let response = signer
    ///     .make_request_with_retries(
    ///         &request,
    ///         |signed| async move {
    ///             // issue the request with any http client
    ///             Ok(signed.url)
    ///         },
    ///         3,
    ///     )
    ///     .await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn make_request_with_retries<F, Fut, T>(
        &self,
        request: &RequestToSign,
        callback: F,
        retry_count: usize,
    ) -> Result<Option<T>>
    where
        F: Fn(SignedRequestData) -> Fut,
        Fut: Future<Output = anyhow::Result<T>>,
    {
        for attempt in 0..retry_count {
            if attempt > 0 {
                // 100ms, 200ms, 400ms, ... capped so the shift stays sane
                // for absurd retry counts.
                let backoff = RETRY_BACKOFF_BASE * (1u32 << (attempt - 1).min(10));
                tokio::time::sleep(backoff).await;
            }

            let signed = self.sign_request(request)?;
            match callback(signed).await {
                Ok(value) => return Ok(Some(value)),
                Err(err) => warn!(
                    "request attempt {}/{retry_count} failed: {err:?}",
                    attempt + 1
                ),
            }
        }

        Ok(None)
    }
}
