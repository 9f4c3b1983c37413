use crate::constants::{AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY, AWS_SESSION_TOKEN};
use crate::env::Env;
use crate::provide_credential::ProvideCredential;
use crate::{Credential, Result};
use log::debug;

/// EnvCredentialProvider loads credentials from environment variables.
///
/// This provider looks for the following environment variables:
/// - `AWS_ACCESS_KEY_ID`: The access key ID
/// - `AWS_SECRET_ACCESS_KEY`: The secret access key
/// - `AWS_SESSION_TOKEN`: The session token (optional)
#[derive(Debug, Default, Clone)]
pub struct EnvCredentialProvider;

impl EnvCredentialProvider {
    /// Create a new EnvCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

impl ProvideCredential for EnvCredentialProvider {
    fn provide_credential(&self, env: &dyn Env) -> Result<Option<Credential>> {
        let access_key_id = env.var(AWS_ACCESS_KEY_ID);
        let secret_access_key = env.var(AWS_SECRET_ACCESS_KEY);

        match (access_key_id, secret_access_key) {
            (Some(ak), Some(sk)) => Ok(Some(Credential {
                access_key_id: ak,
                secret_access_key: sk,
                session_token: env.var(AWS_SESSION_TOKEN).filter(|v| !v.is_empty()),
            })),
            _ => {
                debug!("no credential found in process environment");
                Ok(None)
            }
        }
    }
}
