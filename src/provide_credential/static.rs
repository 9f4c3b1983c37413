use crate::env::Env;
use crate::provide_credential::ProvideCredential;
use crate::{Credential, Result};

/// StaticCredentialProvider provides credentials supplied up front.
///
/// This provider is used when the access key ID and secret access key are
/// already at hand and no dynamic loading should happen.
#[derive(Debug, Clone)]
pub struct StaticCredentialProvider {
    access_key_id: String,
    secret_access_key: String,
    session_token: Option<String>,
}

impl StaticCredentialProvider {
    /// Create a new StaticCredentialProvider with access key ID and secret access key.
    pub fn new(access_key_id: &str, secret_access_key: &str) -> Self {
        Self {
            access_key_id: access_key_id.to_string(),
            secret_access_key: secret_access_key.to_string(),
            session_token: None,
        }
    }

    /// Set the session token.
    pub fn with_session_token(mut self, token: &str) -> Self {
        self.session_token = Some(token.to_string());
        self
    }
}

impl ProvideCredential for StaticCredentialProvider {
    fn provide_credential(&self, _: &dyn Env) -> Result<Option<Credential>> {
        Ok(Some(Credential {
            access_key_id: self.access_key_id.clone(),
            secret_access_key: self.secret_access_key.clone(),
            session_token: self.session_token.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::StaticEnv;

    #[test]
    fn test_static_credential_provider() {
        let provider = StaticCredentialProvider::new("test_access_key", "test_secret_key");
        let cred = provider
            .provide_credential(&StaticEnv::default())
            .expect("must resolve")
            .expect("credential must be present");
        assert_eq!(cred.access_key_id, "test_access_key");
        assert_eq!(cred.secret_access_key, "test_secret_key");
        assert!(cred.session_token.is_none());

        let provider = StaticCredentialProvider::new("test_access_key", "test_secret_key")
            .with_session_token("test_session_token");
        let cred = provider
            .provide_credential(&StaticEnv::default())
            .expect("must resolve")
            .expect("credential must be present");
        assert_eq!(cred.session_token, Some("test_session_token".to_string()));
    }
}
