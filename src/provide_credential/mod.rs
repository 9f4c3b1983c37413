use crate::credential::Credential;
use crate::env::Env;
use crate::Result;
use std::fmt::Debug;

/// ProvideCredential is the capability used to resolve a credential while a
/// signer is being built.
///
/// Resolution happens once at construction time, so providers are plain
/// synchronous lookups. The environment is handed in rather than read
/// directly, keeping ambient process state out of the providers themselves.
pub trait ProvideCredential: Debug + Send + Sync + 'static {
    /// Resolve a credential, returning `None` when this source has nothing.
    fn provide_credential(&self, env: &dyn Env) -> Result<Option<Credential>>;
}

mod env;
pub use env::EnvCredentialProvider;

mod r#static;
pub use r#static::StaticCredentialProvider;
