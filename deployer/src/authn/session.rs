//! Run-scoped session cache

use tracing::{debug, info};

use crate::authn::credential::{Credential, Credentials};
use crate::errors::DeployError;
use crate::platform::PlatformApi;

/// Holds at most one credential for the run that owns it.
///
/// A second `acquire` with the same credentials returns the cached credential
/// without another login; different credentials replace the cache.
#[derive(Debug, Default)]
pub struct SessionManager {
    cached: Option<(Credentials, Credential)>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the session credential, logging in only if nothing is cached for `credentials`
    pub async fn acquire(
        &mut self,
        platform: &dyn PlatformApi,
        credentials: &Credentials,
    ) -> Result<Credential, DeployError> {
        if let Some((key, credential)) = &self.cached {
            if key.same_as(credentials) {
                debug!("Reusing session for {}", credentials.username);
                return Ok(credential.clone());
            }
        }

        info!("Logging in as {}", credentials.username);
        let credential = platform
            .login(&credentials.username, &credentials.password)
            .await
            .map_err(|e| match e {
                DeployError::AuthError(_) => e,
                other => DeployError::AuthError(other.to_string()),
            })?;

        self.cached = Some((credentials.clone(), credential.clone()));
        Ok(credential)
    }

    /// Cached credential, if a login has happened
    pub fn current(&self) -> Option<&Credential> {
        self.cached.as_ref().map(|(_, credential)| credential)
    }
}
