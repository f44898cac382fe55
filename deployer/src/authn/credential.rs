//! Bearer credentials

use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Username/password pair supplied for a run
pub struct Credentials {
    pub username: String,
    pub password: SecretString,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: SecretString::new(password.into().into_boxed_str()),
        }
    }

    /// Whether two credential sets would log in as the same principal
    pub fn same_as(&self, other: &Credentials) -> bool {
        self.username == other.username
            && self.password.expose_secret() == other.password.expose_secret()
    }
}

impl Clone for Credentials {
    fn clone(&self) -> Self {
        Self::new(self.username.clone(), self.password.expose_secret())
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// One authenticated session. Lives for the process only; never persisted.
pub struct Credential {
    token_type: String,
    access_token: SecretString,
}

impl Credential {
    pub fn new(token_type: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            token_type: token_type.into(),
            access_token: SecretString::new(access_token.into().into_boxed_str()),
        }
    }

    /// Value for the `Authorization` header: `"<token_type> <access_token>"`
    pub fn authorization(&self) -> String {
        format!("{} {}", self.token_type, self.access_token.expose_secret())
    }
}

impl Clone for Credential {
    fn clone(&self) -> Self {
        Self::new(self.token_type.clone(), self.access_token.expose_secret())
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("token_type", &self.token_type)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}
