use super::errors::{ProviderError, Result};

/// Connection settings shared by every provider client.
///
/// Read-only after construction.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    host: String,
    token: String,
}

impl ProviderConfig {
    /// Build a config, rejecting an empty token.
    ///
    /// Trailing slashes are stripped from `host`.
    pub fn new(host: &str, token: &str) -> Result<Self> {
        let token = token.trim();
        if token.is_empty() {
            return Err(ProviderError::MissingToken);
        }

        let host = host.trim().trim_end_matches('/');
        if host.is_empty() {
            return Err(ProviderError::Config("host must not be empty".to_string()));
        }

        Ok(Self {
            host: host.to_string(),
            token: token.to_string(),
        })
    }

    /// Host URL without a trailing slash.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn token(&self) -> &str {
        &self.token
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("host", &self.host)
            .field("token", &"***")
            .finish()
    }
}
