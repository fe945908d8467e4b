//! Configuration management

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::constants::{
    DEFAULT_CONNECT_TIMEOUT_MS, DEFAULT_IMS_TOKEN_ENDPOINT_URL, DEFAULT_SCOPES,
    DEFAULT_SOCKET_TIMEOUT_MS, DEFAULT_UMAPI_BASE_URL,
};
use crate::errors::{Result, SyncError};

/// Settings of the Adobe IMS user management API (UMAPI)
#[derive(Clone, Serialize, Deserialize)]
pub struct UmapiConfig {
    /// Endpoint base URL, the part before the organization id.
    #[serde(default = "default_umapi_base_url")]
    pub umapi_base_url: String,
    /// Organization id of the form `A495E53@AdobeOrg`.
    pub organization_id: String,
    /// Validate requests remotely without applying them.
    #[serde(default)]
    pub test_only: bool,
    /// IMS endpoint of the client-credentials exchange.
    #[serde(default = "default_ims_token_endpoint_url")]
    pub ims_token_endpoint_url: String,
    /// OAuth client id, also sent as API key header.
    pub client_id: String,
    /// OAuth client secret; never serialized.
    #[serde(skip_serializing)]
    pub client_secret: String,
    /// Scopes requested with the token.
    #[serde(default = "default_scopes")]
    pub scopes: Vec<String>,
    /// Connection establishment timeout.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Maximum inactivity between two data packets.
    #[serde(default = "default_socket_timeout_ms")]
    pub socket_timeout_ms: u64,
    /// Product profiles added to every synchronized group.
    #[serde(default)]
    pub product_profiles: Vec<String>,
}

impl UmapiConfig {
    /// Configuration with defaults for everything but the credentials.
    #[must_use]
    pub fn new(
        organization_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            umapi_base_url: default_umapi_base_url(),
            organization_id: organization_id.into(),
            test_only: false,
            ims_token_endpoint_url: default_ims_token_endpoint_url(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scopes: default_scopes(),
            connect_timeout_ms: default_connect_timeout_ms(),
            socket_timeout_ms: default_socket_timeout_ms(),
            product_profiles: Vec::new(),
        }
    }

    /// Connect timeout as a `Duration`.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Read timeout as a `Duration`.
    #[must_use]
    pub fn socket_timeout(&self) -> Duration {
        Duration::from_millis(self.socket_timeout_ms)
    }

    /// Reject configurations that can never produce a successful sync.
    ///
    /// # Errors
    /// Returns `SyncError::Config` naming the first offending setting.
    pub fn validate(&self) -> Result<()> {
        require_non_empty("organization_id", &self.organization_id)?;
        require_non_empty("client_id", &self.client_id)?;
        require_non_empty("client_secret", &self.client_secret)?;

        if self.connect_timeout_ms == 0 || self.socket_timeout_ms == 0 {
            return Err(SyncError::Config("timeouts must be greater than zero".to_string()));
        }

        for (name, value) in [
            ("umapi_base_url", &self.umapi_base_url),
            ("ims_token_endpoint_url", &self.ims_token_endpoint_url),
        ] {
            Url::parse(value)
                .map_err(|e| SyncError::Config(format!("invalid {name} '{value}': {e}")))?;
        }

        Ok(())
    }
}

impl fmt::Debug for UmapiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UmapiConfig")
            .field("umapi_base_url", &self.umapi_base_url)
            .field("organization_id", &self.organization_id)
            .field("test_only", &self.test_only)
            .field("ims_token_endpoint_url", &self.ims_token_endpoint_url)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("scopes", &self.scopes)
            .field("connect_timeout_ms", &self.connect_timeout_ms)
            .field("socket_timeout_ms", &self.socket_timeout_ms)
            .field("product_profiles", &self.product_profiles)
            .finish()
    }
}

fn require_non_empty(name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(SyncError::Config(format!("{name} must not be empty")));
    }
    Ok(())
}

fn default_umapi_base_url() -> String {
    DEFAULT_UMAPI_BASE_URL.to_string()
}

fn default_ims_token_endpoint_url() -> String {
    DEFAULT_IMS_TOKEN_ENDPOINT_URL.to_string()
}

fn default_scopes() -> Vec<String> {
    DEFAULT_SCOPES.iter().map(|s| (*s).to_string()).collect()
}

const fn default_connect_timeout_ms() -> u64 {
    DEFAULT_CONNECT_TIMEOUT_MS
}

const fn default_socket_timeout_ms() -> u64 {
    DEFAULT_SOCKET_TIMEOUT_MS
}
