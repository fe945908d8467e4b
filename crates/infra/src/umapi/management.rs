//! Adobe IMS external group management facade

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;
use umsync_core::{CommandBuilder, ExternalGroupManagement, GroupSynchronizer, SyncSummary};
use umsync_domain::constants::IMS_LABEL;
use umsync_domain::{GroupDefinition, Result, UmapiConfig};

use super::auth::ClientCredentialsTokenProvider;
use super::client::UmapiClient;
use crate::http::HttpClient;

/// Synchronizes groups into Adobe IMS through UMAPI.
///
/// Owns one pooled HTTP client shared by token acquisition and the action
/// transport. The pool is released by [`ImsUserManagement::shutdown`] or on
/// drop.
pub struct ImsUserManagement {
    synchronizer: GroupSynchronizer,
    organization_id: String,
    test_only: bool,
}

impl ImsUserManagement {
    /// Validate `config` and build the HTTP client from its timeouts.
    ///
    /// # Errors
    /// Returns `SyncError::Config` for an invalid configuration.
    pub fn new(config: UmapiConfig) -> Result<Self> {
        config.validate()?;
        let http = HttpClient::builder()
            .connect_timeout(config.connect_timeout())
            .read_timeout(config.socket_timeout())
            .build()?;
        Self::with_http_client(&config, http)
    }

    /// Build on an existing HTTP client.
    pub fn with_http_client(config: &UmapiConfig, http: HttpClient) -> Result<Self> {
        let transport = UmapiClient::new(http.clone(), config)?;
        let tokens = ClientCredentialsTokenProvider::new(http, config);
        let synchronizer = GroupSynchronizer::new(
            Arc::new(tokens),
            Arc::new(transport),
            CommandBuilder::new(config.product_profiles.iter().cloned()),
        );

        info!(
            organization_id = %config.organization_id,
            test_only = config.test_only,
            product_profiles = config.product_profiles.len(),
            "{IMS_LABEL} group management ready"
        );
        Ok(Self {
            synchronizer,
            organization_id: config.organization_id.clone(),
            test_only: config.test_only,
        })
    }

    /// Release the connection pool.
    pub fn shutdown(self) {
        info!(organization_id = %self.organization_id, "{IMS_LABEL} group management shut down");
    }
}

#[async_trait]
impl ExternalGroupManagement for ImsUserManagement {
    fn label(&self) -> &str {
        IMS_LABEL
    }

    async fn update_groups(&self, groups: &[GroupDefinition]) -> Result<SyncSummary> {
        info!(
            label = IMS_LABEL,
            organization_id = %self.organization_id,
            test_only = self.test_only,
            groups = groups.len(),
            "Updating groups"
        );
        self.synchronizer.update_groups(groups).await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[test]
    fn rejects_invalid_configuration() {
        let config = UmapiConfig::new("", "client", "secret");
        assert_eq!(ImsUserManagement::new(config).err().map(|e| e.kind()), Some("config"));
    }

    #[tokio::test]
    async fn empty_input_fetches_token_but_sends_no_batch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ims/token/v3"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"access_token":"abc","token_type":"bearer","expires_in":86400}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/v2/usermanagement/action/ORG@AdobeOrg"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"completed":0}"#))
            .expect(0)
            .mount(&server)
            .await;
        let mut config = UmapiConfig::new("ORG@AdobeOrg", "client", "secret");
        config.umapi_base_url = format!("{}/v2/usermanagement/action/", server.uri());
        config.ims_token_endpoint_url = format!("{}/ims/token/v3", server.uri());
        let manager = ImsUserManagement::new(config).unwrap();

        assert_eq!(manager.label(), "Adobe IMS");
        let summary = manager.update_groups(&[]).await.unwrap();
        assert_eq!(summary.batches_sent, 0);

        manager.shutdown();
        server.verify().await;
    }
}
