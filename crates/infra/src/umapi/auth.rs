//! IMS token acquisition with the OAuth2 client-credentials grant

use async_trait::async_trait;
use reqwest::Method;
use tracing::{debug, instrument};
use umsync_core::AccessTokenProvider;
use umsync_domain::{AccessToken, Result, SyncError, UmapiConfig};

use crate::http::HttpClient;

/// Fetches a fresh access token on every call.
///
/// The request is sent once; any failure is a [`SyncError::Auth`].
pub struct ClientCredentialsTokenProvider {
    http: HttpClient,
    endpoint: String,
    client_id: String,
    client_secret: String,
    scope: String,
}

impl ClientCredentialsTokenProvider {
    pub fn new(http: HttpClient, config: &UmapiConfig) -> Self {
        Self {
            http,
            endpoint: config.ims_token_endpoint_url.clone(),
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            scope: config.scopes.join(","),
        }
    }

    fn form(&self) -> [(&'static str, &str); 4] {
        [
            ("client_id", self.client_id.as_str()),
            ("client_secret", self.client_secret.as_str()),
            ("grant_type", "client_credentials"),
            ("scope", self.scope.as_str()),
        ]
    }
}

#[async_trait]
impl AccessTokenProvider for ClientCredentialsTokenProvider {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn acquire_token(&self) -> Result<AccessToken> {
        let request = self.http.request(Method::POST, &self.endpoint).form(&self.form());
        let response = self
            .http
            .send_once(request)
            .await
            .map_err(|err| SyncError::Auth(format!("token request failed: {err}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|err| SyncError::Auth(format!("failed to read token response: {err}")))?;

        if !status.is_success() {
            return Err(SyncError::Auth(format!("IMS returned HTTP {status}, body: {body}")));
        }
        if body.trim().is_empty() {
            return Err(SyncError::Auth("IMS returned an empty token response".to_string()));
        }

        let token = AccessToken::from_json(&body)
            .map_err(|err| SyncError::Auth(format!("malformed token response: {err}")))?;
        debug!(token_type = %token.token_type, expires_in = token.lifetime_seconds, "Access token acquired");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    fn provider(server: &MockServer) -> ClientCredentialsTokenProvider {
        let mut config = UmapiConfig::new("ORG@AdobeOrg", "my-client", "s3cret");
        config.ims_token_endpoint_url = format!("{}/ims/token/v3", server.uri());
        ClientCredentialsTokenProvider::new(HttpClient::new().expect("http client"), &config)
    }

    #[tokio::test]
    async fn posts_client_credentials_form() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ims/token/v3"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("client_id=my-client"))
            .and(body_string_contains("client_secret=s3cret"))
            .and(body_string_contains("grant_type=client_credentials"))
            .and(body_string_contains("scope=openid%2CAdobeID%2Cuser_management_sdk"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"access_token":"abc","token_type":"bearer","expires_in":86400}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let token = provider(&server).acquire_token().await.unwrap();

        assert_eq!(token.value, "abc");
        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.lifetime_seconds, 86_400);
    }

    #[tokio::test]
    async fn ignores_unknown_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"access_token":"abc","token_type":"bearer","expires_in":86400,"scope":"x"}"#,
            ))
            .mount(&server)
            .await;

        assert_eq!(provider(&server).acquire_token().await.unwrap().value, "abc");
    }

    #[tokio::test]
    async fn rejected_credentials_are_auth_errors() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string(r#"{"error":"invalid_client"}"#))
            .mount(&server)
            .await;

        let err = provider(&server).acquire_token().await.unwrap_err();

        assert_eq!(err.kind(), "auth");
        assert!(err.to_string().contains("invalid_client"));
    }

    #[tokio::test]
    async fn redirected_token_request_is_an_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/ims/token/v3"))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", "/elsewhere"))
            .mount(&server)
            .await;
        Mock::given(path("/elsewhere"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"access_token":"abc","token_type":"bearer","expires_in":86400}"#,
            ))
            .expect(0)
            .mount(&server)
            .await;

        let err = provider(&server).acquire_token().await.unwrap_err();

        assert_eq!(err.kind(), "auth");
        server.verify().await;
    }

    #[tokio::test]
    async fn empty_body_is_an_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).mount(&server).await;

        let err = provider(&server).acquire_token().await.unwrap_err();

        assert_eq!(err.kind(), "auth");
    }

    #[tokio::test]
    async fn rate_limited_token_request_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .expect(1)
            .mount(&server)
            .await;

        let err = provider(&server).acquire_token().await.unwrap_err();

        assert_eq!(err.kind(), "auth");
    }
}
