//! UMAPI action endpoint transport

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use tracing::{debug, instrument};
use umsync_core::ActionCommandTransport;
use umsync_domain::constants::{API_KEY_HEADER, TEST_ONLY_QUERY};
use umsync_domain::{
    AccessToken, ActionCommandResponse, Batch, RequestContext, Result, SyncError, UmapiConfig,
};
use url::Url;

use crate::errors::InfraError;
use crate::http::HttpClient;

/// Sends command batches to `POST {base}{organization}`.
pub struct UmapiClient {
    http: HttpClient,
    action_url: Url,
    api_key: String,
}

impl UmapiClient {
    /// # Errors
    /// Returns `SyncError::Config` if base URL and organization id do not
    /// form a valid URL.
    pub fn new(http: HttpClient, config: &UmapiConfig) -> Result<Self> {
        Ok(Self { http, action_url: action_url(config)?, api_key: config.client_id.clone() })
    }

    pub fn action_url(&self) -> &Url {
        &self.action_url
    }
}

fn action_url(config: &UmapiConfig) -> Result<Url> {
    let base = config.umapi_base_url.as_str();
    let separator = if base.ends_with('/') { "" } else { "/" };
    let mut raw = format!("{base}{separator}{}", config.organization_id);
    if config.test_only {
        raw.push('?');
        raw.push_str(TEST_ONLY_QUERY);
    }
    Url::parse(&raw).map_err(|err| InfraError::from(err).into())
}

#[async_trait]
impl ActionCommandTransport for UmapiClient {
    #[instrument(skip_all, fields(commands = batch.len()))]
    async fn send(&self, batch: &Batch, token: &AccessToken) -> Result<ActionCommandResponse> {
        let payload = batch.to_payload();
        let context = RequestContext::post(self.action_url.as_str(), payload.clone());

        let request = self
            .http
            .request(Method::POST, self.action_url.clone())
            .header(AUTHORIZATION, token.authorization())
            .header(API_KEY_HEADER, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .body(payload);
        let response = self.http.send(request).await?;

        let status = response.status();
        let body = response.text().await.map_err(|err| SyncError::from(InfraError::from(err)))?;
        debug!(status = status.as_u16(), bytes = body.len(), "UMAPI response received");

        if status.as_u16() >= 300 {
            return Err(SyncError::Transport {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
                body,
                request: context,
            });
        }
        if body.trim().is_empty() {
            return Err(SyncError::Protocol(format!(
                "No response body from UMAPI for request {context}"
            )));
        }

        let decoded = ActionCommandResponse::from_json(&body).map_err(|err| {
            SyncError::Protocol(format!("Malformed UMAPI response ({err}) for request {context}"))
        })?;
        Ok(decoded.with_request(context))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use umsync_common::testing::RecordingSleeper;
    use umsync_common::RateLimitRetryPolicy;
    use umsync_domain::ActionCommand;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    const ORG: &str = "12345@AdobeOrg";

    fn config(server: &MockServer) -> UmapiConfig {
        let mut config = UmapiConfig::new(ORG, "api-key-1", "secret");
        config.umapi_base_url = format!("{}/v2/usermanagement/action/", server.uri());
        config
    }

    fn client(config: &UmapiConfig, sleeper: &RecordingSleeper) -> UmapiClient {
        let http = HttpClient::builder()
            .retry_policy(
                RateLimitRetryPolicy::new(3, Duration::from_secs(5), 1.5)
                    .with_max_jitter(Duration::ZERO),
            )
            .sleeper(Arc::new(sleeper.clone()))
            .build()
            .expect("http client");
        UmapiClient::new(http, config).expect("umapi client")
    }

    fn batch() -> Batch {
        Batch::new(vec![ActionCommand::new("authors")])
    }

    #[test]
    fn action_url_appends_organization_and_test_flag() {
        let mut config = UmapiConfig::new(ORG, "id", "secret");
        assert_eq!(
            action_url(&config).unwrap().as_str(),
            "https://usermanagement.adobe.io/v2/usermanagement/action/12345@AdobeOrg"
        );

        config.umapi_base_url = "https://umapi.test/action".to_string();
        config.test_only = true;
        assert_eq!(
            action_url(&config).unwrap().as_str(),
            "https://umapi.test/action/12345@AdobeOrg?testOnly=true"
        );
    }

    #[test]
    fn invalid_base_url_is_a_config_error() {
        let mut config = UmapiConfig::new(ORG, "id", "secret");
        config.umapi_base_url = "not a url".to_string();

        assert_eq!(action_url(&config).unwrap_err().kind(), "config");
    }

    #[tokio::test]
    async fn sends_batch_with_auth_headers() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/v2/usermanagement/action/{ORG}")))
            .and(header("authorization", "Bearer tok"))
            .and(header("x-api-key", "api-key-1"))
            .and(header("content-type", "application/json"))
            .and(body_json(serde_json::json!([{ "usergroup": "authors", "do": [] }])))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"completed":1,"notCompleted":0,"completedInTestMode":0}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;

        let response = client(&config(&server), &RecordingSleeper::new())
            .send(&batch(), &AccessToken::bearer("tok"))
            .await
            .unwrap();

        assert_eq!(response.completed, 1);
        let request = response.request.expect("request context");
        assert!(request.url.ends_with(ORG));
        let payload: serde_json::Value =
            serde_json::from_str(request.payload.as_deref().unwrap()).unwrap();
        assert_eq!(payload, serde_json::json!([{ "usergroup": "authors", "do": [] }]));
    }

    #[tokio::test]
    async fn test_only_mode_sets_query_flag() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(query_param("testOnly", "true"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                r#"{"completed":0,"notCompleted":0,"completedInTestMode":1}"#,
            ))
            .expect(1)
            .mount(&server)
            .await;
        let mut config = config(&server);
        config.test_only = true;

        let response = client(&config, &RecordingSleeper::new())
            .send(&batch(), &AccessToken::bearer("tok"))
            .await
            .unwrap();

        assert_eq!(response.completed_in_test_mode, 1);
    }

    #[tokio::test]
    async fn error_status_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(400).set_body_string("bad request body"))
            .mount(&server)
            .await;

        let err = client(&config(&server), &RecordingSleeper::new())
            .send(&batch(), &AccessToken::bearer("tok"))
            .await
            .unwrap_err();

        match err {
            SyncError::Transport { status, reason, body, request } => {
                assert_eq!(status, 400);
                assert_eq!(reason, "Bad Request");
                assert_eq!(body, "bad request body");
                assert_eq!(request.method, "POST");
            }
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn redirect_is_a_transport_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/v2/usermanagement/action/{ORG}")))
            .respond_with(ResponseTemplate::new(302).insert_header("Location", "/elsewhere"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(path("/elsewhere"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"completed":1}"#))
            .expect(0)
            .mount(&server)
            .await;

        let err = client(&config(&server), &RecordingSleeper::new())
            .send(&batch(), &AccessToken::bearer("tok"))
            .await
            .unwrap_err();

        assert!(
            matches!(err, SyncError::Transport { status: 302, .. }),
            "expected transport error, got {err:?}"
        );
        server.verify().await;
    }

    #[tokio::test]
    async fn exhausted_rate_limit_surfaces_429() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "1"))
            .expect(4)
            .mount(&server)
            .await;
        let sleeper = RecordingSleeper::new();

        let err = client(&config(&server), &sleeper)
            .send(&batch(), &AccessToken::bearer("tok"))
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(429));
        assert_eq!(sleeper.count(), 3);
    }

    #[tokio::test]
    async fn empty_body_is_a_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).mount(&server).await;

        let err = client(&config(&server), &RecordingSleeper::new())
            .send(&batch(), &AccessToken::bearer("tok"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "protocol");
    }

    #[tokio::test]
    async fn malformed_body_is_a_protocol_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
            .mount(&server)
            .await;

        let err = client(&config(&server), &RecordingSleeper::new())
            .send(&batch(), &AccessToken::bearer("tok"))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "protocol");
        assert!(err.to_string().contains("POST "));
    }
}
