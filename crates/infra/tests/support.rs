//! Shared wiremock fixtures for infra integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use umsync_common::testing::RecordingSleeper;
use umsync_common::RateLimitRetryPolicy;
use umsync_domain::{GroupDefinition, UmapiConfig};
use umsync_infra::{HttpClient, ImsUserManagement};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

pub const ORG: &str = "A495E53@AdobeOrg";
pub const TOKEN_PATH: &str = "/ims/token/v3";
pub const ACTION_PATH: &str = "/v2/usermanagement/action/A495E53@AdobeOrg";

/// Configuration pointing both endpoints at `server`.
pub fn config(server: &MockServer) -> UmapiConfig {
    let mut config = UmapiConfig::new(ORG, "client-id", "client-secret");
    config.umapi_base_url = format!("{}/v2/usermanagement/action/", server.uri());
    config.ims_token_endpoint_url = format!("{}{TOKEN_PATH}", server.uri());
    config.product_profiles = vec!["AEM Users".to_string()];
    config
}

/// Facade whose retries record their delays instead of sleeping.
pub fn manager(config: &UmapiConfig, sleeper: &RecordingSleeper) -> ImsUserManagement {
    let http = HttpClient::builder()
        .retry_policy(
            RateLimitRetryPolicy::new(3, Duration::from_secs(5), 1.5)
                .with_max_jitter(Duration::ZERO),
        )
        .sleeper(Arc::new(sleeper.clone()))
        .build()
        .expect("http client");
    ImsUserManagement::with_http_client(config, http).expect("ims user management")
}

pub fn groups(count: usize) -> Vec<GroupDefinition> {
    (0..count).map(|i| GroupDefinition::new(format!("group-{i:02}"))).collect()
}

pub async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "abc",
            "token_type": "bearer",
            "expires_in": 86_400
        })))
        .mount(server)
        .await;
}

/// Number of commands in a recorded action request.
pub fn command_count(request: &Request) -> usize {
    serde_json::from_slice::<Value>(&request.body)
        .ok()
        .and_then(|body| body.as_array().map(Vec::len))
        .unwrap_or_default()
}

/// Success body acknowledging every command of `request`.
pub fn completed(request: &Request) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "completed": command_count(request),
        "notCompleted": 0,
        "completedInTestMode": 0
    }))
}

/// Mount an action endpoint answering call `n` with `respond(n, request)`.
pub async fn mount_action<F>(server: &MockServer, respond: F)
where
    F: Fn(usize, &Request) -> ResponseTemplate + Send + Sync + 'static,
{
    let calls = Arc::new(AtomicUsize::new(0));
    Mock::given(method("POST"))
        .and(path(ACTION_PATH))
        .respond_with(move |req: &Request| -> ResponseTemplate {
            let current = calls.fetch_add(1, Ordering::SeqCst);
            respond(current, req)
        })
        .mount(server)
        .await;
}

pub async fn requests_to(server: &MockServer, target: &str) -> Vec<Request> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .into_iter()
        .filter(|request| request.url.path() == target)
        .collect()
}
