use std::sync::Arc;
use std::time::Duration;

use reqwest::header::RETRY_AFTER;
use reqwest::redirect::Policy;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Response};
use tracing::{debug, info, warn};
use umsync_common::{parse_retry_after, RateLimitRetryPolicy, RetryDecision, Sleeper, TokioSleeper};
use umsync_domain::constants::{DEFAULT_RETRY_DELAY_SECS, MAX_RETRIES, RETRY_DELAY_MULTIPLIER};
use umsync_domain::SyncError;

use crate::errors::InfraError;

/// HTTP client that retries rate-limited requests.
///
/// Cloning is cheap and shares the connection pool. Only `429` responses are
/// retried; every other response, success or not, is returned to the caller
/// as is. Retry counters live on the stack of each [`HttpClient::send`] call.
#[derive(Clone)]
pub struct HttpClient {
    client: ReqwestClient,
    retry_policy: RateLimitRetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl HttpClient {
    /// Start building a new HTTP client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::default()
    }

    /// Convenience constructor with default configuration.
    pub fn new() -> Result<Self, SyncError> {
        Self::builder().build()
    }

    pub fn retry_policy(&self) -> &RateLimitRetryPolicy {
        &self.retry_policy
    }

    /// Create a request builder using the underlying reqwest client.
    pub fn request<U>(&self, method: Method, url: U) -> RequestBuilder
    where
        U: reqwest::IntoUrl,
    {
        self.client.request(method, url)
    }

    /// Execute the request, retrying `429 Too Many Requests`.
    ///
    /// Returns the first non-429 response, or the last 429 once the retries
    /// are exhausted. Failures without an HTTP status are not retried.
    pub async fn send(&self, builder: RequestBuilder) -> Result<Response, SyncError> {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;
            let cloned_builder = builder.try_clone().ok_or_else(|| {
                SyncError::Internal(
                    "request body cannot be cloned; buffer the body to enable retries".into(),
                )
            })?;

            let response = self.execute(cloned_builder, attempt).await?;
            let status = response.status().as_u16();
            if status != RateLimitRetryPolicy::RETRYABLE_STATUS {
                return Ok(response);
            }

            let retry_after = retry_after_hint(&response);
            if let Some(hint) = retry_after.filter(|hint| *hint > self.retry_policy.max_retry_after()) {
                warn!(
                    retry_after_secs = hint.as_secs(),
                    ceiling_secs = self.retry_policy.max_retry_after().as_secs(),
                    "Retry-After exceeds ceiling, clamping"
                );
            }
            let jitter = self.retry_policy.sample_jitter(&mut rand::thread_rng());

            match self.retry_policy.decide(status, attempt, retry_after, jitter) {
                RetryDecision::RetryAfter { delay, jitter } => {
                    info!(
                        retry = attempt,
                        max_retries = self.retry_policy.max_retries(),
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        jitter_ms = u64::try_from(jitter.as_millis()).unwrap_or(u64::MAX),
                        url = %response.url(),
                        "Rate limited, retrying"
                    );
                    self.sleeper.sleep(delay).await;
                }
                RetryDecision::Stop => {
                    warn!(attempts = attempt, url = %response.url(), "Rate limited, retries exhausted");
                    return Ok(response);
                }
            }
        }
    }

    /// Execute the request exactly once.
    pub async fn send_once(&self, builder: RequestBuilder) -> Result<Response, SyncError> {
        self.execute(builder, 1).await
    }

    async fn execute(&self, builder: RequestBuilder, attempt: u32) -> Result<Response, SyncError> {
        let request = builder.build().map_err(|err| SyncError::from(InfraError::from(err)))?;

        let method = request.method().clone();
        let url = request.url().clone();
        debug!(attempt, %method, %url, "sending HTTP request");

        match self.client.execute(request).await {
            Ok(response) => {
                debug!(attempt, %method, %url, status = %response.status(), "received HTTP response");
                Ok(response)
            }
            Err(err) => {
                debug!(attempt, %method, %url, error = %err, "HTTP request failed");
                Err(InfraError::from(err).into())
            }
        }
    }
}

/// Server-advised delay. A header that is not delta-seconds is ignored.
fn retry_after_hint(response: &Response) -> Option<Duration> {
    let value = response.headers().get(RETRY_AFTER)?;
    let parsed = value.to_str().ok().and_then(parse_retry_after);
    if parsed.is_none() {
        warn!(value = ?value, "Ignoring unparsable Retry-After header");
    }
    parsed
}

/// Builder for [`HttpClient`].
pub struct HttpClientBuilder {
    connect_timeout: Duration,
    read_timeout: Duration,
    pool_max_idle_per_host: usize,
    user_agent: Option<String>,
    retry_policy: RateLimitRetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(2),
            read_timeout: Duration::from_secs(10),
            pool_max_idle_per_host: 20,
            user_agent: Some(concat!("umsync/", env!("CARGO_PKG_VERSION")).to_string()),
            retry_policy: RateLimitRetryPolicy::new(
                MAX_RETRIES,
                Duration::from_secs(DEFAULT_RETRY_DELAY_SECS),
                RETRY_DELAY_MULTIPLIER,
            ),
            sleeper: Arc::new(TokioSleeper),
        }
    }
}

impl HttpClientBuilder {
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Maximum inactivity between two reads of the response.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn pool_max_idle_per_host(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = Some(agent.into());
        self
    }

    pub fn retry_policy(mut self, policy: RateLimitRetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    /// Replace the sleeper used between retries (tests record instead of waiting).
    pub fn sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Build the client. Redirects are never followed, so a 3xx reaches the caller.
    pub fn build(self) -> Result<HttpClient, SyncError> {
        let mut builder = ReqwestClient::builder()
            .connect_timeout(self.connect_timeout)
            .read_timeout(self.read_timeout)
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .redirect(Policy::none());

        if let Some(agent) = self.user_agent {
            builder = builder.user_agent(agent);
        }

        let client = builder.build().map_err(|err| SyncError::from(InfraError::from(err)))?;

        Ok(HttpClient { client, retry_policy: self.retry_policy, sleeper: self.sleeper })
    }
}
