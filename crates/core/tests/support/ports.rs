//! In-memory port mocks

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use umsync_core::{AccessTokenProvider, ActionCommandTransport};
use umsync_domain::{
    AccessToken, ActionCommandIssue, ActionCommandResponse, Batch, RequestContext,
    Result as DomainResult, SyncError,
};

/// Token provider that counts acquisitions and can be told to fail.
#[derive(Default)]
pub struct MockTokenProvider {
    calls: AtomicUsize,
    fail: bool,
}

impl MockTokenProvider {
    pub fn failing() -> Self {
        Self { calls: AtomicUsize::new(0), fail: true }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AccessTokenProvider for MockTokenProvider {
    async fn acquire_token(&self) -> DomainResult<AccessToken> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SyncError::Auth("IMS returned 401".to_string()));
        }
        Ok(AccessToken::bearer("test-token"))
    }
}

/// Transport that records every batch and replays scripted results.
///
/// Once the script is exhausted every batch completes fully.
#[derive(Default, Clone)]
pub struct RecordingTransport {
    script: Arc<Mutex<VecDeque<DomainResult<ActionCommandResponse>>>>,
    sent: Arc<Mutex<Vec<Batch>>>,
    tokens: Arc<Mutex<Vec<String>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result for the next unscripted batch.
    pub fn then(self, result: DomainResult<ActionCommandResponse>) -> Self {
        self.script.lock().unwrap().push_back(result);
        self
    }

    pub fn sent(&self) -> Vec<Batch> {
        self.sent.lock().unwrap().clone()
    }

    pub fn tokens(&self) -> Vec<String> {
        self.tokens.lock().unwrap().clone()
    }
}

#[async_trait]
impl ActionCommandTransport for RecordingTransport {
    async fn send(&self, batch: &Batch, token: &AccessToken) -> DomainResult<ActionCommandResponse> {
        self.sent.lock().unwrap().push(batch.clone());
        self.tokens.lock().unwrap().push(token.value.clone());

        let request = RequestContext::post("https://umapi.test/v2/usermanagement/action/org", batch.to_payload());
        match self.script.lock().unwrap().pop_front() {
            Some(result) => result.map(|response| response.with_request(request)),
            None => Ok(ActionCommandResponse {
                completed: i64::try_from(batch.len()).unwrap(),
                ..Default::default()
            }
            .with_request(request)),
        }
    }
}

/// Response reporting one failed command.
pub fn failed_response(message: &str, user: &str) -> ActionCommandResponse {
    ActionCommandResponse {
        completed: 9,
        not_completed: 1,
        errors: vec![ActionCommandIssue {
            request_id: Some("action_1".to_string()),
            index: 3,
            step: 0,
            message: message.to_string(),
            user: Some(user.to_string()),
        }],
        ..Default::default()
    }
}
