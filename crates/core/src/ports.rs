//! Port interfaces for group synchronization

use async_trait::async_trait;
use umsync_domain::{AccessToken, ActionCommandResponse, Batch, GroupDefinition, Result};

use crate::sync::SyncSummary;

/// Source of bearer tokens for the action endpoint
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Acquire a token. Failures surface as `SyncError::Auth`.
    async fn acquire_token(&self) -> Result<AccessToken>;
}

/// One request/response exchange with the action endpoint
///
/// Implementations own rate-limit retries. A returned response has had its
/// body decoded and carries the request context it answers.
#[async_trait]
pub trait ActionCommandTransport: Send + Sync {
    /// Send one batch of commands under `token`.
    async fn send(&self, batch: &Batch, token: &AccessToken) -> Result<ActionCommandResponse>;
}

/// A group directory that local group definitions can be pushed into
#[async_trait]
pub trait ExternalGroupManagement: Send + Sync {
    /// Human-readable name of the directory, used in logs.
    fn label(&self) -> &str;

    /// Ensure every group exists remotely and holds the configured memberships.
    async fn update_groups(&self, groups: &[GroupDefinition]) -> Result<SyncSummary>;
}
