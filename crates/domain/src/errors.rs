//! Error types used throughout the synchronization engine

use thiserror::Error;

use crate::types::{ActionCommandIssue, RequestContext};

/// Main error type for group synchronization
///
/// Every variant is fatal for the `update_groups` call that produced it.
/// Rate-limit retries are absorbed inside the HTTP client and only surface
/// as [`SyncError::Transport`] once the retries are exhausted.
#[derive(Error, Debug)]
pub enum SyncError {
    /// The access token could not be acquired.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// The action endpoint answered with a status >= 300.
    #[error("HTTP {status} {reason}, body: {body}, for request {request}")]
    Transport {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase.
        reason: String,
        /// Response body as text.
        body: String,
        /// The request that was answered.
        request: RequestContext,
    },

    /// The response could not be understood (no body, malformed JSON).
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// The response was understood and reports failed commands.
    #[error(
        "Errors updating groups: [{}] for request {}",
        render_issues(.errors),
        render_request(.request.as_ref())
    )]
    Domain {
        /// Every error the remote reported.
        errors: Vec<ActionCommandIssue>,
        /// The request that was answered, when known.
        request: Option<RequestContext>,
    },

    /// The exchange failed before any HTTP status was received.
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid or missing configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A bug or an unexpected local failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SyncError {
    /// Stable label for log fields and metrics.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Auth(_) => "auth",
            Self::Transport { .. } => "transport",
            Self::Protocol(_) => "protocol",
            Self::Domain { .. } => "domain",
            Self::Network(_) => "network",
            Self::Config(_) => "config",
            Self::Internal(_) => "internal",
        }
    }

    /// HTTP status carried by a transport failure.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            _ => None,
        }
    }
}

fn render_issues(issues: &[ActionCommandIssue]) -> String {
    issues.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ")
}

fn render_request(request: Option<&RequestContext>) -> String {
    request.map_or_else(|| "Unknown".to_string(), ToString::to_string)
}

/// Result type alias for synchronization operations
pub type Result<T> = std::result::Result<T, SyncError>;
