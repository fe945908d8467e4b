//! UMAPI action response and its decoding
//!
//! The remote reports per-command outcomes as counters plus two issue lists.
//! Errors make the request a failure; warnings are informational only.

use std::fmt;

use serde::Deserialize;

use super::request::RequestContext;

/// A failed command or step reported by the remote.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionCommandIssue {
    /// Caller-supplied request id echoed back (`requestID`).
    pub request_id: Option<String>,
    /// Index of the command within the batch.
    pub index: i64,
    /// Index of the step within the command.
    pub step: i64,
    /// Human-readable reason.
    pub message: String,
    /// User the issue concerns, if any.
    pub user: Option<String>,
}

impl fmt::Display for ActionCommandIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ActionCommandIssue [requestID={}, index={}, step={}, message={}, user={}]",
            self.request_id.as_deref().unwrap_or("null"),
            self.index,
            self.step,
            self.message,
            self.user.as_deref().unwrap_or("null"),
        )
    }
}

/// A non-fatal remark on a command.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionCommandWarning {
    /// Location and message of the warning.
    pub issue: ActionCommandIssue,
    /// Machine-readable code (`warningCode`).
    pub warning_code: String,
}

impl fmt::Display for ActionCommandWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ActionCommandWarning [warningCode={}, requestID={}, index={}, step={}, message={}, user={}]",
            self.warning_code,
            self.issue.request_id.as_deref().unwrap_or("null"),
            self.issue.index,
            self.issue.step,
            self.issue.message,
            self.issue.user.as_deref().unwrap_or("null"),
        )
    }
}

/// Decoded response of one batch request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActionCommandResponse {
    /// Commands fully applied.
    pub completed: i64,
    /// Commands that failed.
    pub not_completed: i64,
    /// Commands validated without being applied (`testOnly`).
    pub completed_in_test_mode: i64,
    /// Fatal issues; any entry fails the batch.
    pub errors: Vec<ActionCommandIssue>,
    /// Informational issues.
    pub warnings: Vec<ActionCommandWarning>,
    /// The request this response answers; set by the transport.
    pub request: Option<RequestContext>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    #[serde(default)]
    completed: i64,
    #[serde(default)]
    not_completed: i64,
    #[serde(default)]
    completed_in_test_mode: i64,
    #[serde(default)]
    errors: Vec<WireIssue>,
    #[serde(default)]
    warnings: Vec<WireIssue>,
}

#[derive(Deserialize)]
struct WireIssue {
    #[serde(default, rename = "requestID")]
    request_id: Option<String>,
    #[serde(default)]
    index: i64,
    #[serde(default)]
    step: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    user: Option<String>,
    #[serde(default, rename = "warningCode")]
    warning_code: Option<String>,
}

impl From<WireIssue> for ActionCommandIssue {
    fn from(wire: WireIssue) -> Self {
        Self {
            request_id: wire.request_id,
            index: wire.index,
            step: wire.step,
            message: wire.message.unwrap_or_default(),
            user: wire.user,
        }
    }
}

impl ActionCommandResponse {
    /// Decode a response body. Unknown fields are ignored; absent counters
    /// default to zero and absent issue lists to empty.
    ///
    /// # Errors
    /// Returns the decoder error for a body that is not a JSON object of
    /// the expected shape.
    pub fn from_json(body: &str) -> Result<Self, serde_json::Error> {
        let wire: WireResponse = serde_json::from_str(body)?;

        let warnings = wire
            .warnings
            .into_iter()
            .map(|mut issue| {
                let warning_code = issue.warning_code.take().unwrap_or_default();
                ActionCommandWarning { issue: issue.into(), warning_code }
            })
            .collect();

        Ok(Self {
            completed: wire.completed,
            not_completed: wire.not_completed,
            completed_in_test_mode: wire.completed_in_test_mode,
            errors: wire.errors.into_iter().map(Into::into).collect(),
            warnings,
            request: None,
        })
    }

    /// Attach the request this response answers.
    #[must_use]
    pub fn with_request(mut self, request: RequestContext) -> Self {
        self.request = Some(request);
        self
    }
}
