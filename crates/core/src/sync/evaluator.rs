//! Classification of a decoded action response

use umsync_domain::{
    ActionCommandIssue, ActionCommandResponse, ActionCommandWarning, RequestContext, SyncError,
};

/// What a batch response means for the run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Every command completed; the remote left remarks.
    SuccessWithWarnings(Vec<ActionCommandWarning>),
    /// At least one command failed. Fatal for the run.
    Failure { errors: Vec<ActionCommandIssue>, request: Option<RequestContext> },
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure { .. })
    }

    /// Convert a failure into the error that aborts the run.
    pub fn into_result(self) -> Result<Vec<ActionCommandWarning>, SyncError> {
        match self {
            Self::Success => Ok(Vec::new()),
            Self::SuccessWithWarnings(warnings) => Ok(warnings),
            Self::Failure { errors, request } => Err(SyncError::Domain { errors, request }),
        }
    }
}

/// Stateless evaluator for [`ActionCommandResponse`].
pub struct ResponseEvaluator;

impl ResponseEvaluator {
    /// Errors win over warnings: a response carrying both is a failure.
    pub fn evaluate(response: &ActionCommandResponse) -> Outcome {
        if !response.errors.is_empty() {
            return Outcome::Failure {
                errors: response.errors.clone(),
                request: response.request.clone(),
            };
        }
        if !response.warnings.is_empty() {
            return Outcome::SuccessWithWarnings(response.warnings.clone());
        }
        Outcome::Success
    }
}
