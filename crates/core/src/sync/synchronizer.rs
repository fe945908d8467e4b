//! The group synchronization use case

use std::sync::Arc;

use tracing::{debug, error, info, instrument, warn};
use umsync_domain::constants::MAX_COMMANDS_PER_REQUEST;
use umsync_domain::{ActionCommandResponse, ActionCommandWarning, GroupDefinition, Result};
use uuid::Uuid;

use super::batcher::partition;
use super::builder::CommandBuilder;
use super::evaluator::{Outcome, ResponseEvaluator};
use crate::ports::{AccessTokenProvider, ActionCommandTransport};

/// Totals over every batch of a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncSummary {
    pub batches_sent: usize,
    pub commands_sent: usize,
    pub completed: i64,
    pub not_completed: i64,
    pub completed_in_test_mode: i64,
    pub warnings: Vec<ActionCommandWarning>,
}

impl SyncSummary {
    fn record(&mut self, commands: usize, response: &ActionCommandResponse) {
        self.batches_sent += 1;
        self.commands_sent += commands;
        self.completed += response.completed;
        self.not_completed += response.not_completed;
        self.completed_in_test_mode += response.completed_in_test_mode;
    }
}

/// Pushes group definitions to the remote directory.
///
/// A run acquires one token, builds one command per group and sends the
/// commands in batches of at most [`MAX_COMMANDS_PER_REQUEST`], one batch at
/// a time. Batches already accepted stay applied when a later batch fails;
/// creation ignores existing groups, so re-running is safe.
pub struct GroupSynchronizer {
    tokens: Arc<dyn AccessTokenProvider>,
    transport: Arc<dyn ActionCommandTransport>,
    builder: CommandBuilder,
}

impl GroupSynchronizer {
    pub fn new(
        tokens: Arc<dyn AccessTokenProvider>,
        transport: Arc<dyn ActionCommandTransport>,
        builder: CommandBuilder,
    ) -> Self {
        Self { tokens, transport, builder }
    }

    /// Create (or keep) every group and add it to the configured profiles.
    ///
    /// The token is acquired first, even for an empty list, so bad
    /// credentials always fail the run.
    ///
    /// Returns the first fatal error: token acquisition, transport, protocol
    /// or a response reporting failed commands. Later batches are not sent.
    #[instrument(skip_all, fields(run_id = %Uuid::new_v4(), groups = groups.len()))]
    pub async fn update_groups(&self, groups: &[GroupDefinition]) -> Result<SyncSummary> {
        let token = self.tokens.acquire_token().await?;
        let commands = self.builder.build(groups);
        let batches = partition(commands, MAX_COMMANDS_PER_REQUEST);
        let total = batches.len();
        info!(batches = total, "Synchronizing groups");

        let mut summary = SyncSummary::default();
        for (index, batch) in batches.iter().enumerate() {
            let response = self.transport.send(batch, &token).await.inspect_err(|err| {
                error!(batch = index + 1, of = total, kind = err.kind(), error = %err, "Batch failed");
            })?;

            summary.record(batch.len(), &response);
            let outcome = ResponseEvaluator::evaluate(&response);
            if let Outcome::SuccessWithWarnings(warnings) = &outcome {
                log_warnings(&response, warnings);
            }

            let warnings = outcome.into_result().inspect_err(|err| {
                error!(batch = index + 1, of = total, error = %err, "Remote reported failed commands");
            })?;
            summary.warnings.extend(warnings);

            debug!(
                batch = index + 1,
                of = total,
                completed = response.completed,
                completed_in_test_mode = response.completed_in_test_mode,
                "Batch accepted"
            );
        }

        info!(
            batches = summary.batches_sent,
            completed = summary.completed,
            warnings = summary.warnings.len(),
            "Groups synchronized"
        );
        Ok(summary)
    }
}

fn log_warnings(response: &ActionCommandResponse, warnings: &[ActionCommandWarning]) {
    let request = response.request.as_ref().map_or_else(|| "Unknown".to_string(), ToString::to_string);
    warn!(count = warnings.len(), %request, "Remote returned warnings");
    for warning in warnings {
        warn!(code = %warning.warning_code, "{warning}");
    }
}
