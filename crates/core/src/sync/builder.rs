//! Translation of group definitions into action commands

use std::collections::BTreeSet;

use umsync_domain::{
    ActionCommand, AddMembershipStep, CreateGroupStep, GroupDefinition, Step,
};

/// Builds one [`ActionCommand`] per group definition.
///
/// Every command creates its group (ignoring an existing one) and, when
/// product profiles are configured, adds the group to all of them. The
/// profiles come from tool-wide configuration and are the same for every
/// group.
#[derive(Debug, Clone, Default)]
pub struct CommandBuilder {
    product_profiles: BTreeSet<String>,
}

impl CommandBuilder {
    pub fn new<I, S>(product_profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { product_profiles: product_profiles.into_iter().map(Into::into).collect() }
    }

    pub fn product_profiles(&self) -> &BTreeSet<String> {
        &self.product_profiles
    }

    /// Commands in input order.
    pub fn build(&self, groups: &[GroupDefinition]) -> Vec<ActionCommand> {
        groups.iter().map(|group| self.build_command(group)).collect()
    }

    pub fn build_command(&self, group: &GroupDefinition) -> ActionCommand {
        let mut command = ActionCommand::new(group.id.clone());
        command.add_step(Step::CreateGroup(CreateGroupStep::new(group.description.clone())));

        if !self.product_profiles.is_empty() {
            command.add_step(Step::AddMembership(AddMembershipStep::product_profiles(
                self.product_profiles.clone(),
            )));
        }

        command
    }
}
