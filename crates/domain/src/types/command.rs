//! UMAPI action commands and their wire encoding
//!
//! A command targets one user group and carries an ordered list of steps.
//! Each step encodes as a single-key object naming the step type:
//!
//! ```json
//! { "usergroup": "authors",
//!   "do": [
//!     { "createUserGroup": { "option": "ignoreIfAlreadyExists", "description": "..." } },
//!     { "add": { "productConfiguration": ["AEM Users"] } }
//!   ] }
//! ```

use std::collections::BTreeSet;

use serde_json::{json, Map, Value};

use crate::impl_wire_name_conversions;

/// Behaviour of `createUserGroup` when the group already exists.
///
/// Only the ignoring policy is offered: updating on conflict fails remotely
/// for names that differ only in case, so an existing group is accepted as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConflictPolicy {
    /// Keep an existing group untouched.
    #[default]
    IgnoreIfExists,
}

impl_wire_name_conversions!(ConflictPolicy {
    IgnoreIfExists => "ignoreIfAlreadyExists",
});

/// `createUserGroup` step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CreateGroupStep {
    /// What to do when the group already exists.
    pub conflict_policy: ConflictPolicy,
    /// Free-text description; omitted from the wire form when blank.
    pub description: Option<String>,
}

impl CreateGroupStep {
    /// Wire key of the step.
    pub const TYPE_NAME: &'static str = "createUserGroup";

    /// Create step that ignores an existing group.
    #[must_use]
    pub fn new(description: Option<String>) -> Self {
        Self { conflict_policy: ConflictPolicy::IgnoreIfExists, description }
    }

    /// Step body. The remote rejects empty descriptions, so `description` is
    /// only present when it holds at least one character.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut fields = Map::new();
        fields.insert("option".to_string(), Value::String(self.conflict_policy.to_string()));
        if let Some(description) = self.description.as_deref().filter(|d| !d.is_empty()) {
            fields.insert("description".to_string(), Value::String(description.to_string()));
        }
        Value::Object(fields)
    }
}

/// `add` step adding memberships to the group.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AddMembershipStep {
    /// Users to add to the group (`user`).
    pub user_ids: BTreeSet<String>,
    /// Product profiles the group joins (`productConfiguration`).
    pub product_profile_ids: BTreeSet<String>,
}

impl AddMembershipStep {
    /// Wire key of the step.
    pub const TYPE_NAME: &'static str = "add";

    /// Step adding the group to `product_profile_ids` and no users.
    #[must_use]
    pub fn product_profiles(product_profile_ids: BTreeSet<String>) -> Self {
        Self { user_ids: BTreeSet::new(), product_profile_ids }
    }

    /// Step body. Empty sets are omitted entirely.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut fields = Map::new();
        if !self.user_ids.is_empty() {
            fields.insert("user".to_string(), json!(self.user_ids));
        }
        if !self.product_profile_ids.is_empty() {
            fields.insert("productConfiguration".to_string(), json!(self.product_profile_ids));
        }
        Value::Object(fields)
    }
}

/// A single typed operation within an action command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// `createUserGroup`
    CreateGroup(CreateGroupStep),
    /// `add`
    AddMembership(AddMembershipStep),
}

impl Step {
    /// Wire key naming the step type.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::CreateGroup(_) => CreateGroupStep::TYPE_NAME,
            Self::AddMembership(_) => AddMembershipStep::TYPE_NAME,
        }
    }

    /// `{ "<typeName>": { fields... } }`
    #[must_use]
    pub fn to_json(&self) -> Value {
        let body = match self {
            Self::CreateGroup(step) => step.to_json(),
            Self::AddMembership(step) => step.to_json(),
        };
        let mut wrapper = Map::new();
        wrapper.insert(self.type_name().to_string(), body);
        Value::Object(wrapper)
    }
}

/// All steps for one user group, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionCommand {
    /// Name of the user group the steps apply to (`usergroup`).
    pub target_group_id: String,
    /// Steps executed in order (`do`).
    pub steps: Vec<Step>,
}

impl ActionCommand {
    /// Command without steps for `target_group_id`.
    #[must_use]
    pub fn new(target_group_id: impl Into<String>) -> Self {
        Self { target_group_id: target_group_id.into(), steps: Vec::new() }
    }

    /// Append a step after the existing ones.
    pub fn add_step(&mut self, step: Step) {
        self.steps.push(step);
    }

    /// `{ "usergroup": ..., "do": [steps...] }`
    #[must_use]
    pub fn to_json(&self) -> Value {
        json!({
            "usergroup": self.target_group_id,
            "do": self.steps.iter().map(Step::to_json).collect::<Vec<_>>(),
        })
    }
}

/// Commands sent together in one request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Batch {
    commands: Vec<ActionCommand>,
}

impl Batch {
    /// Batch of `commands`, kept in order.
    #[must_use]
    pub fn new(commands: Vec<ActionCommand>) -> Self {
        Self { commands }
    }

    /// Commands in send order.
    #[must_use]
    pub fn commands(&self) -> &[ActionCommand] {
        &self.commands
    }

    /// Number of commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether the batch holds no command.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// JSON array of the commands.
    #[must_use]
    pub fn to_json(&self) -> Value {
        Value::Array(self.commands.iter().map(ActionCommand::to_json).collect())
    }

    /// Request body: the JSON array of commands.
    #[must_use]
    pub fn to_payload(&self) -> String {
        self.to_json().to_string()
    }
}
