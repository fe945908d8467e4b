//! Locally defined group records handed in by the host tool

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// A group that should exist in the external directory.
///
/// Produced upstream from the access-control configuration and immutable for
/// the duration of a synchronization call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDefinition {
    /// Group name in the external directory.
    pub id: String,
    /// Optional description sent on creation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Profiles declared on the group itself. Membership steps are built from
    /// the tool-wide configured profiles, not from this set.
    #[serde(default, skip_serializing_if = "BTreeSet::is_empty")]
    pub product_profile_ids: BTreeSet<String>,
}

impl GroupDefinition {
    /// Group without description or profiles.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into(), description: None, product_profile_ids: BTreeSet::new() }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replace the declared product profiles.
    #[must_use]
    pub fn with_product_profiles<I, S>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.product_profile_ids = profiles.into_iter().map(Into::into).collect();
        self
    }
}
