use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::find_by_id;
use crate::domain::expense::{ActivityEntry, Expense};
use crate::domain::group::Group;
use crate::errors::EngineError;

/// Immutable data set handed to the engine for one invocation.
///
/// Ownership stays with the caller; every engine operation borrows the
/// snapshot and returns freshly allocated results. In a multi-threaded host
/// the caller clones or otherwise freezes the snapshot before invoking.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub groups: Vec<Group>,
    #[serde(default)]
    pub expenses: Vec<Expense>,
    #[serde(default)]
    pub activity: Vec<ActivityEntry>,
}

impl Snapshot {
    pub fn group_by_id(&self, group_id: Uuid) -> Option<&Group> {
        find_by_id(&self.groups, group_id)
    }

    /// Expenses belonging to `group_id`, in snapshot order. Expenses
    /// referencing any other (or unknown) group are excluded.
    pub fn expenses_for_group(&self, group_id: Uuid) -> impl Iterator<Item = &Expense> {
        self.expenses
            .iter()
            .filter(move |expense| expense.group_id == group_id)
    }

    /// Parses a snapshot from the JSON blob kept by the storage collaborator.
    pub fn from_json(raw: &str) -> Result<Self, EngineError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn to_json(&self) -> Result<String, EngineError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
