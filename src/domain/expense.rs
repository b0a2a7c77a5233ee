//! Expense records and the activity event log fed in by outer layers.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::Identifiable;

/// Fixed set of spending categories.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum ExpenseCategory {
    Food,
    Accommodation,
    Transport,
    Activities,
    #[default]
    Other,
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExpenseCategory::Food => "Food",
            ExpenseCategory::Accommodation => "Accommodation",
            ExpenseCategory::Transport => "Transport",
            ExpenseCategory::Activities => "Activities",
            ExpenseCategory::Other => "Other",
        };
        f.write_str(label)
    }
}

/// A single shared expense paid by one member and split across others.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Expense {
    pub id: Uuid,
    pub group_id: Uuid,
    pub amount: f64,
    pub category: ExpenseCategory,
    pub description: String,
    pub date: DateTime<Utc>,
    pub paid_by_member_id: Uuid,
    /// Members sharing the cost. Duplicated ids inflate that member's share
    /// proportionally; accepted input, not an error.
    pub split_member_ids: Vec<Uuid>,
}

impl Expense {
    pub fn new(
        group_id: Uuid,
        amount: f64,
        category: ExpenseCategory,
        description: impl Into<String>,
        date: DateTime<Utc>,
        paid_by_member_id: Uuid,
        split_member_ids: Vec<Uuid>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            amount,
            category,
            description: description.into(),
            date,
            paid_by_member_id,
            split_member_ids,
        }
    }

    /// Equal share owed by each entry in `split_member_ids`, 0.0 when the
    /// split list is empty.
    pub fn share(&self) -> f64 {
        if self.split_member_ids.is_empty() {
            0.0
        } else {
            self.amount / self.split_member_ids.len() as f64
        }
    }
}

impl Identifiable for Expense {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Kind of event recorded in the activity log.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ActivityKind {
    Group,
    Expense,
    #[serde(rename = "doc")]
    Document,
}

/// One entry in the append-only activity log kept by the outer layers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActivityEntry {
    pub id: Uuid,
    pub kind: ActivityKind,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl ActivityEntry {
    pub fn new(kind: ActivityKind, message: impl Into<String>, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            message: message.into(),
            at,
        }
    }
}
