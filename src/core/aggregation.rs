//! Per-group totals, category breakdowns, and member balances.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::expense::{ActivityEntry, ExpenseCategory};
use crate::domain::snapshot::Snapshot;

/// Aggregated view of one group's spending.
///
/// `by_category` is keyed deterministically but carries no meaningful
/// order; consumers must treat it as an unordered mapping.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GroupTotals {
    pub total: f64,
    pub by_category: BTreeMap<ExpenseCategory, f64>,
    /// Net position per member: positive means the member is owed money,
    /// negative means the member owes. Sums to zero up to float drift.
    pub member_balances: BTreeMap<Uuid, f64>,
}

impl GroupTotals {
    /// Net balance for a member, 0.0 when the member is unknown.
    pub fn balance_for(&self, member_id: Uuid) -> f64 {
        self.member_balances
            .get(&member_id)
            .copied()
            .unwrap_or(0.0)
    }
}

/// Computes totals and per-member balances for `group_id`.
///
/// An unknown group yields the empty aggregate. Unknown member ids inside
/// expenses (payer or split entries) get ad hoc balance entries instead of
/// being rejected; downstream settlement math relies on always getting a
/// result.
pub fn compute_group_totals(data: &Snapshot, group_id: Uuid) -> GroupTotals {
    let mut totals = GroupTotals::default();
    let group = match data.group_by_id(group_id) {
        Some(group) => group,
        None => return totals,
    };

    for member in &group.members {
        totals.member_balances.insert(member.id, 0.0);
    }

    for expense in data.expenses_for_group(group_id) {
        totals.total += expense.amount;
        *totals.by_category.entry(expense.category).or_insert(0.0) += expense.amount;

        // The payer fronted the whole amount; every split entry owes an
        // equal share of it.
        let share = expense.share();
        *totals
            .member_balances
            .entry(expense.paid_by_member_id)
            .or_insert(0.0) += expense.amount;
        for member_id in &expense.split_member_ids {
            *totals.member_balances.entry(*member_id).or_insert(0.0) -= share;
        }
    }

    totals
}

/// Most recent `limit` entries of the activity log, newest first. Entries
/// sharing a timestamp come out in reversed snapshot order.
pub fn recent_activity(data: &Snapshot, limit: usize) -> Vec<ActivityEntry> {
    let mut entries: Vec<ActivityEntry> = data.activity.iter().rev().cloned().collect();
    entries.sort_by(|a, b| b.at.cmp(&a.at));
    entries.truncate(limit);
    entries
}
