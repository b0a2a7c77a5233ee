//! Turns member balances into a short list of settling payments.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::aggregation::compute_group_totals;
use crate::core::money::{is_settled, round2, SETTLE_TOLERANCE};
use crate::domain::snapshot::Snapshot;

/// How many upcoming creditors the greedy phase scans for an exact match
/// before falling back to largest-first order.
const EXACT_MATCH_LOOKAHEAD: usize = 3;

/// One settling payment between two members.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct SettlementTransaction {
    pub from_member_id: Uuid,
    pub to_member_id: Uuid,
    pub amount: f64,
}

/// A member still owing or owed money, with the amount left to move.
#[derive(Debug, Clone, Copy)]
struct Party {
    member_id: Uuid,
    remaining: f64,
}

/// Plans settling payments for a group, preferring exact cancellations over
/// raw largest-first pairing.
///
/// Phase 1 pairs every debtor with an unused creditor of identical rounded
/// magnitude. Phase 2 drains the rest greedily, largest remaining amounts
/// first, still swapping in a nearby exact match when one appears.
pub fn plan_settlement(data: &Snapshot, group_id: Uuid) -> Vec<SettlementTransaction> {
    let plan = plan_from_balances(&compute_group_totals(data, group_id).member_balances);
    tracing::debug!(group = %group_id, transactions = plan.len(), "settlement planned");
    plan
}

/// Single-phase variant: largest debtor pays largest creditor until both
/// lists drain. Produces the same zeroing guarantee, usually with as many or
/// more transactions than [`plan_settlement`].
pub fn plan_settlement_greedy(data: &Snapshot, group_id: Uuid) -> Vec<SettlementTransaction> {
    plan_from_balances_greedy(&compute_group_totals(data, group_id).member_balances)
}

/// Two-phase planner over caller-supplied balances.
pub fn plan_from_balances(balances: &BTreeMap<Uuid, f64>) -> Vec<SettlementTransaction> {
    let (mut debtors, mut creditors) = classify(balances);
    if debtors.is_empty() || creditors.is_empty() {
        return Vec::new();
    }

    let mut plan = Vec::new();

    // Phase 1: cancel debtor/creditor pairs whose magnitudes already match.
    for debtor in debtors.iter_mut() {
        let matched = creditors.iter_mut().find(|creditor| {
            !is_settled(creditor.remaining)
                && round2(creditor.remaining) == round2(debtor.remaining)
        });
        if let Some(creditor) = matched {
            plan.push(SettlementTransaction {
                from_member_id: debtor.member_id,
                to_member_id: creditor.member_id,
                amount: round2(debtor.remaining),
            });
            debtor.remaining = 0.0;
            creditor.remaining = 0.0;
        }
    }

    drain_greedy(debtors, creditors, EXACT_MATCH_LOOKAHEAD, &mut plan);
    plan
}

/// Single-phase greedy planner over caller-supplied balances.
pub fn plan_from_balances_greedy(balances: &BTreeMap<Uuid, f64>) -> Vec<SettlementTransaction> {
    let (debtors, creditors) = classify(balances);
    let mut plan = Vec::new();
    if !debtors.is_empty() && !creditors.is_empty() {
        drain_greedy(debtors, creditors, 0, &mut plan);
    }
    plan
}

/// Splits rounded balances into debtor and creditor work lists, dropping
/// anything already inside the settled band.
fn classify(balances: &BTreeMap<Uuid, f64>) -> (Vec<Party>, Vec<Party>) {
    let mut debtors = Vec::new();
    let mut creditors = Vec::new();
    for (&member_id, &balance) in balances {
        let rounded = round2(balance);
        if is_settled(rounded) {
            continue;
        }
        let party = Party {
            member_id,
            remaining: rounded.abs(),
        };
        if rounded > 0.0 {
            creditors.push(party);
        } else {
            debtors.push(party);
        }
    }
    (debtors, creditors)
}

/// Pays creditors out of debtors, both sorted by remaining amount
/// descending. With a non-zero `lookahead` the next few creditors are
/// scanned for an exact match on the current debtor's remainder and swapped
/// to the front, squeezing out extra whole-account cancellations.
fn drain_greedy(
    mut debtors: Vec<Party>,
    mut creditors: Vec<Party>,
    lookahead: usize,
    plan: &mut Vec<SettlementTransaction>,
) {
    debtors.retain(|party| !is_settled(party.remaining));
    creditors.retain(|party| !is_settled(party.remaining));
    sort_descending(&mut debtors);
    sort_descending(&mut creditors);

    let mut i = 0;
    let mut j = 0;
    while i < debtors.len() && j < creditors.len() {
        if lookahead > 0 {
            let need = round2(debtors[i].remaining);
            let window_end = creditors.len().min(j + lookahead);
            let exact = (j..window_end).find(|&k| round2(creditors[k].remaining) == need);
            if let Some(k) = exact {
                creditors.swap(j, k);
            }
        }

        let payment = round2(debtors[i].remaining.min(creditors[j].remaining));
        if payment > SETTLE_TOLERANCE {
            plan.push(SettlementTransaction {
                from_member_id: debtors[i].member_id,
                to_member_id: creditors[j].member_id,
                amount: payment,
            });
        }
        debtors[i].remaining = round2(debtors[i].remaining - payment);
        creditors[j].remaining = round2(creditors[j].remaining - payment);

        if is_settled(debtors[i].remaining) {
            i += 1;
        }
        if is_settled(creditors[j].remaining) {
            j += 1;
        }
    }
}

fn sort_descending(parties: &mut [Party]) {
    parties.sort_by(|a, b| {
        b.remaining
            .partial_cmp(&a.remaining)
            .unwrap_or(Ordering::Equal)
    });
}
