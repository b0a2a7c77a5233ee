pub mod aggregation;
pub mod forecast;
pub mod money;
pub mod settlement;

pub use aggregation::{compute_group_totals, recent_activity, GroupTotals};
pub use forecast::{predict_total_for_group, predict_total_for_group_today, DEFAULT_LOOKAHEAD};
pub use settlement::{
    plan_from_balances, plan_from_balances_greedy, plan_settlement, plan_settlement_greedy,
    SettlementTransaction,
};
