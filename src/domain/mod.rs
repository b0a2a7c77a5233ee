pub mod common;
pub mod expense;
pub mod group;
pub mod snapshot;

pub use common::{find_by_id, Identifiable, NamedEntity};
pub use expense::{ActivityEntry, ActivityKind, Expense, ExpenseCategory};
pub use group::{Group, Member, TripWindow};
pub use snapshot::Snapshot;
