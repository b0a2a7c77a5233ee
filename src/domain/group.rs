use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::*;
use crate::errors::EngineError;

/// A person taking part in a trip group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Member {
    pub id: Uuid,
    pub name: String,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

impl Identifiable for Member {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Member {
    fn name(&self) -> &str {
        &self.name
    }
}

/// A trip group: the people sharing expenses plus optional travel dates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub members: Vec<Member>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
}

impl Group {
    pub fn new(name: impl Into<String>, members: Vec<Member>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            members,
            description: None,
            start_date: None,
            end_date: None,
        }
    }

    /// Attaches travel dates to the group.
    pub fn with_dates(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self.end_date = Some(end_date);
        self
    }

    pub fn member_by_id(&self, member_id: Uuid) -> Option<&Member> {
        find_by_id(&self.members, member_id)
    }

    /// The inclusive travel window, present only when both dates are set and
    /// ordered. Malformed dates degrade to an undated group rather than an
    /// error.
    pub fn trip_window(&self) -> Option<TripWindow> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => TripWindow::new(start, end).ok(),
            _ => None,
        }
    }
}

impl Identifiable for Group {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl NamedEntity for Group {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Inclusive range of travel days for a dated trip.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TripWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl TripWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, EngineError> {
        if end < start {
            return Err(EngineError::InvalidInput(
                "trip end must not precede start".into(),
            ));
        }
        Ok(Self { start, end })
    }

    /// Number of calendar days covered, counting both endpoints.
    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    /// Iterates every day from the start through `end` clamped to
    /// `reference`, whichever is earlier.
    pub fn days_until(&self, reference: NaiveDate) -> impl Iterator<Item = NaiveDate> {
        let last = self.end.min(reference);
        self.start.iter_days().take_while(move |day| *day <= last)
    }
}
