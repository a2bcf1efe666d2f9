use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::domain::accounting::DayOffTally;
use crate::domain::models::{Duty, Staff};
use crate::error::DutyError;

// =====================
// Staff ordering
// =====================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StaffOrder {
    /// name, then rank
    #[default]
    Name,
    /// rank (absent = ""), then name
    Rank,
    /// most pending days off first, then name
    Pending,
    /// most received days off first, then name
    Received,
}

impl StaffOrder {
    pub const ALL: [StaffOrder; 4] = [
        StaffOrder::Name,
        StaffOrder::Rank,
        StaffOrder::Pending,
        StaffOrder::Received,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StaffOrder::Name => "name",
            StaffOrder::Rank => "rank",
            StaffOrder::Pending => "pending",
            StaffOrder::Received => "received",
        }
    }

    /// Query-string parsing: missing or unknown keys fall back to `Name`.
    pub fn from_query(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for StaffOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StaffOrder {
    type Err = DutyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StaffOrder::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| DutyError::Validation(format!("unknown staff order {:?}", s)))
    }
}

/// Sorts staff in place. Ids break every remaining tie so the output is total.
pub fn sort_staff(staff: &mut [Staff], order: StaffOrder, tally: &DayOffTally) {
    match order {
        StaffOrder::Name => staff.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then_with(|| a.rank_or_empty().cmp(b.rank_or_empty()))
                .then_with(|| a.id.cmp(&b.id))
        }),
        StaffOrder::Rank => staff.sort_by(|a, b| {
            a.rank_or_empty()
                .cmp(b.rank_or_empty())
                .then_with(|| a.name.cmp(&b.name))
                .then_with(|| a.id.cmp(&b.id))
        }),
        StaffOrder::Pending => {
            staff.sort_by_cached_key(|s| (Reverse(tally.pending(s.id)), s.name.clone(), s.id))
        }
        StaffOrder::Received => {
            staff.sort_by_cached_key(|s| (Reverse(tally.received(s.id)), s.name.clone(), s.id))
        }
    }
}

// =====================
// Duty ordering
// =====================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DutyOrder {
    #[default]
    Date,
    /// day off given first
    Off,
    /// honorary first
    Honorary,
}

impl DutyOrder {
    pub const ALL: [DutyOrder; 3] = [DutyOrder::Date, DutyOrder::Off, DutyOrder::Honorary];

    pub fn as_str(&self) -> &'static str {
        match self {
            DutyOrder::Date => "date",
            DutyOrder::Off => "off",
            DutyOrder::Honorary => "honorary",
        }
    }

    /// Query-string parsing: missing or unknown keys fall back to `Date`.
    pub fn from_query(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for DutyOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DutyOrder {
    type Err = DutyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DutyOrder::ALL
            .into_iter()
            .find(|o| o.as_str() == s)
            .ok_or_else(|| DutyError::Validation(format!("unknown duty order {:?}", s)))
    }
}

/// Flagged duties first (`false` sorts before `true`, so the key is the
/// negated flag), then by date, then by id.
pub fn sort_duties(duties: &mut [Duty], order: DutyOrder) {
    match order {
        DutyOrder::Date => duties.sort_by_key(|d| (d.duty_date, d.id)),
        DutyOrder::Off => duties.sort_by_key(|d| (!d.day_off_given, d.duty_date, d.id)),
        DutyOrder::Honorary => duties.sort_by_key(|d| (!d.honorary, d.duty_date, d.id)),
    }
}
