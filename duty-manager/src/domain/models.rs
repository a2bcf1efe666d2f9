// =====================
// Domain models
// =====================

use chrono::NaiveDate;
use serde::Serialize;
use sqlx::FromRow;

pub type StaffId = i64;
pub type DutyId = i64;

// --- Staff ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Staff {
    pub id: StaffId,
    pub name: String,
    // Rows created here always carry a string, older rows may hold NULL
    pub rank: Option<String>,
}

impl Staff {
    /// Absent rank sorts (and displays) as the empty string.
    pub fn rank_or_empty(&self) -> &str {
        self.rank.as_deref().unwrap_or("")
    }
}

// --- Duty ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Duty {
    pub id: DutyId,
    pub duty_date: NaiveDate,
    pub staff_id: StaffId,
    /// A compensatory day off has been authorized
    pub day_off_given: bool,
    /// The day off was actually taken on this date
    pub day_off_date: Option<NaiveDate>,
    pub honorary: bool,
    pub description: String,
}

/// Raw form input for creating or editing a duty.
///
/// Dates arrive in display format (`DD/MM/YYYY`) and are parsed by the ledger.
#[derive(Debug, Clone, Default)]
pub struct DutyInput {
    pub duty_date: String,
    pub staff_id: StaffId,
    pub day_off_given: bool,
    pub day_off_date: Option<String>,
    pub honorary: bool,
    pub description: String,
}

impl DutyInput {
    pub fn new(duty_date: impl Into<String>, staff_id: StaffId) -> Self {
        Self {
            duty_date: duty_date.into(),
            staff_id,
            ..Default::default()
        }
    }

    pub fn day_off_given(mut self, given: bool) -> Self {
        self.day_off_given = given;
        self
    }

    pub fn day_off_date(mut self, date: impl Into<String>) -> Self {
        self.day_off_date = Some(date.into());
        self
    }

    pub fn honorary(mut self, honorary: bool) -> Self {
        self.honorary = honorary;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// One entry of the month selector: machine key `YYYY-MM` and display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MonthOption {
    pub key: String,
    pub label: String,
}
