use serde::Serialize;

use crate::application::time::{format_display_date, format_localized_long_date, Locale};
use crate::domain::models::{Duty, DutyId, MonthOption, Staff, StaffId};
use crate::domain::ordering::{DutyOrder, StaffOrder};

/// One row of the overview: a staff member with their day-off counts.
#[derive(Debug, Clone, Serialize)]
pub struct StaffSummary {
    pub id: StaffId,
    pub name: String,
    pub rank: String,
    pub pending_days_off: u32,
    pub received_days_off: u32,
}

/// Overview page (staff with day-off counts)
#[derive(Debug, Serialize)]
pub struct StaffOverview {
    pub order_by: StaffOrder,
    pub staff: Vec<StaffSummary>,
    /// Staff still owed a day off, name order
    pub staff_with_pending: Vec<StaffSummary>,
}

/// A duty ready for display, with the staff columns joined in.
#[derive(Debug, Clone, Serialize)]
pub struct DutyView {
    pub id: DutyId,
    pub staff_id: StaffId,
    pub staff_name: String,
    pub staff_rank: String,
    pub duty_date: String,
    pub duty_date_long: String,
    pub day_off_given: bool,
    pub day_off_date: String,
    pub day_off_date_long: String,
    pub honorary: bool,
    pub description: String,
}

impl DutyView {
    /// `staff` is None when the referenced row is gone; the name is left blank.
    pub fn new(duty: &Duty, staff: Option<&Staff>, locale: &Locale) -> Self {
        Self {
            id: duty.id,
            staff_id: duty.staff_id,
            staff_name: staff.map(|s| s.name.clone()).unwrap_or_default(),
            staff_rank: staff.map(|s| s.rank_or_empty().to_string()).unwrap_or_default(),
            duty_date: format_display_date(Some(duty.duty_date)),
            duty_date_long: format_localized_long_date(Some(duty.duty_date), locale),
            day_off_given: duty.day_off_given,
            day_off_date: format_display_date(duty.day_off_date),
            day_off_date_long: format_localized_long_date(duty.day_off_date, locale),
            honorary: duty.honorary,
            description: duty.description.clone(),
        }
    }
}

/// Duty listing with the month selector
#[derive(Debug, Serialize)]
pub struct DutyBoard {
    /// `YYYY-MM` of the active filter
    pub selected_month: Option<String>,
    pub months: Vec<MonthOption>,
    pub duties: Vec<DutyView>,
}

/// Duty history of one staff member
#[derive(Debug, Serialize)]
pub struct StaffDutyHistory {
    pub staff: Staff,
    pub order_by: DutyOrder,
    pub duties: Vec<DutyView>,
}
