use std::collections::HashMap;

use crate::domain::models::{Duty, Staff, StaffId};

/// Pending and received day-off counts per staff member.
///
/// The two counters are independent: a duty that is not yet marked as given
/// counts as pending, and a duty with a recorded day-off date counts as
/// received, so one duty can count toward both, either or neither.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DayOffTally {
    pending: HashMap<StaffId, u32>,
    received: HashMap<StaffId, u32>,
}

impl DayOffTally {
    /// Every staff id in `staff` gets an entry, even with no duties.
    /// Duties of staff outside the set are ignored.
    pub fn compute(staff: &[Staff], duties: &[Duty]) -> Self {
        let mut pending: HashMap<StaffId, u32> = staff.iter().map(|s| (s.id, 0)).collect();
        let mut received: HashMap<StaffId, u32> = staff.iter().map(|s| (s.id, 0)).collect();

        for duty in duties {
            if !duty.day_off_given {
                if let Some(count) = pending.get_mut(&duty.staff_id) {
                    *count += 1;
                }
            }
            if duty.day_off_date.is_some() {
                if let Some(count) = received.get_mut(&duty.staff_id) {
                    *count += 1;
                }
            }
        }

        Self { pending, received }
    }

    pub fn pending(&self, staff_id: StaffId) -> u32 {
        self.pending.get(&staff_id).copied().unwrap_or(0)
    }

    pub fn received(&self, staff_id: StaffId) -> u32 {
        self.received.get(&staff_id).copied().unwrap_or(0)
    }

    pub fn pending_counts(&self) -> &HashMap<StaffId, u32> {
        &self.pending
    }

    pub fn received_counts(&self) -> &HashMap<StaffId, u32> {
        &self.received
    }

    /// Staff still owed at least one day off, in input order.
    pub fn with_pending<'a>(&self, staff: &'a [Staff]) -> Vec<&'a Staff> {
        staff.iter().filter(|s| self.pending(s.id) > 0).collect()
    }
}
