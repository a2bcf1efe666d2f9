use std::collections::HashMap;

use tracing::debug;

use crate::application::dto::{DutyBoard, DutyView, StaffDutyHistory, StaffOverview, StaffSummary};
use crate::application::time::MonthKey;
use crate::domain::accounting::DayOffTally;
use crate::domain::models::{DutyId, DutyInput, Staff, StaffId};
use crate::domain::ordering::{sort_staff, DutyOrder, StaffOrder};
use crate::error::Result;
use crate::AppServices;

fn summarize(staff: &Staff, tally: &DayOffTally) -> StaffSummary {
    StaffSummary {
        id: staff.id,
        name: staff.name.clone(),
        rank: staff.rank_or_empty().to_string(),
        pending_days_off: tally.pending(staff.id),
        received_days_off: tally.received(staff.id),
    }
}

// --- Overview ---

/// Every staff member with pending/received day-off counts.
///
/// `order_by` takes the query keys `name`, `rank`, `pending` and `received`;
/// anything else sorts by name.
pub async fn staff_overview(
    services: &AppServices,
    order_by: Option<&str>,
) -> Result<StaffOverview> {
    let order = StaffOrder::from_query(order_by);

    // Accounting runs once over the full duty set
    let mut staff = services.staff.list(StaffOrder::Name).await?;
    let duties = services.duty.list_all().await?;
    let tally = DayOffTally::compute(&staff, &duties);

    let staff_with_pending = tally
        .with_pending(&staff)
        .into_iter()
        .map(|s| summarize(s, &tally))
        .collect();

    sort_staff(&mut staff, order, &tally);
    debug!(%order, staff = staff.len(), duties = duties.len(), "overview computed");

    Ok(StaffOverview {
        order_by: order,
        staff: staff.iter().map(|s| summarize(s, &tally)).collect(),
        staff_with_pending,
    })
}

// --- Staff ---

/// Staff listing ordered by `name` (default) or `rank`.
pub async fn staff_directory(
    services: &AppServices,
    order_by: Option<&str>,
) -> Result<Vec<Staff>> {
    let order = match StaffOrder::from_query(order_by) {
        StaffOrder::Rank => StaffOrder::Rank,
        _ => StaffOrder::Name,
    };
    services.staff.list(order).await
}

pub async fn add_staff(services: &AppServices, name: &str, rank: Option<&str>) -> Result<StaffId> {
    services.staff.create(name, rank).await
}

pub async fn edit_staff(
    services: &AppServices,
    id: StaffId,
    name: &str,
    rank: Option<&str>,
) -> Result<()> {
    services.staff.update(id, name, rank).await
}

pub async fn remove_staff(services: &AppServices, id: StaffId) -> Result<()> {
    services.staff.delete(id).await
}

// --- Duties ---

/// Duty listing, optionally restricted to a `YYYY-MM` month.
///
/// A blank month means no filter.
pub async fn duty_board(services: &AppServices, month: Option<&str>) -> Result<DutyBoard> {
    let month = match month.map(str::trim) {
        None | Some("") => None,
        Some(key) => Some(key.parse::<MonthKey>()?),
    };

    let staff_by_id: HashMap<StaffId, Staff> = services
        .staff
        .list(StaffOrder::Rank)
        .await?
        .into_iter()
        .map(|s| (s.id, s))
        .collect();

    let duties = services.duty.list(month).await?;
    let months = services.duty.enumerate_months(&services.locale).await?;

    Ok(DutyBoard {
        selected_month: month.map(|m| m.to_string()),
        months,
        duties: duties
            .iter()
            .map(|d| DutyView::new(d, staff_by_id.get(&d.staff_id), &services.locale))
            .collect(),
    })
}

/// One staff member's duties ordered by `date` (default), `off` or `honorary`.
pub async fn staff_duty_history(
    services: &AppServices,
    staff_id: StaffId,
    order_by: Option<&str>,
) -> Result<StaffDutyHistory> {
    let order = DutyOrder::from_query(order_by);
    let staff = services.staff.get(staff_id).await?;
    let duties = services.duty.list_for_staff(staff_id, order).await?;

    let duties = duties
        .iter()
        .map(|d| DutyView::new(d, Some(&staff), &services.locale))
        .collect();

    Ok(StaffDutyHistory {
        staff,
        order_by: order,
        duties,
    })
}

pub async fn add_duty(services: &AppServices, input: &DutyInput) -> Result<DutyId> {
    services.duty.create(input).await
}

pub async fn edit_duty(services: &AppServices, id: DutyId, input: &DutyInput) -> Result<()> {
    services.duty.update(id, input).await
}

pub async fn remove_duty(services: &AppServices, id: DutyId) -> Result<()> {
    services.duty.delete(id).await
}
