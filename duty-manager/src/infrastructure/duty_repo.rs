use std::collections::BTreeSet;

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::application::time::{parse_display_date, parse_optional_display_date, Locale, MonthKey};
use crate::domain::models::{Duty, DutyId, DutyInput, MonthOption, StaffId};
use crate::domain::ordering::{sort_duties, DutyOrder};
use crate::error::{DutyError, Result};
use crate::infrastructure::staff_repo::staff_exists;

const DUTY_COLUMNS: &str =
    "id, duty_date, staff_id, day_off_given, day_off_date, honorary, description";

pub struct DutyRepository {
    pool: SqlitePool,
}

// =====================
// Validated input
// =====================

// DutyInput after date parsing, ready to bind
struct DutyRecord {
    duty_date: NaiveDate,
    staff_id: StaffId,
    day_off_given: bool,
    day_off_date: Option<NaiveDate>,
    honorary: bool,
    description: String,
}

impl DutyRecord {
    fn parse(input: &DutyInput) -> Result<Self> {
        Ok(Self {
            duty_date: parse_display_date(&input.duty_date)?,
            staff_id: input.staff_id,
            day_off_given: input.day_off_given,
            day_off_date: parse_optional_display_date(input.day_off_date.as_deref())?,
            honorary: input.honorary,
            description: input.description.trim().to_string(),
        })
    }
}

impl DutyRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn ensure_staff(&self, staff_id: StaffId) -> Result<()> {
        if staff_exists(&self.pool, staff_id).await? {
            Ok(())
        } else {
            Err(DutyError::staff_not_found(staff_id))
        }
    }

    // =================================================================
    // 1. Create / Update
    // =================================================================

    pub async fn create(&self, input: &DutyInput) -> Result<DutyId> {
        let record = DutyRecord::parse(input)?;
        self.ensure_staff(record.staff_id).await?;

        let id = sqlx::query(
            "INSERT INTO duties
                (duty_date, staff_id, day_off_given, day_off_date, honorary, description)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(record.duty_date)
        .bind(record.staff_id)
        .bind(record.day_off_given)
        .bind(record.day_off_date)
        .bind(record.honorary)
        .bind(&record.description)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        info!(
            duty_id = id,
            staff_id = record.staff_id,
            duty_date = %record.duty_date,
            "duty created"
        );
        Ok(id)
    }

    /// Replaces every mutable field. A blank day-off date clears it.
    pub async fn update(&self, id: DutyId, input: &DutyInput) -> Result<()> {
        let record = DutyRecord::parse(input)?;
        self.ensure_staff(record.staff_id).await?;

        let affected = sqlx::query(
            "UPDATE duties
             SET duty_date = ?, staff_id = ?, day_off_given = ?, day_off_date = ?,
                 honorary = ?, description = ?
             WHERE id = ?",
        )
        .bind(record.duty_date)
        .bind(record.staff_id)
        .bind(record.day_off_given)
        .bind(record.day_off_date)
        .bind(record.honorary)
        .bind(&record.description)
        .bind(id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(DutyError::duty_not_found(id));
        }

        info!(duty_id = id, staff_id = record.staff_id, "duty updated");
        Ok(())
    }

    // =================================================================
    // 2. Read
    // =================================================================

    pub async fn get(&self, id: DutyId) -> Result<Duty> {
        sqlx::query_as::<_, Duty>(&format!("SELECT {DUTY_COLUMNS} FROM duties WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DutyError::duty_not_found(id))
    }

    pub async fn list_all(&self) -> Result<Vec<Duty>> {
        self.list(None).await
    }

    /// All duties, or only those dated inside `month`, oldest first.
    pub async fn list(&self, month: Option<MonthKey>) -> Result<Vec<Duty>> {
        let duties = match month {
            Some(month) => {
                let (start, end) = month
                    .date_range()
                    .ok_or_else(|| DutyError::InvalidDateFormat(month.to_string()))?;

                debug!(%month, "listing duties for month");
                sqlx::query_as::<_, Duty>(&format!(
                    "SELECT {DUTY_COLUMNS} FROM duties
                     WHERE duty_date >= ? AND duty_date < ?
                     ORDER BY duty_date ASC, id ASC"
                ))
                .bind(start)
                .bind(end)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Duty>(&format!(
                    "SELECT {DUTY_COLUMNS} FROM duties ORDER BY duty_date ASC, id ASC"
                ))
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(duties)
    }

    /// Duty history of one staff member.
    pub async fn list_for_staff(&self, staff_id: StaffId, order: DutyOrder) -> Result<Vec<Duty>> {
        self.ensure_staff(staff_id).await?;

        let mut duties = sqlx::query_as::<_, Duty>(&format!(
            "SELECT {DUTY_COLUMNS} FROM duties WHERE staff_id = ? ORDER BY duty_date ASC, id ASC"
        ))
        .bind(staff_id)
        .fetch_all(&self.pool)
        .await?;

        sort_duties(&mut duties, order);
        Ok(duties)
    }

    /// Distinct months that hold at least one duty, most recent first.
    pub async fn enumerate_months(&self, locale: &Locale) -> Result<Vec<MonthOption>> {
        let dates: Vec<NaiveDate> = sqlx::query_scalar("SELECT duty_date FROM duties")
            .fetch_all(&self.pool)
            .await?;

        let months: BTreeSet<MonthKey> = dates.into_iter().map(MonthKey::of).collect();

        Ok(months
            .into_iter()
            .rev()
            .map(|m| MonthOption {
                key: m.to_string(),
                label: m.label(locale),
            })
            .collect())
    }

    // =================================================================
    // 3. Delete
    // =================================================================

    pub async fn delete(&self, id: DutyId) -> Result<()> {
        let affected = sqlx::query("DELETE FROM duties WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            warn!(duty_id = id, "delete requested for unknown duty");
            return Err(DutyError::duty_not_found(id));
        }

        info!(duty_id = id, "duty deleted");
        Ok(())
    }
}
