use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::{debug, info, warn};

use crate::domain::models::{Staff, StaffId};
use crate::domain::ordering::StaffOrder;
use crate::error::{DutyError, Result};

pub struct StaffRepository {
    pool: SqlitePool,
}

/// Trims the name and rejects it when nothing is left.
fn normalize_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DutyError::Validation("staff name must not be empty".to_string()));
    }
    Ok(name.to_string())
}

fn normalize_rank(rank: Option<&str>) -> String {
    rank.map(str::trim).unwrap_or_default().to_string()
}

/// Existence check shared by the registry and the duty ledger.
/// Takes the pool or a transaction's connection.
pub(crate) async fn staff_exists<'e, E>(executor: E, id: StaffId) -> Result<bool>
where
    E: Executor<'e, Database = Sqlite>,
{
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM staff WHERE id = ?")
        .bind(id)
        .fetch_optional(executor)
        .await?;
    Ok(found.is_some())
}

impl StaffRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    // =================================================================
    // 1. Create / Update
    // =================================================================

    pub async fn create(&self, name: &str, rank: Option<&str>) -> Result<StaffId> {
        let name = normalize_name(name)?;
        let rank = normalize_rank(rank);

        let id = sqlx::query("INSERT INTO staff (name, rank) VALUES (?, ?)")
            .bind(&name)
            .bind(&rank)
            .execute(&self.pool)
            .await?
            .last_insert_rowid();

        info!(staff_id = id, %name, "staff created");
        Ok(id)
    }

    pub async fn update(&self, id: StaffId, name: &str, rank: Option<&str>) -> Result<()> {
        let name = normalize_name(name)?;
        let rank = normalize_rank(rank);

        let affected = sqlx::query("UPDATE staff SET name = ?, rank = ? WHERE id = ?")
            .bind(&name)
            .bind(&rank)
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(DutyError::staff_not_found(id));
        }

        info!(staff_id = id, %name, "staff updated");
        Ok(())
    }

    // =================================================================
    // 2. Read
    // =================================================================

    pub async fn get(&self, id: StaffId) -> Result<Staff> {
        sqlx::query_as::<_, Staff>("SELECT id, name, rank FROM staff WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DutyError::staff_not_found(id))
    }

    pub async fn exists(&self, id: StaffId) -> Result<bool> {
        staff_exists(&self.pool, id).await
    }

    /// Orders by name or by rank. The count-based orders need the duty ledger
    /// and are applied by `sort_staff`, so they read back in name order here.
    pub async fn list(&self, order: StaffOrder) -> Result<Vec<Staff>> {
        let sql = match order {
            StaffOrder::Rank => {
                "SELECT id, name, rank FROM staff ORDER BY COALESCE(rank, '') ASC, name ASC, id ASC"
            }
            StaffOrder::Name | StaffOrder::Pending | StaffOrder::Received => {
                "SELECT id, name, rank FROM staff ORDER BY name ASC, COALESCE(rank, '') ASC, id ASC"
            }
        };

        debug!(%order, "listing staff");
        let staff = sqlx::query_as::<_, Staff>(sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(staff)
    }

    // =================================================================
    // 3. Delete
    // =================================================================

    /// Removes the staff member and every duty assigned to them.
    ///
    /// Duties go first so no orphan rows survive even if the staff delete
    /// were to fail; both statements share one transaction.
    pub async fn delete(&self, id: StaffId) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        if !staff_exists(&mut *tx, id).await? {
            warn!(staff_id = id, "delete requested for unknown staff");
            return Err(DutyError::staff_not_found(id));
        }

        let duties_removed = sqlx::query("DELETE FROM duties WHERE staff_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        sqlx::query("DELETE FROM staff WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        info!(staff_id = id, duties_removed, "staff deleted");
        Ok(())
    }
}
