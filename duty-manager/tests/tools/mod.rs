#![allow(dead_code)]

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use duty_manager_lib::domain::models::{DutyInput, Staff};
use duty_manager_lib::AppServices;

// An in-memory database lives as long as its connection, keep a single one
pub async fn setup_test_db() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to create memory pool");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    pool
}

pub async fn setup_test_services() -> AppServices {
    AppServices::new(setup_test_db().await)
}

pub async fn count_duties_for(pool: &SqlitePool, staff_id: i64) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM duties WHERE staff_id = ?")
        .bind(staff_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(pool)
        .await
        .unwrap()
}

pub fn duty_on(date: &str, staff_id: i64) -> DutyInput {
    DutyInput::new(date, staff_id)
}

pub fn staff_ids(list: &[Staff]) -> Vec<i64> {
    list.iter().map(|s| s.id).collect()
}
