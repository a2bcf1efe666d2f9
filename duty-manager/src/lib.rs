use std::fs;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use tracing::info;

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

use application::time::Locale;
use config::StoreConfig;
use error::Result;
use infrastructure::duty_repo::DutyRepository;
use infrastructure::staff_repo::StaffRepository;

// Holds every repository plus the display locale
pub struct AppServices {
    pub staff: StaffRepository,
    pub duty: DutyRepository,
    pub locale: Locale,
}

impl AppServices {
    pub fn new(pool: SqlitePool) -> Self {
        Self::with_locale(pool, Locale::default())
    }

    pub fn with_locale(pool: SqlitePool, locale: Locale) -> Self {
        Self {
            // the pool is reference counted, clones share connections
            staff: StaffRepository::new(pool.clone()),
            duty: DutyRepository::new(pool),
            locale,
        }
    }
}

/// Opens (creating if needed) the SQLite store and brings its schema up to date.
///
/// Call once at startup. Running it again against the same file is a no-op
/// apart from opening a new pool.
pub async fn open_store(config: &StoreConfig) -> Result<SqlitePool> {
    let db_path = config.database_path();

    if let Some(dir) = db_path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }

    info!(path = %db_path.display(), "opening duty store");

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect_with(options)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
