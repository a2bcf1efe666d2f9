#[cfg(test)]
mod store_tests {
    use duty_manager_lib::config::StoreConfig;
    use duty_manager_lib::{open_store, AppServices};

    #[tokio::test]
    async fn test_open_store_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("nested").join("duty.db");
        let config = StoreConfig::new(db_path).with_max_connections(2);

        let pool = open_store(&config).await.expect("first open");
        let services = AppServices::new(pool.clone());
        let id = services.staff.create("Eleni", Some("Captain")).await.unwrap();
        pool.close().await;

        assert!(config.database_path().exists());

        // second startup against the same file keeps the data
        let pool = open_store(&config).await.expect("second open");
        let services = AppServices::new(pool);
        assert_eq!(services.staff.get(id).await.unwrap().name, "Eleni");
    }

    #[tokio::test]
    async fn test_foreign_keys_are_enforced() {
        let dir = tempfile::tempdir().unwrap();
        let pool = open_store(&StoreConfig::new(dir.path().join("duty.db"))).await.unwrap();

        let orphan = sqlx::query(
            "INSERT INTO duties (duty_date, staff_id) VALUES ('2025-01-01', 42)",
        )
        .execute(&pool)
        .await;
        assert!(orphan.is_err());
    }
}
