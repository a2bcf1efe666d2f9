mod tools;

#[cfg(test)]
mod duty_repo_tests {
    use chrono::NaiveDate;

    use duty_manager_lib::application::time::{Locale, MonthKey};
    use duty_manager_lib::domain::models::DutyInput;
    use duty_manager_lib::domain::ordering::DutyOrder;
    use duty_manager_lib::error::DutyError;
    use duty_manager_lib::infrastructure::duty_repo::DutyRepository;
    use duty_manager_lib::infrastructure::staff_repo::StaffRepository;

    use crate::tools::{count_rows, duty_on, setup_test_db};

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn setup() -> (sqlx::SqlitePool, StaffRepository, DutyRepository) {
        let pool = setup_test_db().await;
        (pool.clone(), StaffRepository::new(pool.clone()), DutyRepository::new(pool))
    }

    #[tokio::test]
    async fn test_create_and_get_round_trip() {
        let (_pool, staff, duties) = setup().await;
        let staff_id = staff.create("Eleni", Some("Captain")).await.unwrap();

        let input = DutyInput::new("10/07/2025", staff_id)
            .day_off_date("15/07/2025")
            .honorary(true)
            .description("  parade  ");
        let id = duties.create(&input).await.unwrap();

        let duty = duties.get(id).await.unwrap();
        assert_eq!(duty.duty_date, ymd(2025, 7, 10));
        assert_eq!(duty.staff_id, staff_id);
        assert!(!duty.day_off_given);
        assert_eq!(duty.day_off_date, Some(ymd(2025, 7, 15)));
        assert!(duty.honorary);
        assert_eq!(duty.description, "parade");
    }

    #[tokio::test]
    async fn test_defaults_for_optional_fields() {
        let (_pool, staff, duties) = setup().await;
        let staff_id = staff.create("Eleni", None).await.unwrap();

        let id = duties.create(&duty_on("01/01/2025", staff_id)).await.unwrap();
        let duty = duties.get(id).await.unwrap();

        assert!(!duty.day_off_given);
        assert!(!duty.honorary);
        assert_eq!(duty.day_off_date, None);
        assert_eq!(duty.description, "");
    }

    #[tokio::test]
    async fn test_create_rejects_bad_input_without_writing() {
        let (pool, staff, duties) = setup().await;
        let staff_id = staff.create("Eleni", None).await.unwrap();

        let bad_date = duties.create(&duty_on("31/02/2024", staff_id)).await.unwrap_err();
        assert!(matches!(bad_date, DutyError::InvalidDateFormat(_)));

        let iso_date = duties.create(&duty_on("2024-02-01", staff_id)).await.unwrap_err();
        assert!(matches!(iso_date, DutyError::InvalidDateFormat(_)));

        let bad_off = duties
            .create(&duty_on("01/02/2024", staff_id).day_off_date("1/2/2024"))
            .await
            .unwrap_err();
        assert!(matches!(bad_off, DutyError::InvalidDateFormat(_)));

        let no_staff = duties.create(&duty_on("01/02/2024", staff_id + 1)).await.unwrap_err();
        assert!(matches!(no_staff, DutyError::NotFound { entity: "staff", .. }));

        assert_eq!(count_rows(&pool, "duties").await, 0);
    }

    #[tokio::test]
    async fn test_update_replaces_fields_and_clears_day_off_date() {
        let (_pool, staff, duties) = setup().await;
        let first = staff.create("First", None).await.unwrap();
        let second = staff.create("Second", None).await.unwrap();

        let id = duties
            .create(&duty_on("01/03/2025", first).day_off_date("05/03/2025").day_off_given(true))
            .await
            .unwrap();

        let edit = DutyInput::new("02/03/2025", second)
            .day_off_date("   ")
            .honorary(true)
            .description("swapped");
        duties.update(id, &edit).await.unwrap();

        let duty = duties.get(id).await.unwrap();
        assert_eq!(duty.duty_date, ymd(2025, 3, 2));
        assert_eq!(duty.staff_id, second);
        assert!(!duty.day_off_given);
        assert_eq!(duty.day_off_date, None);
        assert!(duty.honorary);
        assert_eq!(duty.description, "swapped");
    }

    #[tokio::test]
    async fn test_update_errors() {
        let (_pool, staff, duties) = setup().await;
        let staff_id = staff.create("Eleni", None).await.unwrap();
        let id = duties.create(&duty_on("01/03/2025", staff_id)).await.unwrap();

        let missing = duties.update(id + 1, &duty_on("01/03/2025", staff_id)).await.unwrap_err();
        assert!(matches!(missing, DutyError::NotFound { entity: "duty", .. }));

        let bad_staff = duties.update(id, &duty_on("01/03/2025", staff_id + 9)).await.unwrap_err();
        assert!(bad_staff.is_not_found());

        // unchanged after the failed edits
        assert_eq!(duties.get(id).await.unwrap().staff_id, staff_id);
    }

    #[tokio::test]
    async fn test_list_by_month_and_all() {
        let (_pool, staff, duties) = setup().await;
        let staff_id = staff.create("Eleni", None).await.unwrap();

        let late = duties.create(&duty_on("20/07/2025", staff_id)).await.unwrap();
        let jan = duties.create(&duty_on("05/01/2025", staff_id)).await.unwrap();
        let early = duties.create(&duty_on("10/07/2025", staff_id)).await.unwrap();
        let edge = duties.create(&duty_on("31/07/2025", staff_id)).await.unwrap();
        let aug = duties.create(&duty_on("01/08/2025", staff_id)).await.unwrap();

        let july: Vec<i64> = duties
            .list(Some(MonthKey::new(2025, 7).unwrap()))
            .await
            .unwrap()
            .iter()
            .map(|d| d.id)
            .collect();
        assert_eq!(july, vec![early, late, edge]);

        let all: Vec<i64> = duties.list(None).await.unwrap().iter().map(|d| d.id).collect();
        assert_eq!(all, vec![jan, early, late, edge, aug]);

        let empty = duties.list(Some(MonthKey::new(2024, 7).unwrap())).await.unwrap();
        assert!(empty.is_empty());
    }

    #[tokio::test]
    async fn test_list_for_staff_orders() {
        let (_pool, staff, duties) = setup().await;
        let staff_id = staff.create("Eleni", None).await.unwrap();
        let other = staff.create("Other", None).await.unwrap();

        let d1 = duties.create(&duty_on("05/03/2025", staff_id)).await.unwrap();
        let d2 = duties.create(&duty_on("09/03/2025", staff_id).day_off_given(true)).await.unwrap();
        let d3 = duties.create(&duty_on("01/03/2025", staff_id).honorary(true)).await.unwrap();
        let d4 = duties.create(&duty_on("03/03/2025", staff_id).day_off_given(true)).await.unwrap();
        duties.create(&duty_on("02/03/2025", other)).await.unwrap();

        let ids = |list: Vec<duty_manager_lib::domain::models::Duty>| -> Vec<i64> {
            list.iter().map(|d| d.id).collect()
        };

        let by_date = duties.list_for_staff(staff_id, DutyOrder::Date).await.unwrap();
        assert_eq!(ids(by_date), vec![d3, d4, d1, d2]);

        let by_off = duties.list_for_staff(staff_id, DutyOrder::Off).await.unwrap();
        assert_eq!(ids(by_off), vec![d4, d2, d3, d1]);

        let by_honorary = duties.list_for_staff(staff_id, DutyOrder::Honorary).await.unwrap();
        assert_eq!(ids(by_honorary), vec![d3, d4, d1, d2]);

        let unknown = duties.list_for_staff(other + 1, DutyOrder::Date).await.unwrap_err();
        assert!(unknown.is_not_found());
    }

    #[tokio::test]
    async fn test_enumerate_months_is_distinct_and_descending() {
        let (_pool, staff, duties) = setup().await;
        let staff_id = staff.create("Eleni", None).await.unwrap();

        duties.create(&duty_on("10/07/2025", staff_id)).await.unwrap();
        duties.create(&duty_on("20/07/2025", staff_id)).await.unwrap();
        duties.create(&duty_on("05/01/2025", staff_id)).await.unwrap();

        let months = duties.enumerate_months(&Locale::GREEK).await.unwrap();
        let keys: Vec<&str> = months.iter().map(|m| m.key.as_str()).collect();
        assert_eq!(keys, vec!["2025-07", "2025-01"]);
        assert_eq!(months[0].label, "Ιούλιος 2025");
        assert_eq!(months[1].label, "Ιανουάριος 2025");
    }

    #[tokio::test]
    async fn test_enumerate_months_empty_ledger() {
        let (_pool, _staff, duties) = setup().await;
        assert!(duties.enumerate_months(&Locale::GREEK).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete() {
        let (pool, staff, duties) = setup().await;
        let staff_id = staff.create("Eleni", None).await.unwrap();
        let keep = duties.create(&duty_on("01/03/2025", staff_id)).await.unwrap();
        let gone = duties.create(&duty_on("02/03/2025", staff_id)).await.unwrap();

        duties.delete(gone).await.unwrap();
        assert!(duties.get(gone).await.unwrap_err().is_not_found());
        assert_eq!(duties.get(keep).await.unwrap().id, keep);

        let err = duties.delete(gone).await.unwrap_err();
        assert!(matches!(err, DutyError::NotFound { entity: "duty", .. }));
        assert_eq!(count_rows(&pool, "duties").await, 1);
        assert!(staff.exists(staff_id).await.unwrap());
    }

    #[tokio::test]
    async fn test_staff_checks_agree_after_delete() {
        let (pool, staff, duties) = setup().await;
        let staff_id = staff.create("Eleni", None).await.unwrap();
        duties.create(&duty_on("01/03/2025", staff_id)).await.unwrap();

        staff.delete(staff_id).await.unwrap();
        assert!(!staff.exists(staff_id).await.unwrap());

        let create = duties.create(&duty_on("02/03/2025", staff_id)).await.unwrap_err();
        assert!(matches!(create, DutyError::NotFound { entity: "staff", .. }));

        let history = duties.list_for_staff(staff_id, DutyOrder::Date).await.unwrap_err();
        assert!(matches!(history, DutyError::NotFound { entity: "staff", .. }));

        let second = staff.delete(staff_id).await.unwrap_err();
        assert!(matches!(second, DutyError::NotFound { entity: "staff", .. }));
        assert_eq!(count_rows(&pool, "duties").await, 0);
    }
}
