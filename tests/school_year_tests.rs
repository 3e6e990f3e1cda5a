//! School year repository tests: the date-range invariant, merge semantics,
//! soft delete, and default ordering.

use anyhow::Result;
use backoffice::error::CoreError;
use backoffice::models::SchoolYear;
use backoffice::models::school_year::STATUS_DELETED;
use backoffice::repositories::{
    CreateSchoolYear, SchoolYearFilter, SchoolYearRepository, UpdateSchoolYear,
};
use chrono::NaiveDate;
use sea_orm::EntityTrait;

#[path = "test_utils/mod.rs"]
mod test_utils;
use test_utils::{create_company, setup_test_db, window};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn year(title: &str, start: NaiveDate, end: NaiveDate) -> CreateSchoolYear {
    CreateSchoolYear {
        title: title.to_string(),
        start_date: start,
        end_date: end,
        status: None,
    }
}

#[tokio::test]
async fn create_rejects_inverted_date_ranges_without_writing() -> Result<()> {
    let db = setup_test_db().await?;
    let company_id = create_company(&db, "Acme School").await?;

    let repo = SchoolYearRepository::new(&db);
    let err = repo
        .create(
            year("2024", date(2024, 9, 1), date(2024, 6, 1)),
            company_id,
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));
    assert!(
        err.to_string()
            .contains("end_date must be greater than start_date")
    );

    // Nothing was persisted.
    let page = repo
        .list(SchoolYearFilter::default(), &window(1, 25), company_id)
        .await?;
    assert_eq!(page.meta.total, 0);
    Ok(())
}

#[tokio::test]
async fn create_returns_the_company_relation_and_defaults() -> Result<()> {
    let db = setup_test_db().await?;
    let company_id = create_company(&db, "Acme School").await?;

    let repo = SchoolYearRepository::new(&db);
    let (created, loaded_company) = repo
        .create(
            year("2026/2027", date(2026, 9, 1), date(2027, 6, 30)),
            company_id,
        )
        .await?;

    assert_eq!(created.status, 1);
    assert_eq!(created.company_id, company_id);
    assert_eq!(loaded_company.map(|c| c.id), Some(company_id));
    Ok(())
}

#[tokio::test]
async fn update_checks_the_invariant_against_merged_values() -> Result<()> {
    let db = setup_test_db().await?;
    let company_id = create_company(&db, "Acme School").await?;

    let repo = SchoolYearRepository::new(&db);
    let (created, _) = repo
        .create(
            year("2026/2027", date(2026, 9, 1), date(2027, 6, 30)),
            company_id,
        )
        .await?;

    // Only end_date is sent, but the merged pair (stored start, new end) is
    // what must satisfy the invariant.
    let err = repo
        .update(
            created.id,
            company_id,
            UpdateSchoolYear {
                end_date: Some(date(2026, 8, 1)),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, CoreError::Validation(_)));

    // A consistent payload passes and absent fields retain their values.
    let (updated, _) = repo
        .update(
            created.id,
            company_id,
            UpdateSchoolYear {
                end_date: Some(date(2027, 7, 15)),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.title, "2026/2027");
    assert_eq!(updated.start_date, date(2026, 9, 1));
    assert_eq!(updated.end_date, date(2027, 7, 15));
    Ok(())
}

#[tokio::test]
async fn soft_delete_hides_the_row_and_keeps_it_in_the_store() -> Result<()> {
    let db = setup_test_db().await?;
    let company_id = create_company(&db, "Acme School").await?;

    let repo = SchoolYearRepository::new(&db);
    let (created, _) = repo
        .create(
            year("2026/2027", date(2026, 9, 1), date(2027, 6, 30)),
            company_id,
        )
        .await?;

    repo.remove(created.id, company_id).await?;

    let err = repo.get(created.id, company_id).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));

    let raw = SchoolYear::find_by_id(created.id).one(&db).await?;
    assert_eq!(raw.map(|r| r.status), Some(STATUS_DELETED));

    // A second remove finds nothing.
    let err = repo.remove(created.id, company_id).await.unwrap_err();
    assert!(matches!(err, CoreError::NotFound { .. }));
    Ok(())
}

#[tokio::test]
async fn list_orders_by_id_descending_and_searches_titles() -> Result<()> {
    let db = setup_test_db().await?;
    let company_id = create_company(&db, "Acme School").await?;

    let repo = SchoolYearRepository::new(&db);
    let (y1, _) = repo
        .create(
            year("2024/2025", date(2024, 9, 1), date(2025, 6, 30)),
            company_id,
        )
        .await?;
    let (y2, _) = repo
        .create(
            year("2025/2026", date(2025, 9, 1), date(2026, 6, 30)),
            company_id,
        )
        .await?;
    let (y3, _) = repo
        .create(
            year("2026/2027", date(2026, 9, 1), date(2027, 6, 30)),
            company_id,
        )
        .await?;

    let page = repo
        .list(SchoolYearFilter::default(), &window(1, 25), company_id)
        .await?;
    let ids: Vec<i32> = page.data.iter().map(|(m, _)| m.id).collect();
    assert_eq!(ids, vec![y3.id, y2.id, y1.id]);

    let page = repo
        .list(
            SchoolYearFilter {
                search: Some("2025".to_string()),
                ..Default::default()
            },
            &window(1, 25),
            company_id,
        )
        .await?;
    assert_eq!(page.meta.total, 2);
    Ok(())
}
