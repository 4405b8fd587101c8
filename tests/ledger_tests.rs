use std::collections::BTreeMap;

use chrono::NaiveDate;
use fundmatch::ledger::{investor_profile, portfolio, refresh_aggregates, startup_profile};
use rust_decimal::Decimal;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult, Transaction, Value};

#[tokio::test]
async fn test_startup_profile_missing() {
    let db = MockDatabase::new(DatabaseBackend::MySql)
        .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
        .into_connection();

    assert_eq!(startup_profile(&db, 99).await.unwrap(), None);
}

#[tokio::test]
async fn test_startup_profile_includes_total_funding() {
    let row = BTreeMap::from([
        ("startup_id", Value::from(1i32)),
        ("name", Value::from("AI Insights".to_string())),
        ("email", Value::from("contact@aiinsights.com".to_string())),
        ("domain_id", Value::from(1i32)),
        ("domain_name", Value::from("AI/ML".to_string())),
        ("funding_required", Value::from(Decimal::from(5_000_000))),
        ("description", Value::from(Option::<String>::None)),
        ("founded_date", Value::from(NaiveDate::from_ymd_opt(2024, 1, 15))),
        ("location", Value::from(Some("Bangalore".to_string()))),
        ("website", Value::from(Option::<String>::None)),
        ("is_funded", Value::from(true)),
        ("total_funding_received", Value::from(Decimal::from(5_000_000))),
    ]);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row]])
        .into_connection();

    let profile = startup_profile(&db, 1).await.unwrap().unwrap();

    assert_eq!(profile.domain_name, "AI/ML");
    assert!(profile.is_funded);
    assert_eq!(profile.total_funding_received, Decimal::from(5_000_000));
    assert_eq!(profile.criteria().domain_id, 1);
    assert_eq!(profile.criteria().funding_required, Decimal::from(5_000_000));
}

#[tokio::test]
async fn test_investor_profile_includes_portfolio_totals() {
    let row = BTreeMap::from([
        ("investor_id", Value::from(2i32)),
        ("name", Value::from("Sequoia Capital India".to_string())),
        ("email", Value::from("india@sequoiacap.com".to_string())),
        ("investment_min", Value::from(Decimal::from(1_000_000))),
        ("investment_max", Value::from(Decimal::from(20_000_000))),
        ("preferred_domains", Value::from("1, 2,4".to_string())),
        ("phone", Value::from(Option::<String>::None)),
        ("location", Value::from(Some("Bangalore".to_string()))),
        ("portfolio_size", Value::from(2i32)),
        ("total_invested", Value::from(Decimal::from(8_000_000))),
        ("startups_funded", Value::from(2i64)),
    ]);
    let db = MockDatabase::new(DatabaseBackend::MySql)
        .append_query_results([vec![row]])
        .into_connection();

    let profile = investor_profile(&db, 2).await.unwrap().unwrap();

    assert_eq!(profile.name, "Sequoia Capital India");
    assert_eq!(profile.phone, None);
    assert_eq!(profile.total_invested, Decimal::from(8_000_000));
    assert_eq!(profile.startups_funded, 2);

    let criteria = profile.criteria();
    assert_eq!(criteria.preferred_domains, "1, 2,4");
    assert_eq!(criteria.investment_min, Decimal::from(1_000_000));
    assert_eq!(criteria.investment_max, Decimal::from(20_000_000));
}

#[tokio::test]
async fn test_investor_profile_missing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<BTreeMap<&str, Value>>::new()])
        .into_connection();

    assert_eq!(investor_profile(&db, 42).await.unwrap(), None);
}

#[tokio::test]
async fn test_portfolio_reads_entries() {
    let entry = |funding_id: i32, startup: &str, day: u32, round: Option<&str>| {
        BTreeMap::from([
            ("funding_id", Value::from(funding_id)),
            ("startup_id", Value::from(funding_id + 10)),
            ("startup_name", Value::from(startup.to_string())),
            ("domain_name", Value::from("FinTech".to_string())),
            ("amount", Value::from(Decimal::from(3_000_000))),
            ("funding_date", Value::from(NaiveDate::from_ymd_opt(2024, 3, day))),
            ("funding_round", Value::from(round.map(str::to_string))),
            ("notes", Value::from(Option::<String>::None)),
        ])
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![
            entry(5, "PayEasy", 20, Some("Series A")),
            entry(3, "LendWise", 1, None),
        ]])
        .into_connection();

    let entries = portfolio(&db, 2).await.unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].startup_name, "PayEasy");
    assert_eq!(entries[0].startup_id, 15);
    assert_eq!(entries[0].funding_round.as_deref(), Some("Series A"));
    assert_eq!(entries[1].funding_date, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
    assert_eq!(entries[1].funding_round, None);

    let log = db.into_transaction_log();
    assert_eq!(log.len(), 1);
    let sql = log[0].statements()[0].sql.clone();
    assert!(sql.contains("WHERE f.investor_id = $1"));
    assert!(sql.ends_with("ORDER BY f.funding_date DESC, f.funding_id DESC"));
}

#[tokio::test]
async fn test_refresh_aggregates_updates_both_tables() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 8,
            },
            MockExecResult {
                last_insert_id: 0,
                rows_affected: 7,
            },
        ])
        .into_connection();

    refresh_aggregates(&db).await.unwrap();

    let no_values: Vec<Value> = Vec::new();
    assert_eq!(
        db.into_transaction_log(),
        vec![
            Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                "UPDATE startups SET is_funded = EXISTS \
                 (SELECT 1 FROM funding f WHERE f.startup_id = startups.startup_id)",
                no_values.clone(),
            ),
            Transaction::from_sql_and_values(
                DatabaseBackend::Postgres,
                "UPDATE investors SET portfolio_size = \
                 (SELECT COUNT(*) FROM funding f WHERE f.investor_id = investors.investor_id)",
                no_values,
            ),
        ]
    );
}
