use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;
use fundmatch::db::Backend;
use fundmatch::matching::{
    investor_matches_statement, matched_investors, matched_startups, startup_matches_statement,
    InvestorCriteria, MatchScore, PreferredDomains, StartupCriteria, MATCH_LIMIT,
};
use rust_decimal::Decimal;
use sea_orm::{DatabaseBackend, MockDatabase, Value};

fn startup_criteria() -> StartupCriteria {
    StartupCriteria {
        domain_id: 3,
        funding_required: Decimal::from(5_000_000),
    }
}

fn investor_criteria() -> InvestorCriteria {
    InvestorCriteria {
        preferred_domains: "1,3,6".to_string(),
        investment_min: Decimal::from(1_000_000),
        investment_max: Decimal::from(8_000_000),
    }
}

#[test]
fn test_match_score_tiers() {
    assert_eq!(MatchScore::from_membership(true).value(), 100);
    assert_eq!(MatchScore::from_membership(false).value(), 50);
    assert_eq!(MatchScore::from_value(100), MatchScore::DomainMatch);
    assert_eq!(MatchScore::from_value(50), MatchScore::RangeCompatible);

    assert_eq!(MatchScore::DomainMatch.investor_reason(), "Perfect domain match");
    assert_eq!(
        MatchScore::RangeCompatible.investor_reason(),
        "Investment range compatible"
    );
    assert_eq!(MatchScore::DomainMatch.startup_reason(), "Preferred domain");
    assert_eq!(
        MatchScore::RangeCompatible.startup_reason(),
        "Within investment range"
    );
}

#[test]
fn test_preferred_domains_parsing() {
    let domains = PreferredDomains::parse(" 1, 2,5 ,2").unwrap();
    assert_eq!(domains.ids(), &[1, 2, 5]);
    assert!(domains.contains(5));
    assert!(!domains.contains(3));
    assert_eq!(domains.to_string(), "1,2,5");

    assert_eq!(PreferredDomains::from_str("7").unwrap().ids(), &[7]);
    assert!(PreferredDomains::parse("").is_err());
    assert!(PreferredDomains::parse("1,,2").is_err());
    assert!(PreferredDomains::parse("fintech").is_err());
}

#[test]
fn test_preferred_domains_from_ids() {
    let domains = PreferredDomains::from(vec![4, 1, 4]);
    assert_eq!(domains.ids(), &[4, 1]);
    assert_eq!(domains.to_string(), "4,1");
}

#[test]
fn test_investor_statement_mysql() {
    let statement = investor_matches_statement(Backend::MySql, &startup_criteria());

    assert!(statement
        .sql
        .contains("FIND_IN_SET(?, REPLACE(i.preferred_domains, ' ', '')) > 0"));
    assert!(statement
        .sql
        .contains("i.investment_min <= ? AND i.investment_max >= ?"));
    assert!(statement
        .sql
        .contains("ORDER BY match_score DESC, i.portfolio_size ASC, i.investor_id ASC"));
    assert!(statement.sql.ends_with(&format!("LIMIT {MATCH_LIMIT}")));

    let values = statement.values.unwrap().0;
    assert_eq!(
        values,
        vec![
            Value::from("3".to_string()),
            Value::from(Decimal::from(5_000_000)),
            Value::from(Decimal::from(5_000_000)),
        ]
    );
}

#[test]
fn test_investor_statement_postgres() {
    let statement = investor_matches_statement(Backend::Postgres, &startup_criteria());

    assert!(statement
        .sql
        .contains("$1 = ANY(string_to_array(REPLACE(i.preferred_domains, ' ', ''), ','))"));
    assert!(statement.sql.contains("AS BIGINT"));
    assert!(statement
        .sql
        .contains("i.investment_min <= $2 AND i.investment_max >= $3"));
    assert!(!statement.sql.contains("FIND_IN_SET"));
}

#[test]
fn test_startup_statement_filters_funded() {
    for backend in [Backend::MySql, Backend::Postgres] {
        let statement = startup_matches_statement(backend, &investor_criteria());

        assert!(statement.sql.contains("s.is_funded = FALSE"));
        assert!(statement.sql.contains("JOIN domains d ON s.domain_id = d.domain_id"));

        let values = statement.values.unwrap().0;
        assert_eq!(values[0], Value::from("1,3,6".to_string()));
        assert_eq!(values[1], Value::from(Decimal::from(1_000_000)));
        assert_eq!(values[2], Value::from(Decimal::from(8_000_000)));
    }

    let mysql = startup_matches_statement(Backend::MySql, &investor_criteria());
    assert!(mysql
        .sql
        .contains("FIND_IN_SET(CAST(s.domain_id AS CHAR), REPLACE(?, ' ', '')) > 0"));
    assert!(mysql.sql.contains("BETWEEN ? AND ?"));

    let postgres = startup_matches_statement(Backend::Postgres, &investor_criteria());
    assert!(postgres
        .sql
        .contains("CAST(s.domain_id AS TEXT) = ANY(string_to_array(REPLACE($1, ' ', ''), ','))"));
    assert!(postgres.sql.contains("BETWEEN $2 AND $3"));
}

#[tokio::test]
async fn test_matched_investors_reads_rows() {
    let row = |id: i32, name: &str, score: i64| {
        BTreeMap::from([
            ("investor_id", Value::from(id)),
            ("name", Value::from(name.to_string())),
            ("investment_min", Value::from(Decimal::from(1_000_000))),
            ("investment_max", Value::from(Decimal::from(10_000_000))),
            ("preferred_domains", Value::from("1,3".to_string())),
            ("location", Value::from(Some("Pune".to_string()))),
            ("portfolio_size", Value::from(2i32)),
            ("match_score", Value::from(score)),
        ])
    };
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![row(4, "Kalaari Capital", 100), row(1, "Accel Partners", 50)]])
        .into_connection();

    let matches = matched_investors(&db, &startup_criteria()).await.unwrap();

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].name, "Kalaari Capital");
    assert_eq!(matches[0].score(), MatchScore::DomainMatch);
    assert_eq!(matches[0].match_reason(), "Perfect domain match");
    assert_eq!(matches[1].match_reason(), "Investment range compatible");
}

#[test]
fn test_undated_startups_rank_after_dated_ones() {
    for backend in [Backend::MySql, Backend::Postgres] {
        let statement = startup_matches_statement(backend, &investor_criteria());

        assert!(statement.sql.contains(
            "ORDER BY match_score DESC, s.founded_date IS NULL, s.founded_date DESC, \
             s.startup_id ASC"
        ));
        assert!(statement.sql.ends_with(&format!("LIMIT {MATCH_LIMIT}")));
    }
}

#[test]
fn test_membership_ignores_spaces_on_both_backends() {
    let mysql = investor_matches_statement(Backend::MySql, &startup_criteria());
    let postgres = investor_matches_statement(Backend::Postgres, &startup_criteria());

    assert!(mysql.sql.contains("REPLACE(i.preferred_domains, ' ', '')"));
    assert!(postgres.sql.contains("REPLACE(i.preferred_domains, ' ', '')"));
}

#[tokio::test]
async fn test_matched_startups_reads_rows() {
    let row = |id: i32, name: &str, founded: Option<NaiveDate>, score: i64| {
        BTreeMap::from([
            ("startup_id", Value::from(id)),
            ("name", Value::from(name.to_string())),
            ("domain_name", Value::from("FoodTech".to_string())),
            ("funding_required", Value::from(Decimal::from(3_500_000))),
            ("location", Value::from(Some("Mumbai".to_string()))),
            ("description", Value::from(Option::<String>::None)),
            ("founded_date", Value::from(founded)),
            ("is_funded", Value::from(false)),
            ("match_score", Value::from(score)),
        ])
    };
    let db = MockDatabase::new(DatabaseBackend::MySql)
        .append_query_results([vec![
            row(8, "FoodieHub", NaiveDate::from_ymd_opt(2024, 5, 20), 100),
            row(9, "Undated", None, 50),
        ]])
        .into_connection();

    let matches = matched_startups(&db, &investor_criteria()).await.unwrap();

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].name, "FoodieHub");
    assert_eq!(matches[0].founded_date, NaiveDate::from_ymd_opt(2024, 5, 20));
    assert_eq!(matches[0].match_reason(), "Preferred domain");
    assert_eq!(matches[1].founded_date, None);
    assert!(!matches[1].is_funded);
    assert_eq!(matches[1].match_reason(), "Within investment range");
}
