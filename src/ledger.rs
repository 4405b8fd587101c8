//! Funding ledger reads for the dashboards, and the refresh of the derived
//! `is_funded` / `portfolio_size` columns.
//!
//! Totals use correlated sub-queries so one statement works on both backends.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DbErr, FromQueryResult};
use tracing::info;

use crate::db::{self, Params};
use crate::matching::{InvestorCriteria, StartupCriteria};

#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct StartupProfile {
    pub startup_id: i32,
    pub name: String,
    pub email: String,
    pub domain_id: i32,
    pub domain_name: String,
    pub funding_required: Decimal,
    pub description: Option<String>,
    pub founded_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub is_funded: bool,
    pub total_funding_received: Decimal,
}

impl StartupProfile {
    pub fn criteria(&self) -> StartupCriteria {
        StartupCriteria {
            domain_id: self.domain_id,
            funding_required: self.funding_required,
        }
    }
}

#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct InvestorProfile {
    pub investor_id: i32,
    pub name: String,
    pub email: String,
    pub investment_min: Decimal,
    pub investment_max: Decimal,
    pub preferred_domains: String,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub portfolio_size: i32,
    pub total_invested: Decimal,
    pub startups_funded: i64,
}

impl InvestorProfile {
    pub fn criteria(&self) -> InvestorCriteria {
        InvestorCriteria {
            preferred_domains: self.preferred_domains.clone(),
            investment_min: self.investment_min,
            investment_max: self.investment_max,
        }
    }
}

/// A funding round as seen by the startup that received it.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct FundingRecord {
    pub funding_id: i32,
    pub investor_id: i32,
    pub investor_name: String,
    pub amount: Decimal,
    pub funding_date: NaiveDate,
    pub funding_round: Option<String>,
    pub notes: Option<String>,
}

/// A funding round as seen by the investor that made it.
#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct PortfolioEntry {
    pub funding_id: i32,
    pub startup_id: i32,
    pub startup_name: String,
    pub domain_name: String,
    pub amount: Decimal,
    pub funding_date: NaiveDate,
    pub funding_round: Option<String>,
    pub notes: Option<String>,
}

#[tracing::instrument(skip(conn))]
pub async fn startup_profile<C>(conn: &C, startup_id: i32) -> Result<Option<StartupProfile>, DbErr>
where
    C: ConnectionTrait,
{
    let mut params = Params::new(db::backend_of(conn)?);
    let id = params.bind(startup_id);
    let sql = format!(
        "SELECT s.startup_id, s.name, s.email, s.domain_id, d.domain_name, \
                s.funding_required, s.description, s.founded_date, s.location, \
                s.website, s.is_funded, \
                COALESCE((SELECT SUM(f.amount) FROM funding f \
                          WHERE f.startup_id = s.startup_id), 0) AS total_funding_received \
         FROM startups s \
         JOIN domains d ON s.domain_id = d.domain_id \
         WHERE s.startup_id = {id}"
    );
    db::fetch_one(conn, params.into_statement(sql)).await
}

#[tracing::instrument(skip(conn))]
pub async fn funding_history<C>(conn: &C, startup_id: i32) -> Result<Vec<FundingRecord>, DbErr>
where
    C: ConnectionTrait,
{
    let mut params = Params::new(db::backend_of(conn)?);
    let id = params.bind(startup_id);
    let sql = format!(
        "SELECT f.funding_id, f.investor_id, i.name AS investor_name, f.amount, \
                f.funding_date, f.funding_round, f.notes \
         FROM funding f \
         JOIN investors i ON f.investor_id = i.investor_id \
         WHERE f.startup_id = {id} \
         ORDER BY f.funding_date DESC, f.funding_id DESC"
    );
    db::fetch_all(conn, params.into_statement(sql)).await
}

#[tracing::instrument(skip(conn))]
pub async fn investor_profile<C>(conn: &C, investor_id: i32) -> Result<Option<InvestorProfile>, DbErr>
where
    C: ConnectionTrait,
{
    let mut params = Params::new(db::backend_of(conn)?);
    let id = params.bind(investor_id);
    let sql = format!(
        "SELECT i.investor_id, i.name, i.email, i.investment_min, i.investment_max, \
                i.preferred_domains, i.phone, i.location, i.portfolio_size, \
                COALESCE((SELECT SUM(f.amount) FROM funding f \
                          WHERE f.investor_id = i.investor_id), 0) AS total_invested, \
                (SELECT COUNT(DISTINCT f.startup_id) FROM funding f \
                 WHERE f.investor_id = i.investor_id) AS startups_funded \
         FROM investors i \
         WHERE i.investor_id = {id}"
    );
    db::fetch_one(conn, params.into_statement(sql)).await
}

#[tracing::instrument(skip(conn))]
pub async fn portfolio<C>(conn: &C, investor_id: i32) -> Result<Vec<PortfolioEntry>, DbErr>
where
    C: ConnectionTrait,
{
    let mut params = Params::new(db::backend_of(conn)?);
    let id = params.bind(investor_id);
    let sql = format!(
        "SELECT f.funding_id, f.startup_id, s.name AS startup_name, d.domain_name, \
                f.amount, f.funding_date, f.funding_round, f.notes \
         FROM funding f \
         JOIN startups s ON f.startup_id = s.startup_id \
         JOIN domains d ON s.domain_id = d.domain_id \
         WHERE f.investor_id = {id} \
         ORDER BY f.funding_date DESC, f.funding_id DESC"
    );
    db::fetch_all(conn, params.into_statement(sql)).await
}

/// Recompute `startups.is_funded` and `investors.portfolio_size` from the
/// funding rows. Nothing else keeps them in step with the ledger.
pub async fn refresh_aggregates<C>(conn: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let params = Params::new(db::backend_of(conn)?);
    let funded = conn
        .execute(params.into_statement(
            "UPDATE startups SET is_funded = EXISTS \
             (SELECT 1 FROM funding f WHERE f.startup_id = startups.startup_id)"
                .to_string(),
        ))
        .await?;

    let params = Params::new(db::backend_of(conn)?);
    let portfolios = conn
        .execute(params.into_statement(
            "UPDATE investors SET portfolio_size = \
             (SELECT COUNT(*) FROM funding f WHERE f.investor_id = investors.investor_id)"
                .to_string(),
        ))
        .await?;

    info!(
        "Refreshed funding aggregates: {} startups, {} investors",
        funded.rows_affected(),
        portfolios.rows_affected()
    );
    Ok(())
}
