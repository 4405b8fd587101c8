//! Sample data for demos and local development.
//!
//! Seeding only runs against an empty `domains` table, so it is safe to call
//! on every start. Each phase commits on its own; a failure rolls back the
//! phase in flight and stops there.

use chrono::NaiveDate;
use migration::{Migrator, MigratorTrait};
use rust_decimal::Decimal;
use sea_orm::sea_query::{Query, SimpleExpr};
use sea_orm::{ConnectionTrait, DbErr, FromQueryResult, IdenStatic, TransactionTrait};
use thiserror::Error;
use tracing::{error, info};

use crate::accounts::{self, NewInvestor, NewStartup};
use crate::db::{self, Gateway, Params};
use crate::entities::{domain, funding, matches};
use crate::error::AppError;
use crate::ledger;
use crate::matching::PreferredDomains;

/// Every sample account logs in with this password.
pub const SAMPLE_PASSWORD: &str = "password123";

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("Could not connect to database: {0}")]
    Connect(#[source] DbErr),

    #[error("Migration failed: {0}")]
    Migration(#[source] DbErr),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Could not create sample account: {0}")]
    Account(#[from] AppError),

    #[error("Invalid sample data: {0}")]
    InvalidSample(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub domains: usize,
    pub startups: usize,
    pub investors: usize,
    pub funding: usize,
    pub matches: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    AlreadySeeded,
    Seeded(SeedSummary),
}

const DOMAINS: [&str; 8] = [
    "AI/ML",
    "FinTech",
    "HealthTech",
    "EdTech",
    "E-Commerce",
    "SaaS",
    "CleanTech",
    "FoodTech",
];

// Domain, startup and investor references below are 1-based positions in
// these tables, resolved to real ids as rows are inserted.

struct SampleStartup {
    name: &'static str,
    email: &'static str,
    domain: usize,
    funding_required: i64,
    description: &'static str,
    founded: (i32, u32, u32),
    location: &'static str,
    website: &'static str,
}

struct SampleInvestor {
    name: &'static str,
    email: &'static str,
    investment_min: i64,
    investment_max: i64,
    preferred_domains: &'static [usize],
    phone: &'static str,
    location: &'static str,
}

struct SampleFunding {
    investor: usize,
    startup: usize,
    amount: i64,
    date: (i32, u32, u32),
    round: &'static str,
    notes: &'static str,
}

struct SampleMatch {
    investor: usize,
    startup: usize,
    score: i32,
    reason: &'static str,
}

const STARTUPS: [SampleStartup; 8] = [
    SampleStartup {
        name: "AI Insights",
        email: "contact@aiinsights.com",
        domain: 1,
        funding_required: 5_000_000,
        description: "AI-powered business analytics platform",
        founded: (2024, 1, 15),
        location: "Bangalore",
        website: "https://aiinsights.com",
    },
    SampleStartup {
        name: "FinFlow",
        email: "hello@finflow.io",
        domain: 2,
        funding_required: 3_000_000,
        description: "Digital payment solutions for SMEs",
        founded: (2023, 8, 20),
        location: "Mumbai",
        website: "https://finflow.io",
    },
    SampleStartup {
        name: "MediCare AI",
        email: "info@medicareai.com",
        domain: 3,
        funding_required: 8_000_000,
        description: "AI-driven diagnostic tools",
        founded: (2024, 3, 10),
        location: "Hyderabad",
        website: "https://medicareai.com",
    },
    SampleStartup {
        name: "LearnHub",
        email: "team@learnhub.edu",
        domain: 4,
        funding_required: 2_000_000,
        description: "Personalized learning platform",
        founded: (2023, 11, 5),
        location: "Delhi",
        website: "https://learnhub.edu",
    },
    SampleStartup {
        name: "ShopEasy",
        email: "support@shopeasy.in",
        domain: 5,
        funding_required: 4_000_000,
        description: "Social commerce platform",
        founded: (2024, 2, 28),
        location: "Pune",
        website: "https://shopeasy.in",
    },
    SampleStartup {
        name: "CloudSync",
        email: "hello@cloudsync.io",
        domain: 6,
        funding_required: 6_000_000,
        description: "Enterprise cloud storage solution",
        founded: (2024, 4, 10),
        location: "Bangalore",
        website: "https://cloudsync.io",
    },
    SampleStartup {
        name: "GreenEnergy",
        email: "info@greenenergy.com",
        domain: 7,
        funding_required: 10_000_000,
        description: "Renewable energy management platform",
        founded: (2023, 12, 1),
        location: "Pune",
        website: "https://greenenergy.com",
    },
    SampleStartup {
        name: "FoodieHub",
        email: "contact@foodiehub.in",
        domain: 8,
        funding_required: 3_500_000,
        description: "Cloud kitchen and food delivery tech",
        founded: (2024, 5, 20),
        location: "Mumbai",
        website: "https://foodiehub.in",
    },
];

const INVESTORS: [SampleInvestor; 7] = [
    SampleInvestor {
        name: "Accel Partners",
        email: "invest@accel.com",
        investment_min: 2_000_000,
        investment_max: 10_000_000,
        preferred_domains: &[1, 2, 5],
        phone: "+91-9876543210",
        location: "Bangalore",
    },
    SampleInvestor {
        name: "Sequoia India",
        email: "deals@sequoia.in",
        investment_min: 5_000_000,
        investment_max: 20_000_000,
        preferred_domains: &[1, 3, 6],
        phone: "+91-9876543211",
        location: "Mumbai",
    },
    SampleInvestor {
        name: "Tiger Global",
        email: "info@tigerglobal.com",
        investment_min: 3_000_000,
        investment_max: 15_000_000,
        preferred_domains: &[2, 5, 8],
        phone: "+91-9876543212",
        location: "Bangalore",
    },
    SampleInvestor {
        name: "Kalaari Capital",
        email: "hello@kalaari.com",
        investment_min: 1_000_000,
        investment_max: 5_000_000,
        preferred_domains: &[1, 4],
        phone: "+91-9876543213",
        location: "Bangalore",
    },
    SampleInvestor {
        name: "Blume Ventures",
        email: "contact@blume.vc",
        investment_min: 1_500_000,
        investment_max: 8_000_000,
        preferred_domains: &[3, 4, 5],
        phone: "+91-9876543214",
        location: "Mumbai",
    },
    SampleInvestor {
        name: "Nexus Venture",
        email: "invest@nexus.com",
        investment_min: 4_000_000,
        investment_max: 12_000_000,
        preferred_domains: &[6, 7],
        phone: "+91-9876543215",
        location: "Delhi",
    },
    SampleInvestor {
        name: "Matrix Partners",
        email: "deals@matrix.in",
        investment_min: 2_500_000,
        investment_max: 9_000_000,
        preferred_domains: &[1, 2, 3],
        phone: "+91-9876543216",
        location: "Bangalore",
    },
];

const FUNDING: [SampleFunding; 7] = [
    SampleFunding {
        investor: 1,
        startup: 1,
        amount: 5_000_000,
        date: (2024, 6, 15),
        round: "Seed",
        notes: "Impressed by AI capabilities",
    },
    SampleFunding {
        investor: 2,
        startup: 3,
        amount: 8_000_000,
        date: (2024, 7, 20),
        round: "Series A",
        notes: "Strong healthcare market potential",
    },
    SampleFunding {
        investor: 3,
        startup: 2,
        amount: 3_000_000,
        date: (2024, 5, 10),
        round: "Seed",
        notes: "Innovative fintech solution",
    },
    SampleFunding {
        investor: 4,
        startup: 4,
        amount: 2_000_000,
        date: (2024, 8, 1),
        round: "Seed",
        notes: "EdTech space is growing",
    },
    SampleFunding {
        investor: 5,
        startup: 5,
        amount: 4_000_000,
        date: (2024, 9, 15),
        round: "Seed",
        notes: "Social commerce trend",
    },
    SampleFunding {
        investor: 6,
        startup: 6,
        amount: 6_000_000,
        date: (2024, 9, 25),
        round: "Series A",
        notes: "Enterprise SaaS has great potential",
    },
    SampleFunding {
        investor: 7,
        startup: 7,
        amount: 10_000_000,
        date: (2024, 10, 1),
        round: "Series A",
        notes: "Renewable energy is the future",
    },
];

const MATCHES: [SampleMatch; 7] = [
    SampleMatch {
        investor: 1,
        startup: 1,
        score: 95,
        reason: "Perfect domain match (AI) and investment range",
    },
    SampleMatch {
        investor: 2,
        startup: 1,
        score: 80,
        reason: "Domain match, investment range suitable",
    },
    SampleMatch {
        investor: 1,
        startup: 2,
        score: 70,
        reason: "Investment range good, partial domain match",
    },
    SampleMatch {
        investor: 3,
        startup: 2,
        score: 90,
        reason: "Excellent FinTech domain match",
    },
    SampleMatch {
        investor: 4,
        startup: 4,
        score: 85,
        reason: "EdTech specialization match",
    },
    SampleMatch {
        investor: 6,
        startup: 6,
        score: 88,
        reason: "SaaS expertise and good fit",
    },
    SampleMatch {
        investor: 7,
        startup: 7,
        score: 92,
        reason: "Clean tech specialization match",
    },
];

#[derive(Debug, FromQueryResult)]
struct RowCount {
    count: i64,
}

fn date((year, month, day): (i32, u32, u32)) -> Result<NaiveDate, SeedError> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| SeedError::InvalidSample(format!("{year}-{month}-{day} is not a date")))
}

/// Map a 1-based sample position to the id the database assigned.
fn resolve(ids: &[i32], position: usize, what: &str) -> Result<i32, SeedError> {
    position
        .checked_sub(1)
        .and_then(|index| ids.get(index))
        .copied()
        .ok_or_else(|| SeedError::InvalidSample(format!("no sample {what} at position {position}")))
}

/// Whether the sample data (or any real data) is already present.
pub async fn is_seeded<C>(conn: &C) -> Result<bool, DbErr>
where
    C: ConnectionTrait,
{
    let params = Params::new(db::backend_of(conn)?);
    let statement = params.into_statement("SELECT COUNT(*) AS count FROM domains".to_string());
    let row: Option<RowCount> = db::fetch_one(conn, statement).await?;
    Ok(row.map(|r| r.count > 0).unwrap_or(false))
}

async fn insert_domains<C>(conn: &C) -> Result<Vec<i32>, SeedError>
where
    C: ConnectionTrait,
{
    let mut ids = Vec::with_capacity(DOMAINS.len());
    for name in DOMAINS {
        let mut insert = Query::insert();
        insert
            .into_table(domain::Entity)
            .columns([domain::Column::DomainName])
            .values_panic([SimpleExpr::from(name)]);
        ids.push(db::insert_and_get_id(conn, insert, domain::Column::DomainId.as_str()).await?);
    }
    Ok(ids)
}

async fn insert_startups<C>(conn: &C, domain_ids: &[i32]) -> Result<Vec<i32>, SeedError>
where
    C: ConnectionTrait,
{
    let mut ids = Vec::with_capacity(STARTUPS.len());
    for sample in &STARTUPS {
        let new = NewStartup {
            name: sample.name.to_string(),
            email: sample.email.to_string(),
            password: SAMPLE_PASSWORD.to_string(),
            domain_id: resolve(domain_ids, sample.domain, "domain")?,
            funding_required: Decimal::from(sample.funding_required),
            description: Some(sample.description.to_string()),
            founded_date: Some(date(sample.founded)?),
            location: Some(sample.location.to_string()),
            website: Some(sample.website.to_string()),
        };
        ids.push(accounts::register_startup(conn, &new).await?);
    }
    Ok(ids)
}

async fn insert_investors<C>(conn: &C, domain_ids: &[i32]) -> Result<Vec<i32>, SeedError>
where
    C: ConnectionTrait,
{
    let mut ids = Vec::with_capacity(INVESTORS.len());
    for sample in &INVESTORS {
        let preferred = sample
            .preferred_domains
            .iter()
            .map(|&position| resolve(domain_ids, position, "domain"))
            .collect::<Result<Vec<_>, _>>()?;
        let new = NewInvestor {
            name: sample.name.to_string(),
            email: sample.email.to_string(),
            password: SAMPLE_PASSWORD.to_string(),
            investment_min: Decimal::from(sample.investment_min),
            investment_max: Decimal::from(sample.investment_max),
            preferred_domains: PreferredDomains::from(preferred),
            phone: Some(sample.phone.to_string()),
            location: Some(sample.location.to_string()),
        };
        ids.push(accounts::register_investor(conn, &new).await?);
    }
    Ok(ids)
}

async fn insert_funding<C>(
    conn: &C,
    investor_ids: &[i32],
    startup_ids: &[i32],
) -> Result<(), SeedError>
where
    C: ConnectionTrait,
{
    let mut insert = Query::insert();
    insert.into_table(funding::Entity).columns([
        funding::Column::InvestorId,
        funding::Column::StartupId,
        funding::Column::Amount,
        funding::Column::FundingDate,
        funding::Column::FundingRound,
        funding::Column::Notes,
    ]);
    for sample in &FUNDING {
        insert.values_panic([
            SimpleExpr::from(resolve(investor_ids, sample.investor, "investor")?),
            resolve(startup_ids, sample.startup, "startup")?.into(),
            Decimal::from(sample.amount).into(),
            date(sample.date)?.into(),
            sample.round.into(),
            sample.notes.into(),
        ]);
    }
    conn.execute(conn.get_database_backend().build(&insert)).await?;
    Ok(())
}

async fn insert_matches<C>(
    conn: &C,
    investor_ids: &[i32],
    startup_ids: &[i32],
) -> Result<(), SeedError>
where
    C: ConnectionTrait,
{
    let mut insert = Query::insert();
    insert.into_table(matches::Entity).columns([
        matches::Column::InvestorId,
        matches::Column::StartupId,
        matches::Column::MatchScore,
        matches::Column::MatchReason,
    ]);
    for sample in &MATCHES {
        insert.values_panic([
            SimpleExpr::from(resolve(investor_ids, sample.investor, "investor")?),
            resolve(startup_ids, sample.startup, "startup")?.into(),
            sample.score.into(),
            sample.reason.into(),
        ]);
    }
    conn.execute(conn.get_database_backend().build(&insert)).await?;
    Ok(())
}

/// Load the sample data set unless the database already holds domains.
pub async fn seed_database<C>(conn: &C) -> Result<SeedOutcome, SeedError>
where
    C: ConnectionTrait + TransactionTrait,
{
    if is_seeded(conn).await? {
        info!("Database already contains data, skipping seed");
        return Ok(SeedOutcome::AlreadySeeded);
    }
    info!("Seeding database with sample data");

    let txn = conn.begin().await?;
    let domain_ids = insert_domains(&txn).await?;
    txn.commit().await?;
    info!("Inserted {} domains", domain_ids.len());

    let txn = conn.begin().await?;
    let startup_ids = insert_startups(&txn, &domain_ids).await?;
    txn.commit().await?;
    info!("Inserted {} startups", startup_ids.len());

    let txn = conn.begin().await?;
    let investor_ids = insert_investors(&txn, &domain_ids).await?;
    txn.commit().await?;
    info!("Inserted {} investors", investor_ids.len());

    let txn = conn.begin().await?;
    insert_funding(&txn, &investor_ids, &startup_ids).await?;
    ledger::refresh_aggregates(&txn).await?;
    insert_matches(&txn, &investor_ids, &startup_ids).await?;
    txn.commit().await?;

    let summary = SeedSummary {
        domains: domain_ids.len(),
        startups: startup_ids.len(),
        investors: investor_ids.len(),
        funding: FUNDING.len(),
        matches: MATCHES.len(),
    };
    info!(
        "Database seeded: {} domains, {} startups, {} investors, {} funding records, {} matches",
        summary.domains, summary.startups, summary.investors, summary.funding, summary.matches
    );
    info!(
        "Sample logins use password '{}', e.g. {} (startup) and {} (investor)",
        SAMPLE_PASSWORD, STARTUPS[0].email, INVESTORS[0].email
    );
    Ok(SeedOutcome::Seeded(summary))
}

async fn migrate_and_seed(
    gateway: &Gateway,
    run_migrations: bool,
) -> Result<SeedOutcome, SeedError> {
    let conn = gateway.try_connect().await.map_err(SeedError::Connect)?;
    info!(backend = gateway.backend().name(), "Connected to database");

    if run_migrations {
        Migrator::up(&conn, None).await.map_err(SeedError::Migration)?;
        info!("Migrations applied");
    }

    seed_database(&conn).await
}

/// Apply pending migrations (unless `run_migrations` is false) and seed.
/// Failures are logged here as well as returned.
#[tracing::instrument(skip(gateway))]
pub async fn initialize_database(
    gateway: &Gateway,
    run_migrations: bool,
) -> Result<SeedOutcome, SeedError> {
    let outcome = migrate_and_seed(gateway, run_migrations).await;
    if let Err(e) = &outcome {
        error!("Could not seed database: {}", e);
    }
    outcome
}
