//! Registration and authentication for both account kinds.

use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sea_orm::sea_query::{Query, SimpleExpr};
use sea_orm::{
    ColumnTrait, ConnectionTrait, DbErr, EntityTrait, IdenStatic, QueryFilter, QueryOrder, SqlErr,
};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::auth;
use crate::db;
use crate::entities::{domain, investor, startup};
use crate::error::AppError;
use crate::matching::PreferredDomains;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Startup,
    Investor,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Startup => "startup",
            Role::Investor => "investor",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Role::Startup => "Startup",
            Role::Investor => "Investor",
        }
    }

    pub fn login_path(self) -> &'static str {
        match self {
            Role::Startup => "/startup/login",
            Role::Investor => "/investor/login",
        }
    }

    pub fn register_path(self) -> &'static str {
        match self {
            Role::Startup => "/startup/register",
            Role::Investor => "/investor/register",
        }
    }

    pub fn dashboard_path(self) -> &'static str {
        match self {
            Role::Startup => "/startup/dashboard",
            Role::Investor => "/investor/dashboard",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStartup {
    pub name: String,
    pub email: String,
    pub password: String,
    pub domain_id: i32,
    pub funding_required: Decimal,
    pub description: Option<String>,
    pub founded_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub website: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewInvestor {
    pub name: String,
    pub email: String,
    pub password: String,
    pub investment_min: Decimal,
    pub investment_max: Decimal,
    pub preferred_domains: PreferredDomains,
    pub phone: Option<String>,
    pub location: Option<String>,
}

/// Who a successful login belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub role: Role,
    pub id: i32,
    pub name: String,
}

pub async fn list_domains<C>(conn: &C) -> Result<Vec<domain::Model>, DbErr>
where
    C: ConnectionTrait,
{
    domain::Entity::find()
        .order_by_asc(domain::Column::DomainId)
        .all(conn)
        .await
}

fn registration_error(e: DbErr) -> AppError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            warn!("Duplicate registration rejected: {}", detail);
            AppError::DuplicateEmail
        }
        _ => AppError::Database(e),
    }
}

#[tracing::instrument(skip(conn, new), fields(email = %new.email))]
pub async fn register_startup<C>(conn: &C, new: &NewStartup) -> Result<i32, AppError>
where
    C: ConnectionTrait,
{
    let password_hash = auth::hash(&new.password)?;

    let mut insert = Query::insert();
    insert
        .into_table(startup::Entity)
        .columns([
            startup::Column::Name,
            startup::Column::Email,
            startup::Column::PasswordHash,
            startup::Column::DomainId,
            startup::Column::FundingRequired,
            startup::Column::Description,
            startup::Column::FoundedDate,
            startup::Column::Location,
            startup::Column::Website,
        ])
        .values_panic([
            SimpleExpr::from(new.name.clone()),
            new.email.clone().into(),
            password_hash.into(),
            new.domain_id.into(),
            new.funding_required.into(),
            new.description.clone().into(),
            new.founded_date.into(),
            new.location.clone().into(),
            new.website.clone().into(),
        ]);

    let id = db::insert_and_get_id(conn, insert, startup::Column::StartupId.as_str())
        .await
        .map_err(registration_error)?;
    info!(startup_id = id, "Registered startup");
    Ok(id)
}

#[tracing::instrument(skip(conn, new), fields(email = %new.email))]
pub async fn register_investor<C>(conn: &C, new: &NewInvestor) -> Result<i32, AppError>
where
    C: ConnectionTrait,
{
    let password_hash = auth::hash(&new.password)?;

    let mut insert = Query::insert();
    insert
        .into_table(investor::Entity)
        .columns([
            investor::Column::Name,
            investor::Column::Email,
            investor::Column::PasswordHash,
            investor::Column::InvestmentMin,
            investor::Column::InvestmentMax,
            investor::Column::PreferredDomains,
            investor::Column::Phone,
            investor::Column::Location,
        ])
        .values_panic([
            SimpleExpr::from(new.name.clone()),
            new.email.clone().into(),
            password_hash.into(),
            new.investment_min.into(),
            new.investment_max.into(),
            new.preferred_domains.to_string().into(),
            new.phone.clone().into(),
            new.location.clone().into(),
        ]);

    let id = db::insert_and_get_id(conn, insert, investor::Column::InvestorId.as_str())
        .await
        .map_err(registration_error)?;
    info!(investor_id = id, "Registered investor");
    Ok(id)
}

/// Look up `email` in the role's table and check the password.
///
/// Unknown email and wrong password are indistinguishable to the caller.
#[tracing::instrument(skip(conn, password), fields(role = %role))]
pub async fn authenticate<C>(
    conn: &C,
    role: Role,
    email: &str,
    password: &str,
) -> Result<AuthenticatedUser, AppError>
where
    C: ConnectionTrait,
{
    let email = email.trim().to_lowercase();
    let found = match role {
        Role::Startup => startup::Entity::find()
            .filter(startup::Column::Email.eq(email.as_str()))
            .one(conn)
            .await?
            .map(|s| (s.startup_id, s.name, s.password_hash)),
        Role::Investor => investor::Entity::find()
            .filter(investor::Column::Email.eq(email.as_str()))
            .one(conn)
            .await?
            .map(|i| (i.investor_id, i.name, i.password_hash)),
    };

    match found {
        Some((id, name, password_hash)) if auth::verify(password, &password_hash) => {
            info!(user_id = id, "Login succeeded");
            Ok(AuthenticatedUser { role, id, name })
        }
        _ => {
            info!("Login rejected");
            Err(AppError::InvalidCredentials)
        }
    }
}
