//! Dashboard matchmaking.
//!
//! Both directions use the same two-tier score: 100 when the startup's domain
//! is in the investor's preferred list, 50 when only the amount range fits.
//! Rows outside the investor's `[investment_min, investment_max]` range never
//! match.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use sea_orm::{ConnectionTrait, DbErr, FromQueryResult, Statement};

use crate::db::{self, Backend, Params};

/// Upper bound on rows shown per dashboard.
pub const MATCH_LIMIT: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchScore {
    DomainMatch,
    RangeCompatible,
}

impl MatchScore {
    pub fn from_membership(in_preferred_domains: bool) -> Self {
        if in_preferred_domains {
            MatchScore::DomainMatch
        } else {
            MatchScore::RangeCompatible
        }
    }

    pub fn from_value(value: i64) -> Self {
        Self::from_membership(value >= MatchScore::DomainMatch.value())
    }

    pub fn value(self) -> i64 {
        match self {
            MatchScore::DomainMatch => 100,
            MatchScore::RangeCompatible => 50,
        }
    }

    /// Why an investor was suggested to a startup.
    pub fn investor_reason(self) -> &'static str {
        match self {
            MatchScore::DomainMatch => "Perfect domain match",
            MatchScore::RangeCompatible => "Investment range compatible",
        }
    }

    /// Why a startup was suggested to an investor.
    pub fn startup_reason(self) -> &'static str {
        match self {
            MatchScore::DomainMatch => "Preferred domain",
            MatchScore::RangeCompatible => "Within investment range",
        }
    }
}

static PREFERRED_DOMAINS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\d+\s*(,\s*\d+\s*)*$").expect("valid regex"));

/// An investor's comma-separated list of preferred domain ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreferredDomains(Vec<i32>);

impl PreferredDomains {
    /// Parse `"1, 2,5"`-style input. Duplicates are dropped, order is kept.
    pub fn parse(raw: &str) -> Result<Self, String> {
        if !PREFERRED_DOMAINS_RE.is_match(raw) {
            return Err(format!(
                "preferred domains must be comma-separated domain ids, got '{}'",
                raw.trim()
            ));
        }

        let mut ids: Vec<i32> = Vec::new();
        for part in raw.split(',') {
            let id: i32 = part
                .trim()
                .parse()
                .map_err(|e| format!("invalid domain id '{}': {}", part.trim(), e))?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(Self(ids))
    }

    pub fn contains(&self, domain_id: i32) -> bool {
        self.0.contains(&domain_id)
    }

    pub fn ids(&self) -> &[i32] {
        &self.0
    }
}

impl From<Vec<i32>> for PreferredDomains {
    fn from(ids: Vec<i32>) -> Self {
        let mut unique = Vec::with_capacity(ids.len());
        for id in ids {
            if !unique.contains(&id) {
                unique.push(id);
            }
        }
        Self(unique)
    }
}

impl FromStr for PreferredDomains {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PreferredDomains {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");
        f.write_str(&joined)
    }
}

/// What the startup dashboard matches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartupCriteria {
    pub domain_id: i32,
    pub funding_required: Decimal,
}

/// What the investor dashboard matches on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvestorCriteria {
    pub preferred_domains: String,
    pub investment_min: Decimal,
    pub investment_max: Decimal,
}

#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct InvestorMatch {
    pub investor_id: i32,
    pub name: String,
    pub investment_min: Decimal,
    pub investment_max: Decimal,
    pub preferred_domains: String,
    pub location: Option<String>,
    pub portfolio_size: i32,
    pub match_score: i64,
}

impl InvestorMatch {
    pub fn score(&self) -> MatchScore {
        MatchScore::from_value(self.match_score)
    }

    pub fn match_reason(&self) -> &'static str {
        self.score().investor_reason()
    }
}

#[derive(Debug, Clone, PartialEq, FromQueryResult)]
pub struct StartupMatch {
    pub startup_id: i32,
    pub name: String,
    pub domain_name: String,
    pub funding_required: Decimal,
    pub location: Option<String>,
    pub description: Option<String>,
    pub founded_date: Option<NaiveDate>,
    pub is_funded: bool,
    pub match_score: i64,
}

impl StartupMatch {
    pub fn score(&self) -> MatchScore {
        MatchScore::from_value(self.match_score)
    }

    pub fn match_reason(&self) -> &'static str {
        self.score().startup_reason()
    }
}

/// SQL predicate: is `needle` one of the ids in the comma-separated `list`?
/// Spaces in `list` are ignored on both backends.
fn domain_membership(backend: Backend, needle: &str, list: &str) -> String {
    let list = format!("REPLACE({list}, ' ', '')");
    match backend {
        Backend::MySql => format!("FIND_IN_SET({needle}, {list}) > 0"),
        Backend::Postgres => format!("{needle} = ANY(string_to_array({list}, ','))"),
    }
}

fn score_expression(backend: Backend, membership: &str) -> String {
    let integer_type = match backend {
        Backend::MySql => "SIGNED",
        Backend::Postgres => "BIGINT",
    };
    format!(
        "CAST(CASE WHEN {membership} THEN {} ELSE {} END AS {integer_type})",
        MatchScore::DomainMatch.value(),
        MatchScore::RangeCompatible.value(),
    )
}

fn text_cast(backend: Backend, column: &str) -> String {
    match backend {
        Backend::MySql => format!("CAST({column} AS CHAR)"),
        Backend::Postgres => format!("CAST({column} AS TEXT)"),
    }
}

/// Investors whose range contains the startup's requirement, preferred-domain
/// investors first, then the smallest portfolios.
pub fn investor_matches_statement(backend: Backend, criteria: &StartupCriteria) -> Statement {
    let mut params = Params::new(backend);
    let domain = params.bind(criteria.domain_id.to_string());
    let membership = domain_membership(backend, &domain, "i.preferred_domains");
    let score = score_expression(backend, &membership);
    let amount_low = params.bind(criteria.funding_required);
    let amount_high = params.bind(criteria.funding_required);

    let sql = format!(
        "SELECT i.investor_id, i.name, i.investment_min, i.investment_max, \
                i.preferred_domains, i.location, i.portfolio_size, \
                {score} AS match_score \
         FROM investors i \
         WHERE i.investment_min <= {amount_low} AND i.investment_max >= {amount_high} \
         ORDER BY match_score DESC, i.portfolio_size ASC, i.investor_id ASC \
         LIMIT {MATCH_LIMIT}"
    );
    params.into_statement(sql)
}

/// Unfunded startups whose requirement falls inside the investor's range,
/// preferred domains first, then the most recently founded. Startups without
/// a founding date come after dated ones on both backends.
pub fn startup_matches_statement(backend: Backend, criteria: &InvestorCriteria) -> Statement {
    let mut params = Params::new(backend);
    let preferred = params.bind(criteria.preferred_domains.clone());
    let membership = domain_membership(backend, &text_cast(backend, "s.domain_id"), &preferred);
    let score = score_expression(backend, &membership);
    let min = params.bind(criteria.investment_min);
    let max = params.bind(criteria.investment_max);

    let sql = format!(
        "SELECT s.startup_id, s.name, d.domain_name, s.funding_required, \
                s.location, s.description, s.founded_date, s.is_funded, \
                {score} AS match_score \
         FROM startups s \
         JOIN domains d ON s.domain_id = d.domain_id \
         WHERE s.funding_required BETWEEN {min} AND {max} \
           AND s.is_funded = FALSE \
         ORDER BY match_score DESC, s.founded_date IS NULL, s.founded_date DESC, s.startup_id ASC \
         LIMIT {MATCH_LIMIT}"
    );
    params.into_statement(sql)
}

#[tracing::instrument(skip(conn))]
pub async fn matched_investors<C>(
    conn: &C,
    criteria: &StartupCriteria,
) -> Result<Vec<InvestorMatch>, DbErr>
where
    C: ConnectionTrait,
{
    let backend = db::backend_of(conn)?;
    let matches: Vec<InvestorMatch> =
        db::fetch_all(conn, investor_matches_statement(backend, criteria)).await?;
    tracing::debug!("Found {} matching investors", matches.len());
    Ok(matches)
}

#[tracing::instrument(skip(conn))]
pub async fn matched_startups<C>(
    conn: &C,
    criteria: &InvestorCriteria,
) -> Result<Vec<StartupMatch>, DbErr>
where
    C: ConnectionTrait,
{
    let backend = db::backend_of(conn)?;
    let matches: Vec<StartupMatch> =
        db::fetch_all(conn, startup_matches_statement(backend, criteria)).await?;
    tracing::debug!("Found {} matching startups", matches.len());
    Ok(matches)
}
