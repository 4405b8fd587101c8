//! Submitted HTML forms. Everything arrives as text; `validate` checks shape
//! and `into_*` converts to the typed records the account layer stores.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use validator::Validate;

use crate::accounts::{NewInvestor, NewStartup};
use crate::error::AppError;
use crate::matching::PreferredDomains;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct StartupRegistrationForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[serde(default)]
    pub domain_id: String,
    #[serde(default)]
    pub funding_required: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub founded_date: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub website: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct InvestorRegistrationForm {
    #[serde(default)]
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    #[validate(email(message = "A valid email is required"))]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[serde(default)]
    pub investment_min: String,
    #[serde(default)]
    pub investment_max: String,
    /// Comma-separated domain ids, e.g. `1,2,5`.
    #[serde(default)]
    pub preferred_domains: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub location: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_amount(label: &str, raw: &str) -> Result<Decimal, AppError> {
    let amount = Decimal::from_str(raw.trim())
        .map_err(|_| AppError::InvalidForm(format!("{label} must be a number")))?;
    if amount <= Decimal::ZERO {
        return Err(AppError::InvalidForm(format!("{label} must be greater than zero")));
    }
    Ok(amount.round_dp(2))
}

fn parse_date(label: &str, raw: String) -> Result<Option<NaiveDate>, AppError> {
    optional(raw)
        .map(|value| {
            NaiveDate::parse_from_str(&value, "%Y-%m-%d")
                .map_err(|_| AppError::InvalidForm(format!("{label} must be a YYYY-MM-DD date")))
        })
        .transpose()
}

impl StartupRegistrationForm {
    pub fn into_new_startup(self) -> Result<NewStartup, AppError> {
        self.validate()?;

        let domain_id: i32 = self
            .domain_id
            .trim()
            .parse()
            .map_err(|_| AppError::InvalidForm("Please choose a domain".to_string()))?;
        let funding_required = parse_amount("Funding required", &self.funding_required)?;
        let founded_date = parse_date("Founded date", self.founded_date)?;

        Ok(NewStartup {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            password: self.password,
            domain_id,
            funding_required,
            description: optional(self.description),
            founded_date,
            location: optional(self.location),
            website: optional(self.website),
        })
    }
}

impl InvestorRegistrationForm {
    pub fn into_new_investor(self) -> Result<NewInvestor, AppError> {
        self.validate()?;

        let investment_min = parse_amount("Minimum investment", &self.investment_min)?;
        let investment_max = parse_amount("Maximum investment", &self.investment_max)?;
        if investment_min > investment_max {
            return Err(AppError::InvalidForm(
                "Minimum investment cannot exceed maximum investment".to_string(),
            ));
        }
        let preferred_domains =
            PreferredDomains::parse(&self.preferred_domains).map_err(AppError::InvalidForm)?;

        Ok(NewInvestor {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_lowercase(),
            password: self.password,
            investment_min,
            investment_max,
            preferred_domains,
            phone: optional(self.phone),
            location: optional(self.location),
        })
    }
}
