use askama::Template;
use axum::response::Html;

use crate::accounts::Role;
use crate::entities::domain;
use crate::error::AppError;
use crate::flash::Flash;
use crate::ledger::{FundingRecord, InvestorProfile, PortfolioEntry, StartupProfile};
use crate::matching::{InvestorMatch, StartupMatch};
use crate::session::UserSession;

/// Data every page shares through `base.html`: the nav bar user and any
/// pending flash messages.
#[derive(Debug, Clone, Default)]
pub struct Layout {
    pub user: Option<UserSession>,
    pub flashes: Vec<Flash>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexPage {
    pub layout: Layout,
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutPage {
    pub layout: Layout,
}

#[derive(Template)]
#[template(path = "login.html")]
pub struct LoginPage {
    pub layout: Layout,
    pub role: Role,
}

#[derive(Template)]
#[template(path = "startup_register.html")]
pub struct StartupRegisterPage {
    pub layout: Layout,
    pub domains: Vec<domain::Model>,
}

#[derive(Template)]
#[template(path = "investor_register.html")]
pub struct InvestorRegisterPage {
    pub layout: Layout,
    pub domains: Vec<domain::Model>,
}

#[derive(Template)]
#[template(path = "startup_dashboard.html")]
pub struct StartupDashboardPage {
    pub layout: Layout,
    pub startup: StartupProfile,
    pub matched_investors: Vec<InvestorMatch>,
    pub funding_history: Vec<FundingRecord>,
}

#[derive(Template)]
#[template(path = "investor_dashboard.html")]
pub struct InvestorDashboardPage {
    pub layout: Layout,
    pub investor: InvestorProfile,
    pub matched_startups: Vec<StartupMatch>,
    pub portfolio: Vec<PortfolioEntry>,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage {
    pub layout: Layout,
    pub status: u16,
    pub message: String,
}

pub fn render<T: Template>(page: &T) -> Result<Html<String>, AppError> {
    Ok(Html(page.render()?))
}
