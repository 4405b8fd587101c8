use axum::{
    extract::{Form, State},
    response::Response,
};
use axum_extra::extract::cookie::SignedCookieJar;
use sea_orm::ConnectionTrait;

use super::{connect, dashboard_failure, domains_for_form, layout, respond, sign_in};
use crate::accounts::{self, Role};
use crate::error::AppError;
use crate::flash::{self, Flash};
use crate::forms::{InvestorRegistrationForm, LoginForm};
use crate::ledger::{self, InvestorProfile, PortfolioEntry};
use crate::matching::{self, StartupMatch};
use crate::session;
use crate::templates::{InvestorDashboardPage, InvestorRegisterPage, LoginPage};
use crate::AppState;

pub async fn register_form(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let domains = domains_for_form(&state).await;
    let (jar, layout) = layout(jar);
    respond(jar, &InvestorRegisterPage { layout, domains })
}

async fn create_account(
    state: &AppState,
    form: InvestorRegistrationForm,
) -> Result<i32, AppError> {
    let new = form.into_new_investor()?;
    let conn = connect(state).await?;
    accounts::register_investor(&conn, &new).await
}

#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<InvestorRegistrationForm>,
) -> Response {
    match create_account(&state, form).await {
        Ok(_) => flash::redirect(
            jar,
            Flash::success("Registration successful! Please login."),
            Role::Investor.login_path(),
        ),
        Err(e) => flash::redirect(
            jar,
            Flash::error(format!("Registration failed: {e}")),
            Role::Investor.register_path(),
        ),
    }
}

pub async fn login_form(jar: SignedCookieJar) -> Response {
    let (jar, layout) = layout(jar);
    respond(
        jar,
        &LoginPage {
            layout,
            role: Role::Investor,
        },
    )
}

pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    sign_in(&state, jar, Role::Investor, form).await
}

async fn query_dashboard<C>(
    conn: &C,
    investor_id: i32,
) -> Result<(InvestorProfile, Vec<StartupMatch>, Vec<PortfolioEntry>), AppError>
where
    C: ConnectionTrait,
{
    let investor = ledger::investor_profile(conn, investor_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Investor account".to_string()))?;
    let matched_startups = matching::matched_startups(conn, &investor.criteria()).await?;
    let portfolio = ledger::portfolio(conn, investor_id).await?;
    Ok((investor, matched_startups, portfolio))
}

async fn load_dashboard(
    state: &AppState,
    jar: &SignedCookieJar,
) -> Result<(InvestorProfile, Vec<StartupMatch>, Vec<PortfolioEntry>), AppError> {
    let user = session::require(jar, Role::Investor)?;
    let conn = connect(state).await?;
    query_dashboard(&conn, user.user_id).await
}

pub async fn dashboard(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    match load_dashboard(&state, &jar).await {
        Ok((investor, matched_startups, portfolio)) => {
            let (jar, layout) = layout(jar);
            respond(
                jar,
                &InvestorDashboardPage {
                    layout,
                    investor,
                    matched_startups,
                    portfolio,
                },
            )
        }
        Err(e) => dashboard_failure(jar, Role::Investor, e),
    }
}
