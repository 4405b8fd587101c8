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
use crate::forms::{LoginForm, StartupRegistrationForm};
use crate::ledger::{self, FundingRecord, StartupProfile};
use crate::matching::{self, InvestorMatch};
use crate::session;
use crate::templates::{LoginPage, StartupDashboardPage, StartupRegisterPage};
use crate::AppState;

pub async fn register_form(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    let domains = domains_for_form(&state).await;
    let (jar, layout) = layout(jar);
    respond(jar, &StartupRegisterPage { layout, domains })
}

async fn create_account(state: &AppState, form: StartupRegistrationForm) -> Result<i32, AppError> {
    let new = form.into_new_startup()?;
    let conn = connect(state).await?;
    accounts::register_startup(&conn, &new).await
}

#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<StartupRegistrationForm>,
) -> Response {
    match create_account(&state, form).await {
        Ok(_) => flash::redirect(
            jar,
            Flash::success("Registration successful! Please login."),
            Role::Startup.login_path(),
        ),
        Err(e) => flash::redirect(
            jar,
            Flash::error(format!("Registration failed: {e}")),
            Role::Startup.register_path(),
        ),
    }
}

pub async fn login_form(jar: SignedCookieJar) -> Response {
    let (jar, layout) = layout(jar);
    respond(
        jar,
        &LoginPage {
            layout,
            role: Role::Startup,
        },
    )
}

pub async fn login(
    State(state): State<AppState>,
    jar: SignedCookieJar,
    Form(form): Form<LoginForm>,
) -> Response {
    sign_in(&state, jar, Role::Startup, form).await
}

async fn query_dashboard<C>(
    conn: &C,
    startup_id: i32,
) -> Result<(StartupProfile, Vec<InvestorMatch>, Vec<FundingRecord>), AppError>
where
    C: ConnectionTrait,
{
    let startup = ledger::startup_profile(conn, startup_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Startup account".to_string()))?;
    let matched_investors = matching::matched_investors(conn, &startup.criteria()).await?;
    let funding_history = ledger::funding_history(conn, startup_id).await?;
    Ok((startup, matched_investors, funding_history))
}

async fn load_dashboard(
    state: &AppState,
    jar: &SignedCookieJar,
) -> Result<(StartupProfile, Vec<InvestorMatch>, Vec<FundingRecord>), AppError> {
    let user = session::require(jar, Role::Startup)?;
    let conn = connect(state).await?;
    query_dashboard(&conn, user.user_id).await
}

pub async fn dashboard(State(state): State<AppState>, jar: SignedCookieJar) -> Response {
    match load_dashboard(&state, &jar).await {
        Ok((startup, matched_investors, funding_history)) => {
            let (jar, layout) = layout(jar);
            respond(
                jar,
                &StartupDashboardPage {
                    layout,
                    startup,
                    matched_investors,
                    funding_history,
                },
            )
        }
        Err(e) => dashboard_failure(jar, Role::Startup, e),
    }
}
