//! HTTP handlers. Each account kind has its own module; the shared login and
//! dashboard plumbing lives here.

pub mod investor;
pub mod pages;
pub mod startup;

use axum::{
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_extra::extract::cookie::SignedCookieJar;
use sea_orm::DatabaseConnection;
use tracing::warn;

use crate::accounts::{self, Role};
use crate::entities::domain;
use crate::error::AppError;
use crate::flash::{self, Flash};
use crate::forms::LoginForm;
use crate::session;
use crate::templates::{self, Layout};
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/about", get(pages::about))
        .route("/health", get(pages::health_check))
        .route("/logout", get(pages::logout))
        .route(
            "/startup/register",
            get(startup::register_form).post(startup::register),
        )
        .route("/startup/login", get(startup::login_form).post(startup::login))
        .route("/startup/dashboard", get(startup::dashboard))
        .route(
            "/investor/register",
            get(investor::register_form).post(investor::register),
        )
        .route("/investor/login", get(investor::login_form).post(investor::login))
        .route("/investor/dashboard", get(investor::dashboard))
}

/// Consume pending flashes and pick up the session user for `base.html`.
pub(crate) fn layout(jar: SignedCookieJar) -> (SignedCookieJar, Layout) {
    let user = session::current(&jar).into_user();
    let (jar, flashes) = flash::take(jar);
    (jar, Layout { user, flashes })
}

/// Render `page` and attach the (flash-drained) cookie jar.
pub(crate) fn respond<T: askama::Template>(jar: SignedCookieJar, page: &T) -> Response {
    match templates::render(page) {
        Ok(html) => (jar, html).into_response(),
        Err(e) => e.into_response(),
    }
}

/// Domains for the registration drop-downs. A database outage shows an empty list.
pub(crate) async fn domains_for_form(state: &AppState) -> Vec<domain::Model> {
    let Some(conn) = state.gateway.connect().await else {
        return Vec::new();
    };
    accounts::list_domains(&conn).await.unwrap_or_else(|e| {
        warn!("Could not load domains: {}", e);
        Vec::new()
    })
}

pub(crate) async fn connect(state: &AppState) -> Result<DatabaseConnection, AppError> {
    state
        .gateway
        .connect()
        .await
        .ok_or(AppError::DatabaseUnavailable)
}

pub(crate) async fn sign_in(
    state: &AppState,
    jar: SignedCookieJar,
    role: Role,
    form: LoginForm,
) -> Response {
    let result = match connect(state).await {
        Ok(conn) => accounts::authenticate(&conn, role, &form.email, &form.password).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(user) => {
            let welcome = Flash::success(format!("Welcome back, {}!", user.name));
            let jar = session::login(jar, &user);
            flash::redirect(jar, welcome, role.dashboard_path())
        }
        Err(e @ (AppError::InvalidCredentials | AppError::DatabaseUnavailable)) => {
            flash::redirect(jar, Flash::error(e.to_string()), role.login_path())
        }
        Err(e) => flash::redirect(
            jar,
            Flash::error(format!("Login failed: {e}")),
            role.login_path(),
        ),
    }
}

/// Where a dashboard goes when it cannot be shown.
pub(crate) fn dashboard_failure(jar: SignedCookieJar, role: Role, error: AppError) -> Response {
    match error {
        AppError::LoginRequired(_) => {
            flash::redirect(jar, Flash::error(error.to_string()), role.login_path())
        }
        AppError::DatabaseUnavailable => flash::redirect(jar, Flash::error(error.to_string()), "/"),
        AppError::NotFound(_) => {
            let jar = session::logout(jar);
            flash::redirect(jar, Flash::error(error.to_string()), role.login_path())
        }
        other => flash::redirect(
            jar,
            Flash::error(format!("Error loading dashboard: {other}")),
            "/",
        ),
    }
}
