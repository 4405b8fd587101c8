use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::cookie::SignedCookieJar;

use super::{layout, respond};
use crate::flash::{self, Flash};
use crate::session;
use crate::templates::{AboutPage, IndexPage};

pub async fn index(jar: SignedCookieJar) -> Response {
    let (jar, layout) = layout(jar);
    respond(jar, &IndexPage { layout })
}

pub async fn about(jar: SignedCookieJar) -> Response {
    let (jar, layout) = layout(jar);
    respond(jar, &AboutPage { layout })
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "Service is healthy")
}

pub async fn logout(jar: SignedCookieJar) -> Response {
    if let Some(user) = session::current(&jar).user() {
        tracing::info!(user_id = user.user_id, role = %user.role, "Logged out");
    }
    let jar = session::logout(jar);
    flash::redirect(jar, Flash::info("You have been logged out"), "/")
}
