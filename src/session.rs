//! Cookie-backed login sessions.
//!
//! A session is `Anonymous` until a successful login stores the user's role,
//! id and name in a signed cookie; logout or expiry returns it to `Anonymous`.
//! Expiry is checked on every read against the timestamp inside the signed
//! payload, so a replayed old cookie is still rejected.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chrono::{DateTime, Duration, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

use crate::accounts::{AuthenticatedUser, Role};
use crate::error::AppError;

pub const SESSION_COOKIE: &str = "session";
pub const SESSION_LIFETIME_HOURS: i64 = 24;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub role: Role,
    pub user_id: i32,
    pub user_name: String,
    /// Unix seconds.
    pub expires_at: i64,
}

impl UserSession {
    pub fn new(user: &AuthenticatedUser, now: DateTime<Utc>) -> Self {
        Self {
            role: user.role,
            user_id: user.id,
            user_name: user.name.clone(),
            expires_at: (now + Duration::hours(SESSION_LIFETIME_HOURS)).timestamp(),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.expires_at
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Anonymous,
    Authenticated(UserSession),
}

impl SessionState {
    pub fn user(&self) -> Option<&UserSession> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Authenticated(user) => Some(user),
        }
    }

    pub fn into_user(self) -> Option<UserSession> {
        match self {
            SessionState::Anonymous => None,
            SessionState::Authenticated(user) => Some(user),
        }
    }
}

pub(crate) fn encode_value<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    Ok(URL_SAFE_NO_PAD.encode(serde_json::to_vec(value)?))
}

pub(crate) fn decode_value<T: DeserializeOwned>(raw: &str) -> Option<T> {
    let bytes = URL_SAFE_NO_PAD.decode(raw).ok()?;
    serde_json::from_slice(&bytes).ok()
}

pub fn current(jar: &SignedCookieJar) -> SessionState {
    current_at(jar, Utc::now())
}

pub fn current_at(jar: &SignedCookieJar, now: DateTime<Utc>) -> SessionState {
    let Some(cookie) = jar.get(SESSION_COOKIE) else {
        return SessionState::Anonymous;
    };

    match decode_value::<UserSession>(cookie.value()) {
        Some(user) if !user.is_expired_at(now) => SessionState::Authenticated(user),
        Some(user) => {
            tracing::debug!(user_id = user.user_id, "Session expired");
            SessionState::Anonymous
        }
        None => {
            tracing::warn!("Discarding unreadable session cookie");
            SessionState::Anonymous
        }
    }
}

/// The logged-in user, provided they hold `role`.
pub fn require(jar: &SignedCookieJar, role: Role) -> Result<UserSession, AppError> {
    match current(jar) {
        SessionState::Authenticated(user) if user.role == role => Ok(user),
        _ => Err(AppError::LoginRequired(role)),
    }
}

pub fn login(jar: SignedCookieJar, user: &AuthenticatedUser) -> SignedCookieJar {
    store(jar, &UserSession::new(user, Utc::now()))
}

pub fn store(jar: SignedCookieJar, session: &UserSession) -> SignedCookieJar {
    match encode_value(session) {
        Ok(value) => jar.add(
            Cookie::build((SESSION_COOKIE, value))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        ),
        Err(e) => {
            tracing::error!("Session could not be encoded: {}", e);
            jar
        }
    }
}

pub fn logout(jar: SignedCookieJar) -> SignedCookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}
