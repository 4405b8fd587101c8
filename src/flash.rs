//! One-shot user messages carried across a redirect in a signed cookie.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use serde::{Deserialize, Serialize};

use crate::session::{decode_value, encode_value};

pub const FLASH_COOKIE: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Error,
    Info,
}

impl FlashLevel {
    pub fn css_class(self) -> &'static str {
        match self {
            FlashLevel::Success => "flash-success",
            FlashLevel::Error => "flash-error",
            FlashLevel::Info => "flash-info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Info,
            message: message.into(),
        }
    }
}

fn pending(jar: &SignedCookieJar) -> Vec<Flash> {
    jar.get(FLASH_COOKIE)
        .and_then(|cookie| decode_value(cookie.value()))
        .unwrap_or_default()
}

/// Queue `flash` for the next rendered page.
pub fn push(jar: SignedCookieJar, flash: Flash) -> SignedCookieJar {
    let mut queued = pending(&jar);
    queued.push(flash);

    match encode_value(&queued) {
        Ok(value) => jar.add(
            Cookie::build((FLASH_COOKIE, value))
                .path("/")
                .http_only(true)
                .same_site(SameSite::Lax),
        ),
        Err(e) => {
            tracing::error!("Flash message could not be encoded: {}", e);
            jar
        }
    }
}

/// Drain the queued messages.
pub fn take(jar: SignedCookieJar) -> (SignedCookieJar, Vec<Flash>) {
    if jar.get(FLASH_COOKIE).is_none() {
        return (jar, Vec::new());
    }
    let flashes = pending(&jar);
    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flashes)
}

pub fn redirect(jar: SignedCookieJar, flash: Flash, to: &str) -> Response {
    (push(jar, flash), Redirect::to(to)).into_response()
}
