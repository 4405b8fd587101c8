pub mod accounts;
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod flash;
pub mod forms;
pub mod ledger;
pub mod matching;
pub mod routes;
pub mod seed;
pub mod session;
pub mod telemetry;
pub mod templates;

use std::sync::Arc;

use axum::{extract::FromRef, Router};
use axum_extra::extract::cookie::Key;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::config::Settings;
use crate::db::Gateway;

/// Shared by every handler. Cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub gateway: Gateway,
    cookie_key: Key,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        let cookie_key = cookie_key(settings.session_secret.as_deref());
        let gateway = Gateway::new(settings.database.clone(), settings.connect_timeout);
        Self {
            settings: Arc::new(settings),
            gateway,
            cookie_key,
        }
    }

    pub fn cookie_key(&self) -> &Key {
        &self.cookie_key
    }
}

impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Self {
        state.cookie_key.clone()
    }
}

/// Signing key for session and flash cookies. A SHA-512 digest of the secret
/// gives the 64 bytes `Key` needs; without a secret the key is random and
/// sessions end with the process.
fn cookie_key(secret: Option<&str>) -> Key {
    match secret {
        Some(secret) => {
            let digest = ring::digest::digest(&ring::digest::SHA512, secret.as_bytes());
            Key::from(digest.as_ref())
        }
        None => {
            tracing::warn!("No session secret configured, generating a random cookie key");
            Key::generate()
        }
    }
}

/// Create the application with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    let static_files = ServeDir::new(&state.settings.static_dir);

    Router::new()
        .merge(routes::router())
        .nest_service("/static", static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
