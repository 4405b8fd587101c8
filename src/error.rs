use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use thiserror::Error;
use validator::ValidationErrors;

use crate::accounts::Role;
use crate::templates::{self, ErrorPage, Layout};

/// Everything a request can fail with. The `Display` text is what users see,
/// either in a flash message or on the error page.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database connection error")]
    DatabaseUnavailable,

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("An account with this email already exists")]
    DuplicateEmail,

    #[error("Please login first")]
    LoginRequired(Role),

    #[error("{0}")]
    InvalidForm(String),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Password hashing failed: {0}")]
    PasswordHash(#[from] bcrypt::BcryptError),

    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |err| match &err.message {
                    Some(message) => message.to_string(),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();
        AppError::InvalidForm(messages.join("; "))
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidForm(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::LoginRequired(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::DatabaseUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(_) | AppError::PasswordHash(_) | AppError::Template(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self);
        }

        let page = ErrorPage {
            layout: Layout::default(),
            status: status.as_u16(),
            message: self.to_string(),
        };
        match templates::render(&page) {
            Ok(html) => (status, html).into_response(),
            Err(e) => {
                tracing::error!("Error page could not be rendered: {}", e);
                (status, self.to_string()).into_response()
            }
        }
    }
}
