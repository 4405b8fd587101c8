use axum::{http::StatusCode, response::IntoResponse};
use fundmatch::accounts::Role;
use fundmatch::error::AppError;
use http_body_util::BodyExt;
use sea_orm::DbErr;

#[test]
fn test_app_error_display() {
    assert_eq!(AppError::DatabaseUnavailable.to_string(), "Database connection error");
    assert_eq!(AppError::InvalidCredentials.to_string(), "Invalid email or password");
    assert_eq!(AppError::LoginRequired(Role::Investor).to_string(), "Please login first");
    assert_eq!(
        AppError::InvalidForm("Name is required".to_string()).to_string(),
        "Name is required"
    );
    assert_eq!(
        AppError::NotFound("Startup account".to_string()).to_string(),
        "Startup account not found"
    );
    assert!(AppError::from(DbErr::Custom("boom".to_string()))
        .to_string()
        .contains("boom"));
}

#[test]
fn test_app_error_status_codes() {
    assert_eq!(AppError::InvalidForm(String::new()).status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::LoginRequired(Role::Startup).status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(AppError::DuplicateEmail.status_code(), StatusCode::CONFLICT);
    assert_eq!(AppError::NotFound(String::new()).status_code(), StatusCode::NOT_FOUND);
    assert_eq!(
        AppError::DatabaseUnavailable.status_code(),
        StatusCode::SERVICE_UNAVAILABLE
    );
    assert_eq!(
        AppError::Database(DbErr::Custom("x".to_string())).status_code(),
        StatusCode::INTERNAL_SERVER_ERROR
    );
}

#[tokio::test]
async fn test_app_error_into_response() {
    let response = AppError::DatabaseUnavailable.into_response();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(body.to_vec()).unwrap();
    assert!(html.contains("Something went wrong"));
    assert!(html.contains("Database connection error"));
    assert!(html.contains("503"));
}
