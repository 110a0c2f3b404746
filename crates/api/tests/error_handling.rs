//! Tests for `AppError` → HTTP response mapping.
//!
//! These tests verify that each `AppError` variant produces the correct HTTP
//! status code and message. They do NOT need an HTTP server -- they call
//! `IntoResponse` directly on `AppError` values.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use http_body_util::BodyExt;
use tomato_api::error::AppError;
use tomato_core::error::CoreError;
use tomato_core::store::StoreError;

/// Helper: convert an `AppError` into its status code and parsed JSON body.
async fn error_to_response(err: AppError) -> (StatusCode, serde_json::Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

// ---------------------------------------------------------------------------
// Test: CoreError::NotFound maps to 404 naming the entity only
// ---------------------------------------------------------------------------

#[tokio::test]
async fn not_found_error_returns_404() {
    let err = AppError::Core(CoreError::not_found("Tomato", 42));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json,
        serde_json::json!({"success": false, "error": "Tomato not found"})
    );
}

// ---------------------------------------------------------------------------
// Test: CoreError::Validation maps to 400 with its message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn validation_error_returns_400() {
    let err = AppError::Core(CoreError::Validation(
        "Price must be a non-negative number".into(),
    ));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["success"], false);
    assert_eq!(json["error"], "Price must be a non-negative number");
}

// ---------------------------------------------------------------------------
// Test: AppError::BadRequest maps to 400
// ---------------------------------------------------------------------------

#[tokio::test]
async fn bad_request_error_returns_400() {
    let err = AppError::BadRequest("invalid field value".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "invalid field value");
}

// ---------------------------------------------------------------------------
// Test: store failures report the route's message, never the cause
// ---------------------------------------------------------------------------

#[tokio::test]
async fn store_failure_returns_500_with_route_message() {
    let map = AppError::failed("Failed to fetch tomatoes");
    let err = map(CoreError::Store(StoreError::Unavailable(
        "connection refused by 10.0.0.5".into(),
    )));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        json,
        serde_json::json!({"success": false, "error": "Failed to fetch tomatoes"})
    );
}

#[tokio::test]
async fn failed_adapter_passes_domain_errors_through() {
    let map = AppError::failed("Failed to delete tomato");
    let err = map(CoreError::not_found("Tomato", 7));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "Tomato not found");
}

// ---------------------------------------------------------------------------
// Test: AppError::InternalError maps to 500 and sanitizes the message
// ---------------------------------------------------------------------------

#[tokio::test]
async fn internal_error_returns_500_and_sanitizes_message() {
    let err = AppError::InternalError("secret database credentials leaked".into());

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Internal server error");
}

#[tokio::test]
async fn unmapped_store_error_returns_generic_500() {
    let err = AppError::from(CoreError::from(StoreError::Rejected(
        "violates check constraint".into(),
    )));

    let (status, json) = error_to_response(err).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "Internal server error");
}
