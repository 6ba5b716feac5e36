//! Integration tests for the validated JSON extractor.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::routing::patch;
use axum::Json;
use serde_json::Value;
use tower::ServiceExt;

use fandreams_api::ValidatedJson;
use fandreams_api::dto::request::{UpdateProfileRequest, UpdateSettingsRequest};
use fandreams_api::dto::response::ApiResponse;

/// Response captured from the test router.
struct TestResponse {
    status: StatusCode,
    body: Value,
}

async fn update_profile(
    ValidatedJson(req): ValidatedJson<UpdateProfileRequest>,
) -> Json<ApiResponse<UpdateProfileRequest>> {
    Json(ApiResponse::ok(req))
}

async fn update_settings(
    ValidatedJson(req): ValidatedJson<UpdateSettingsRequest>,
) -> Json<ApiResponse<UpdateSettingsRequest>> {
    Json(ApiResponse::ok(req))
}

fn router() -> Router {
    Router::new()
        .route("/api/users/me/profile", patch(update_profile))
        .route("/api/users/me/settings", patch(update_settings))
}

async fn send(path: &str, body: &str, content_type: Option<&str>) -> TestResponse {
    let mut req = Request::builder().method("PATCH").uri(path);
    if let Some(content_type) = content_type {
        req = req.header("Content-Type", content_type);
    }
    let req = req
        .body(Body::from(body.to_string()))
        .expect("Failed to build request");

    let response = router().oneshot(req).await.expect("Failed to send request");

    let status = response.status();
    let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("Failed to read body");
    let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

    TestResponse { status, body }
}

async fn send_json(path: &str, body: Value) -> TestResponse {
    send(path, &body.to_string(), Some("application/json")).await
}

#[tokio::test]
async fn test_valid_profile_echoes_present_fields() {
    let response = send_json(
        "/api/users/me/profile",
        serde_json::json!({ "displayName": "Alice", "bio": "hi" }),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["success"], true);
    assert_eq!(
        response.body["data"],
        serde_json::json!({ "displayName": "Alice", "bio": "hi" })
    );
}

#[tokio::test]
async fn test_invalid_theme_returns_field_details() {
    let response = send_json(
        "/api/users/me/settings",
        serde_json::json!({ "theme": "blue" }),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["success"], false);
    assert_eq!(response.body["error"]["code"], "VALIDATION_ERROR");
    let theme_errors = response.body["error"]["details"]["theme"]
        .as_array()
        .expect("theme details");
    assert_eq!(theme_errors.len(), 1);
}

#[tokio::test]
async fn test_profile_constraint_violations_are_all_reported() {
    let response = send_json(
        "/api/users/me/profile",
        serde_json::json!({ "displayName": "", "country": "BRA" }),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let details = &response.body["error"]["details"];
    assert!(details.get("displayName").is_some());
    assert!(details.get("country").is_some());
}

#[tokio::test]
async fn test_settings_wrong_types_and_null_are_all_reported() {
    let response = send_json(
        "/api/users/me/settings",
        serde_json::json!({ "theme": null, "notificationEmail": "yes", "privacyShowOnline": 1 }),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let details = response.body["error"]["details"]
        .as_object()
        .expect("details object");
    let mut fields: Vec<&str> = details.keys().map(String::as_str).collect();
    fields.sort_unstable();
    assert_eq!(fields, ["notificationEmail", "privacyShowOnline", "theme"]);
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let response = send(
        "/api/users/me/settings",
        "{\"theme\": ",
        Some("application/json"),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], "INVALID_JSON");
}

#[tokio::test]
async fn test_missing_content_type_is_rejected() {
    let response = send("/api/users/me/settings", "{}", None).await;

    assert_eq!(response.status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(response.body["error"]["code"], "INVALID_JSON");
}
