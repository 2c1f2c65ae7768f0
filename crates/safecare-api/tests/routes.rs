//! Router tests driven through `tower::ServiceExt::oneshot`: accounts,
//! bearer-token enforcement and per-form CRUD.

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{Value, json};
use tower::ServiceExt;

use safecare_api::config::ApiConfig;
use safecare_api::state::AppState;

async fn test_app() -> Router {
    let state = AppState::new(&ApiConfig::for_tests())
        .await
        .expect("in-memory state should build");
    safecare_api::app(state)
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request should build"),
        None => builder.body(Body::empty()).expect("request should build"),
    };

    let response = app.clone().oneshot(request).await.expect("router should respond");
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body should be readable");
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).expect("body should be JSON")
    };
    (status, value)
}

async fn sign_up(app: &Router, email: &str) -> (String, String) {
    let (status, body) = send(
        app,
        "POST",
        "/api/signup",
        None,
        Some(json!({ "name": "Jane Doe", "email": email, "password": "hunter22" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "sign-up failed: {body}");
    (
        body["access_token"].as_str().expect("token").to_string(),
        body["id"].as_str().expect("id").to_string(),
    )
}

fn screening(reviewed: &str, date_reviewed: Value) -> Value {
    json!({
        "tests": [{
            "test_ordered": "Urine panel",
            "date_collected": "2024-04-01",
            "provider": "Dr. Reyes",
            "provider_location": "County Clinic",
            "results": "Negative",
            "specify_results": null,
            "provider_reviewed": reviewed,
            "date_reviewed": date_reviewed,
        }]
    })
}

#[tokio::test]
async fn health_is_public() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn form_schemas_are_published() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/api/forms", None, None).await;
    assert_eq!(status, StatusCode::OK);
    let forms = body.as_array().expect("array");
    assert_eq!(forms.len(), 10);
    assert_eq!(forms[0]["kind"], "maternal_demographics");

    let (status, body) = send(&app, "GET", "/api/forms/drug_screening_results", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Drug Screening Results");
    assert_eq!(body["fields"][0]["name"], "tests");

    let (status, _) = send(&app, "GET", "/api/forms/unknown", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn duplicate_sign_up_is_rejected() {
    let app = test_app().await;
    sign_up(&app, "jane@example.org").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/signup",
        None,
        Some(json!({ "name": "Jane", "email": " JANE@example.org ", "password": "other" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "User already exists");
}

#[tokio::test]
async fn sign_in_checks_credentials() {
    let app = test_app().await;
    let (_, id) = sign_up(&app, "jane@example.org").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/signin",
        None,
        Some(json!({ "email": "jane@example.org", "password": "hunter22" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id.as_str());
    assert_eq!(body["name"], "Jane Doe");
    assert!(body["access_token"].as_str().is_some_and(|t| !t.is_empty()));

    let (status, body) = send(
        &app,
        "POST",
        "/api/signin",
        None,
        Some(json!({ "email": "jane@example.org", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Invalid credentials");

    let (status, _) = send(
        &app,
        "POST",
        "/api/signin",
        None,
        Some(json!({ "email": "nobody@example.org", "password": "hunter22" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn protected_routes_require_a_token() {
    let app = test_app().await;
    let (status, body) = send(&app, "GET", "/api/get_drug_screening_results", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].is_string());

    let (status, _) = send(
        &app,
        "GET",
        "/api/get_drug_screening_results",
        Some("not-a-jwt"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn get_user_returns_the_profile() {
    let app = test_app().await;
    let (token, id) = sign_up(&app, "jane@example.org").await;

    for method in ["GET", "POST"] {
        let (status, body) = send(&app, method, "/api/get_user", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id.as_str());
        assert_eq!(body["email"], "jane@example.org");
        assert!(body.get("password_hash").is_none());
    }
}

#[tokio::test]
async fn user_id_header_must_match_the_token() {
    let app = test_app().await;
    let (token, id) = sign_up(&app, "jane@example.org").await;

    let request = |user_id: String| {
        Request::builder()
            .method("GET")
            .uri("/api/get_infant_information")
            .header("authorization", format!("Bearer {token}"))
            .header("userId", user_id)
            .body(Body::empty())
            .expect("request should build")
    };

    let response = app.clone().oneshot(request(id)).await.expect("router should respond");
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(request(uuid::Uuid::new_v4().to_string()))
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn submission_lifecycle() {
    let app = test_app().await;
    let (token, user_id) = sign_up(&app, "jane@example.org").await;
    let token = Some(token.as_str());

    let (status, created) = send(
        &app,
        "POST",
        "/api/add_drug_screening_results",
        token,
        Some(screening("No", Value::Null)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().expect("id").to_string();
    assert_eq!(created["user_id"], user_id.as_str());
    assert_eq!(created["date_created"], created["date_last_modified"]);
    assert_eq!(created["tests"][0]["provider"], "Dr. Reyes");

    let (status, listed) = send(&app, "GET", "/api/get_drug_screening_results", token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
    assert_eq!(listed[0]["id"], id.as_str());

    let (status, fetched) = send(
        &app,
        "GET",
        &format!("/api/get_drug_screening_results/{id}"),
        token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/update_drug_screening_results/{id}"),
        token,
        Some(screening("Yes", json!("2024-04-03"))),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["id"], id.as_str());
    assert_eq!(updated["date_created"], created["date_created"]);
    assert_eq!(updated["tests"][0]["date_reviewed"], "2024-04-03");

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/delete_drug_screening_results/{id}"),
        token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/get_drug_screening_results/{id}"),
        token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/delete_drug_screening_results/{id}"),
        token,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn server_assigns_system_fields_and_drops_unknown_keys() {
    let app = test_app().await;
    let (token, user_id) = sign_up(&app, "jane@example.org").await;

    let mut body = screening("No", Value::Null);
    body["id"] = json!("00000000-0000-0000-0000-000000000000");
    body["user_id"] = json!("someone-else");
    body["date_created"] = json!("1999-01-01T00:00:00Z");
    body["favourite_colour"] = json!("green");

    let (status, created) = send(
        &app,
        "POST",
        "/api/add_drug_screening_results",
        Some(&token),
        Some(body),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(created["id"], "00000000-0000-0000-0000-000000000000");
    assert_eq!(created["user_id"], user_id.as_str());
    assert_ne!(created["date_created"], "1999-01-01T00:00:00Z");
    assert!(created.get("favourite_colour").is_none());
}

#[tokio::test]
async fn malformed_bodies_are_rejected() {
    let app = test_app().await;
    let (token, _) = sign_up(&app, "jane@example.org").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/add_drug_screening_results",
        Some(&token),
        Some(json!({ "tests": "not a list" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().is_some_and(|e| e.contains("tests")));

    let (status, _) = send(
        &app,
        "POST",
        "/api/add_drug_screening_results",
        Some(&token),
        Some(json!(["not", "an", "object"])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn submissions_are_private_to_their_owner() {
    let app = test_app().await;
    let (jane, _) = sign_up(&app, "jane@example.org").await;
    let (ruth, _) = sign_up(&app, "ruth@example.org").await;

    let (_, created) = send(
        &app,
        "POST",
        "/api/add_drug_screening_results",
        Some(&jane),
        Some(screening("No", Value::Null)),
    )
    .await;
    let id = created["id"].as_str().expect("id");

    let (status, listed) =
        send(&app, "GET", "/api/get_drug_screening_results", Some(&ruth), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed, json!([]));

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/get_drug_screening_results/{id}"),
        Some(&ruth),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/update_drug_screening_results/{id}"),
        Some(&ruth),
        Some(screening("No", Value::Null)),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn sign_out_revokes_the_token() {
    let app = test_app().await;
    let (token, _) = sign_up(&app, "jane@example.org").await;

    let (status, _) = send(&app, "POST", "/api/signout", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", "/api/get_user", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn data_survives_a_restart() {
    let dir = tempfile::tempdir().expect("tempdir should be created");
    let config = ApiConfig {
        data_file: Some(dir.path().join("store.json")),
        ..ApiConfig::for_tests()
    };

    let app = safecare_api::app(AppState::new(&config).await.expect("state should build"));
    let (token, _) = sign_up(&app, "jane@example.org").await;
    let (status, _) = send(
        &app,
        "POST",
        "/api/add_drug_screening_results",
        Some(&token),
        Some(screening("No", Value::Null)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    send(&app, "POST", "/api/signout", Some(&token), None).await;

    let app = safecare_api::app(AppState::new(&config).await.expect("state should reload"));
    let (status, _) = send(&app, "GET", "/api/get_user", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED, "revocations persist");

    let (status, body) = send(
        &app,
        "POST",
        "/api/signin",
        None,
        Some(json!({ "email": "jane@example.org", "password": "hunter22" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["access_token"].as_str().expect("token");

    let (_, listed) = send(&app, "GET", "/api/get_drug_screening_results", Some(token), None).await;
    assert_eq!(listed.as_array().map(Vec::len), Some(1));
}
