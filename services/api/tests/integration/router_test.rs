use axum::http::StatusCode;
use axum_test::TestServer;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};

use wayfinder_api::infra::mailer::{AppMailer, LogMailer};
use wayfinder_api::router::build_router;
use wayfinder_api::state::AppState;
use wayfinder_testing::auth::MockAuth;

/// Router over a disconnected database: only paths that stop before storage succeed.
fn server() -> TestServer {
    let state = AppState {
        db: DatabaseConnection::Disconnected,
        jwt_secret: MockAuth::secret(),
        access_token_ttl_secs: 3600,
        public_url: "http://localhost:3200".to_owned(),
        mailer: AppMailer::Log(LogMailer),
    };
    TestServer::new(build_router(state)).unwrap()
}

fn error_kind(response: &axum_test::TestResponse) -> String {
    let body: Value = response.json();
    body["kind"].as_str().unwrap_or_default().to_owned()
}

// ── Health ───────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_report_liveness() {
    let response = server().get("/healthz").await;
    response.assert_status(StatusCode::OK);
}

#[tokio::test]
async fn should_report_not_ready_without_database() {
    let response = server().get("/readyz").await;
    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn should_attach_request_id_to_responses() {
    let response = server().get("/healthz").await;
    assert!(response.headers().contains_key("x-request-id"));
}

// ── Locations ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_token_to_create_location() {
    let response = server()
        .post("/locations")
        .json(&json!({"name": "Rila", "type": "LAKE", "lat": 42.1, "lon": 23.5}))
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_forbid_non_admin_from_creating_location() {
    let response = server()
        .post("/locations")
        .authorization_bearer(MockAuth::user("hiker@wayfinder.dev").token())
        .json(&json!({"name": "Rila", "type": "LAKE", "lat": 42.1, "lon": 23.5}))
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
    assert_eq!(error_kind(&response), "FORBIDDEN");
}

#[tokio::test]
async fn should_validate_location_body_for_admin() {
    let response = server()
        .post("/locations")
        .authorization_bearer(MockAuth::admin("admin@wayfinder.dev").token())
        .json(&json!({"type": "LAKE", "lat": 42.1, "lon": 23.5}))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "VALIDATION");
    assert_eq!(body["message"], "name is required");
}

#[tokio::test]
async fn should_reject_unknown_marker_type() {
    let response = server()
        .get("/locations/markers")
        .add_query_param("locationTypes", "LAKE,VOLCANO")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(error_kind(&response), "VALIDATION");
}

// ── Users ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_null_profile_for_anonymous_caller() {
    let response = server().get("/users/@me").await;
    response.assert_status(StatusCode::OK);
    assert_eq!(response.json::<Value>(), Value::Null);
}

#[tokio::test]
async fn should_reject_invalid_bearer_even_on_optional_routes() {
    let response = server()
        .get("/users/@me")
        .authorization_bearer("not-a-jwt")
        .await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_forbid_reading_another_users_favourites() {
    let response = server()
        .get("/users/favourites")
        .add_query_param("email", "someone-else@wayfinder.dev")
        .authorization_bearer(MockAuth::user("hiker@wayfinder.dev").token())
        .await;
    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_require_admin_caller_to_register_admin() {
    let body = json!({"email": "boss@wayfinder.dev", "password": "pw", "role": "ADMIN"});

    let anonymous = server().post("/users/registration").json(&body).await;
    anonymous.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(error_kind(&anonymous), "UNAUTHORIZED");

    let as_user = server()
        .post("/users/registration")
        .authorization_bearer(MockAuth::user("hiker@wayfinder.dev").token())
        .json(&body)
        .await;
    as_user.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn should_require_token_to_list_users() {
    let response = server().get("/users").await;
    response.assert_status(StatusCode::UNAUTHORIZED);
}
