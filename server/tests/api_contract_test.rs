//! HTTP surface: login flow, auth gate, response envelope on bad input

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use streamline_server::api;
use streamline_server::auth::JwtConfig;
use streamline_server::core::{Config, ServerState};
use streamline_server::db::models::{UserCreate, UserRole, WarehouseCreate, WarehouseStatus};
use streamline_server::db::repository::{UserRepository, WarehouseRepository};
use streamline_server::notify::LogNotifier;
use tower::ServiceExt;

fn test_config() -> Config {
    Config {
        work_dir: "./data".to_string(),
        http_port: 0,
        jwt: JwtConfig {
            secret: "integration-test-secret-integration!".to_string(),
            expiration_minutes: 60,
            issuer: "streamline-server".to_string(),
            audience: "streamline-clients".to_string(),
        },
        environment: "development".to_string(),
        notify_buffer: 16,
        support_inbox: "support@streamline.local".to_string(),
    }
}

async fn test_state() -> ServerState {
    ServerState::for_testing(test_config(), Arc::new(LogNotifier))
        .await
        .unwrap()
}

async fn seed_user(state: &ServerState, email: &str, password: &str) {
    UserRepository::new(state.get_db())
        .create(UserCreate {
            first_name: "Jane".to_string(),
            last_name: "Admin".to_string(),
            email: email.to_string(),
            password: password.to_string(),
            phone_number: None,
            role: UserRole::Admin,
        })
        .await
        .unwrap();
}

fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn login(app: Router, email: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        json_request(
            "POST",
            "/api/auth/login",
            None,
            &json!({"email": email, "password": password}),
        ),
    )
    .await
}

#[tokio::test]
async fn login_issues_a_token_that_opens_protected_routes() {
    let state = test_state().await;
    seed_user(&state, "jane@streamline.local", "s3cret-pass").await;
    let app = api::router(state);

    let (status, body) = login(app.clone(), "jane@streamline.local", "s3cret-pass").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["message"], json!("Login successful."));
    assert_eq!(body["data"]["user"]["email"], json!("jane@streamline.local"));
    assert!(body["data"]["user"].get("hash_pass").is_none());

    let token = body["data"]["token"].as_str().unwrap().to_string();

    // Same token opens a protected route
    let (status, body) = send(
        app.clone(),
        Request::builder()
            .uri("/api/users")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));

    // Without it, the gate holds
    let (status, body) = send(
        app,
        Request::builder()
            .uri("/api/users")
            .body(Body::empty())
            .unwrap(),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn wrong_password_and_unknown_email_fail_alike() {
    let state = test_state().await;
    seed_user(&state, "jane@streamline.local", "s3cret-pass").await;
    let app = api::router(state);

    let (status, body) = login(app.clone(), "jane@streamline.local", "wrong").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!(true));
    let wrong_password_message = body["message"].clone();

    let (status, body) = login(app, "nobody@streamline.local", "s3cret-pass").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], wrong_password_message);
}

#[tokio::test]
async fn invalid_status_value_keeps_the_response_envelope() {
    let state = test_state().await;
    seed_user(&state, "jane@streamline.local", "s3cret-pass").await;
    let app = api::router(state);

    let (_, body) = login(app.clone(), "jane@streamline.local", "s3cret-pass").await;
    let token = body["data"]["token"].as_str().unwrap().to_string();

    // A status outside the enum is a 400 in the standard envelope, not a
    // bare-text 422
    let (status, body) = send(
        app,
        json_request(
            "PUT",
            "/api/orders/123456/status",
            Some(&token),
            &json!({"status": "teleported"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!(true));
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn malformed_json_body_keeps_the_response_envelope() {
    let state = test_state().await;
    seed_user(&state, "jane@streamline.local", "s3cret-pass").await;
    let app = api::router(state);

    let (_, body) = login(app.clone(), "jane@streamline.local", "s3cret-pass").await;
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let request = Request::builder()
        .method("POST")
        .uri("/api/customers")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"], json!(true));
}

#[tokio::test]
async fn dashboard_reports_counts_and_warehouse_stock() {
    let state = test_state().await;
    seed_user(&state, "jane@streamline.local", "s3cret-pass").await;
    WarehouseRepository::new(state.get_db())
        .create(WarehouseCreate {
            warehouse_id: "WH-001".to_string(),
            name: "Central".to_string(),
            location: "Springfield".to_string(),
            capacity: 1000,
            current_stock: 250,
            manager_id: "jane".to_string(),
            contact_number: None,
            status: WarehouseStatus::Active,
        })
        .await
        .unwrap();
    let app = api::router(state);

    let (_, body) = login(app.clone(), "jane@streamline.local", "s3cret-pass").await;
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = send(
        app,
        Request::builder()
            .uri("/api/dashboard")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let data = &body["data"];
    assert_eq!(data["userCount"], json!(1));
    assert_eq!(data["warehouseCount"], json!(1));
    assert_eq!(data["orderCount"], json!(0));
    assert_eq!(data["customerCount"], json!(0));
    assert_eq!(data["ticketCount"], json!(0));

    let summary = data["warehouse_summary"].as_array().unwrap();
    assert_eq!(summary.len(), 1);
    assert_eq!(summary[0]["warehouse_id"], json!("WH-001"));
    assert_eq!(summary[0]["currentStock"], json!(250));
    assert_eq!(summary[0]["capacity"], json!(1000));
    assert_eq!(summary[0]["status"], json!("active"));
}
