//! 认证 API 集成测试
//!
//! 不依赖数据库的路径（校验失败、缺失/非法令牌）直接运行；
//! 完整的注册/登录流程需要 PostgreSQL，标记为 ignored，
//! 通过 `cargo test -- --ignored` 并设置 TEST_DATABASE_URL 执行。

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::json;
use tower::ServiceExt;

mod common;
use common::{create_test_app_state, create_test_config, lazy_test_pool, setup_test_db};

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// ==================== 校验失败（无需数据库） ====================

#[tokio::test]
async fn test_signup_invalid_email_returns_400() {
    let config = create_test_config();
    let state = create_test_app_state(lazy_test_pool(&config));
    let app = passvault::routes::create_router(state);

    let response = app
        .oneshot(post_json(
            "/api/auth/signup",
            json!({"name": "Alice", "email": "not-an-email", "password": "secret1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], 400);
}

#[tokio::test]
async fn test_signup_short_password_returns_400() {
    let config = create_test_config();
    let state = create_test_app_state(lazy_test_pool(&config));
    let app = passvault::routes::create_router(state);

    let response = app
        .oneshot(post_json(
            "/api/auth/signup",
            json!({"name": "Alice", "email": "alice@example.com", "password": "12345"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_short_name_returns_400() {
    let config = create_test_config();
    let state = create_test_app_state(lazy_test_pool(&config));
    let app = passvault::routes::create_router(state);

    let response = app
        .oneshot(post_json(
            "/api/auth/signup",
            json!({"name": "A", "email": "alice@example.com", "password": "secret1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signup_missing_fields_returns_400() {
    let config = create_test_config();
    let state = create_test_app_state(lazy_test_pool(&config));
    let app = passvault::routes::create_router(state);

    let response = app
        .oneshot(post_json("/api/auth/signup", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ==================== 令牌门禁（无需数据库） ====================

#[tokio::test]
async fn test_protected_route_without_token_returns_401() {
    let config = create_test_config();
    let state = create_test_app_state(lazy_test_pool(&config));
    let app = passvault::routes::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/passwords")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "No token provided");
}

#[tokio::test]
async fn test_protected_route_with_garbage_token_returns_401() {
    let config = create_test_config();
    let state = create_test_app_state(lazy_test_pool(&config));
    let app = passvault::routes::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/passwords")
                .header(header::AUTHORIZATION, "Bearer not.a.jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let body = body_json(response).await;
    assert_eq!(body["error"]["message"], "Token is not valid");
}

#[tokio::test]
async fn test_protected_route_with_wrong_scheme_returns_401() {
    let config = create_test_config();
    let state = create_test_app_state(lazy_test_pool(&config));
    let app = passvault::routes::create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/users/profile")
                .header(header::AUTHORIZATION, "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ==================== 完整流程（需要数据库） ====================

#[tokio::test]
#[ignore = "requires PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_signup_success() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool);
    let app = passvault::routes::create_router(state);

    let response = app
        .oneshot(post_json(
            "/api/auth/signup",
            json!({"name": "Alice", "email": "alice@x.com", "password": "secret1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert!(body["token"].is_string());
    assert_eq!(body["user"]["name"], "Alice");
    assert_eq!(body["user"]["email"], "alice@x.com");
    // 响应中绝不能包含密码或哈希
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_signup_duplicate_email_returns_409() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;
    let state = create_test_app_state(pool);
    let app = passvault::routes::create_router(state);

    let signup = || {
        post_json(
            "/api/auth/signup",
            json!({"name": "Alice", "email": "alice@x.com", "password": "secret1"}),
        )
    };

    let first = app.clone().oneshot(signup()).await.unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app.oneshot(signup()).await.unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_login_success_and_token_is_accepted() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;
    common::create_test_user(&pool, "Alice", "alice@x.com", "secret1")
        .await
        .expect("Failed to create test user");

    let state = create_test_app_state(pool);
    let app = passvault::routes::create_router(state);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            json!({"email": "alice@x.com", "password": "secret1"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap().to_string();

    // 签发的令牌必须能通过认证中间件
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/passwords")
                .header(header::AUTHORIZATION, format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
#[ignore = "requires PostgreSQL (set TEST_DATABASE_URL)"]
async fn test_login_failures_use_same_generic_message() {
    let config = create_test_config();
    let pool = setup_test_db(&config).await;
    common::create_test_user(&pool, "Alice", "alice@x.com", "secret1")
        .await
        .expect("Failed to create test user");

    let state = create_test_app_state(pool);
    let app = passvault::routes::create_router(state);

    // 密码错误
    let wrong_password = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            json!({"email": "alice@x.com", "password": "wrong"}),
        ))
        .await
        .unwrap();
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let wrong_password_body = body_json(wrong_password).await;

    // 未知邮箱
    let unknown_email = app
        .oneshot(post_json(
            "/api/auth/login",
            json!({"email": "nobody@x.com", "password": "secret1"}),
        ))
        .await
        .unwrap();
    assert_eq!(unknown_email.status(), StatusCode::UNAUTHORIZED);
    let unknown_email_body = body_json(unknown_email).await;

    // 两种失败的提示必须一致，不泄露账户是否存在
    assert_eq!(
        wrong_password_body["error"]["message"],
        unknown_email_body["error"]["message"]
    );
    assert_eq!(wrong_password_body["error"]["message"], "Invalid credentials");
}
