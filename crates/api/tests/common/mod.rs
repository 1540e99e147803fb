#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use hostwatch_api::auth::password::hash_password;
use hostwatch_api::config::ServerConfig;
use hostwatch_api::router::build_app_router;
use hostwatch_api::state::AppState;
use hostwatch_core::plugins::PluginRegistry;
use hostwatch_core::types::DbId;
use hostwatch_db::models::user::CreateUser;
use hostwatch_db::repositories::{PluginRepo, UserRepo};
use hostwatch_events::{Dispatcher, EventBus, LogTransport};

/// Password given to every user made by [`create_user`].
pub const PASSWORD: &str = "s3cret-pass";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        dispatch_interval_secs: None,
    }
}

/// Build the application with the production middleware stack.
///
/// Built-in plugins are registered; notifications are delivered through
/// [`LogTransport`].
pub async fn build_test_app(pool: PgPool) -> Router {
    build_test_app_with_bus(pool, Arc::new(EventBus::default())).await
}

/// Like [`build_test_app`] but publishing reported events on `event_bus`.
pub async fn build_test_app_with_bus(pool: PgPool, event_bus: Arc<EventBus>) -> Router {
    let config = test_config();
    let plugins = Arc::new(PluginRegistry::builtin());
    PluginRepo::ensure(&pool, &plugins.names()).await.unwrap();

    let state = AppState {
        dispatcher: Dispatcher::new(pool.clone(), Arc::new(LogTransport)),
        pool,
        config: Arc::new(config.clone()),
        event_bus,
        plugins,
    };
    build_app_router(state, &config)
}

/// Insert an active user with [`PASSWORD`] and return its id.
pub async fn create_user(pool: &PgPool, username: &str) -> DbId {
    create_user_with(pool, username, true, "").await
}

pub async fn create_user_with(
    pool: &PgPool,
    username: &str,
    is_active: bool,
    timezone: &str,
) -> DbId {
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: hash_password(PASSWORD).unwrap(),
            is_active,
            timezone: timezone.to_string(),
            skype: String::new(),
        },
    )
    .await
    .unwrap();
    user.id
}

/// `Authorization` header value for `username` with [`PASSWORD`].
pub fn basic_auth(username: &str) -> String {
    basic_auth_with(username, PASSWORD)
}

pub fn basic_auth_with(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

async fn send(app: Router, request: Request<Body>) -> Response {
    app.oneshot(request).await.unwrap()
}

fn request(method: Method, uri: &str, auth: Option<&str>) -> axum::http::request::Builder {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(username) = auth {
        builder = builder.header(AUTHORIZATION, basic_auth(username));
    }
    builder
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, request(Method::GET, uri, None).body(Body::empty()).unwrap()).await
}

pub async fn get_auth(app: Router, uri: &str, username: &str) -> Response {
    send(
        app,
        request(Method::GET, uri, Some(username))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

/// GET with a raw `Authorization` header value.
pub async fn get_with_header(app: Router, uri: &str, authorization: &str) -> Response {
    let req = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(AUTHORIZATION, authorization)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    auth: Option<&str>,
    body: serde_json::Value,
) -> Response {
    json_request(app, Method::POST, uri, auth, body).await
}

pub async fn put_json(app: Router, uri: &str, username: &str, body: serde_json::Value) -> Response {
    json_request(app, Method::PUT, uri, Some(username), body).await
}

async fn json_request(
    app: Router,
    method: Method,
    uri: &str,
    auth: Option<&str>,
    body: serde_json::Value,
) -> Response {
    let req = request(method, uri, auth)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, req).await
}

/// POST an `application/x-www-form-urlencoded` body.
pub async fn post_form(app: Router, uri: &str, username: &str, fields: &[(&str, &str)]) -> Response {
    let body = fields
        .iter()
        .map(|(k, v)| format!("{}={}", encode(k), encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    let req = request(Method::POST, uri, Some(username))
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body))
        .unwrap();
    send(app, req).await
}

pub async fn post_auth(app: Router, uri: &str, username: &str) -> Response {
    send(
        app,
        request(Method::POST, uri, Some(username))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn delete(app: Router, uri: &str, username: &str) -> Response {
    send(
        app,
        request(Method::DELETE, uri, Some(username))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Minimal percent-encoding for form bodies.
fn encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for b in value.bytes() {
        match b {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char)
            }
            b' ' => out.push('+'),
            _ => out.push_str(&format!("%{b:02X}")),
        }
    }
    out
}
