//! HTTP-level tests for registration and account settings.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, get_auth, post_json, put_json};
use hostwatch_db::repositories::UserRepo;
use serde_json::{json, Value};
use sqlx::PgPool;

fn registration(username: &str, email: &str) -> Value {
    json!({
        "username": username,
        "password1": "s3cret-pass",
        "password2": "s3cret-pass",
        "email": email,
        "timezone": "Europe/Warsaw",
    })
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_creates_inactive_account(pool: PgPool) {
    let app = common::build_test_app(pool.clone()).await;

    let response = post_json(
        app.clone(),
        "/api/v1/users/register",
        None,
        registration("newbie", "newbie@example.com"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    assert_eq!(json["data"]["username"], "newbie");
    assert_eq!(json["data"]["is_active"], false);
    assert!(json["data"].get("password_hash").is_none());

    let user = UserRepo::find_by_username(&pool, "newbie").await.unwrap().unwrap();
    let profile = UserRepo::find_profile(&pool, user.id).await.unwrap().unwrap();
    assert_eq!(profile.timezone, "Europe/Warsaw");

    // Not activated yet.
    let response = get_auth(app, "/api/v1/users/me", "newbie").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_duplicate_email(pool: PgPool) {
    create_user(&pool, "taken").await;
    let app = common::build_test_app(pool).await;

    let response = post_json(
        app,
        "/api/v1/users/register",
        None,
        registration("someone", "TAKEN@example.com"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Account with this e-mail address already exists.");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_rejects_duplicate_username(pool: PgPool) {
    create_user(&pool, "taken").await;
    let app = common::build_test_app(pool).await;

    let response = post_json(
        app,
        "/api/v1/users/register",
        None,
        registration("taken", "other@example.com"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn register_validates_form(pool: PgPool) {
    let app = common::build_test_app(pool).await;

    let mut form = registration("newbie", "newbie@example.com");
    form["password2"] = json!("something-else");
    let response = post_json(app.clone(), "/api/v1/users/register", None, form).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let mut form = registration("newbie", "newbie@example.com");
    form["timezone"] = json!("Nowhere/Special");
    let response = post_json(app, "/api/v1/users/register", None, form).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn update_details_and_profile(pool: PgPool) {
    create_user(&pool, "user").await;
    create_user(&pool, "other").await;
    let app = common::build_test_app(pool).await;

    let response = put_json(
        app.clone(),
        "/api/v1/users/me",
        "user",
        json!({ "first_name": "Ada", "last_name": "Admin", "email": "ada@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["first_name"], "Ada");

    let response = put_json(
        app.clone(),
        "/api/v1/users/me",
        "user",
        json!({ "email": "other@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = put_json(
        app.clone(),
        "/api/v1/users/me/profile",
        "user",
        json!({ "timezone": "America/New_York", "is_public": true }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get_auth(app, "/api/v1/users/me", "user").await).await;
    assert_eq!(json["data"]["user"]["email"], "ada@example.com");
    assert_eq!(json["data"]["profile"]["timezone"], "America/New_York");
    assert_eq!(json["data"]["profile"]["is_public"], true);
}
