//! HTTP-level tests for hosts and Basic authentication.

mod common;

use axum::http::header::WWW_AUTHENTICATE;
use axum::http::StatusCode;
use common::{
    basic_auth_with, body_json, create_user, create_user_with, delete, get, get_auth,
    get_with_header, post_json, put_json,
};
use hostwatch_db::models::host::CreateHost;
use hostwatch_db::repositories::HostRepo;
use serde_json::json;
use sqlx::PgPool;

async fn seed_hosts(pool: &PgPool, user_id: i64, count: i32) {
    for i in 0..count {
        HostRepo::create(
            pool,
            user_id,
            &CreateHost {
                name: format!("host_{i}"),
                description: Some(format!("description number {i}")),
                ipv4: Some(format!("127.0.0.{}", i + 1)),
                ipv6: Some(format!("0:0:0:0:0:0:7f00:{}", i + 1)),
                timezone: None,
            },
        )
        .await
        .unwrap();
    }
}

// ---------------------------------------------------------------------------
// Authentication
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn missing_credentials_get_basic_challenge(pool: PgPool) {
    let app = common::build_test_app(pool).await;
    let response = get(app, "/api/v1/hosts/list").await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let challenge = response.headers().get(WWW_AUTHENTICATE).unwrap();
    assert!(challenge.to_str().unwrap().starts_with("Basic"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn wrong_password_is_rejected(pool: PgPool) {
    create_user(&pool, "user").await;
    let app = common::build_test_app(pool).await;

    let response = get_with_header(
        app,
        "/api/v1/hosts/list",
        &basic_auth_with("user", "not-the-password"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn inactive_user_is_rejected(pool: PgPool) {
    create_user_with(&pool, "sleeper", false, "").await;
    let app = common::build_test_app(pool).await;

    let response = get_auth(app, "/api/v1/hosts/list", "sleeper").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Invalid credentials");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn non_basic_scheme_is_rejected(pool: PgPool) {
    create_user(&pool, "user").await;
    let app = common::build_test_app(pool).await;

    let response = get_with_header(app, "/api/v1/hosts/list", "Bearer abc").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Hosts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn host_list_and_details(pool: PgPool) {
    let user_id = create_user(&pool, "user").await;
    seed_hosts(&pool, user_id, 10).await;
    let app = common::build_test_app(pool).await;

    let response = get_auth(app.clone(), "/api/v1/hosts/list", "user").await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let hosts = json["hosts"].as_array().unwrap();
    assert_eq!(hosts.len(), 10);

    for host in hosts {
        assert!(host["name"].is_string());
        let uri = format!("/api/v1/hosts/{}", host["id"]);
        let response = get_auth(app.clone(), &uri, "user").await;
        assert_eq!(response.status(), StatusCode::OK);
        let detail = body_json(response).await;
        assert_eq!(detail["host_id"], host["id"]);
        assert_eq!(detail["name"], host["name"]);
        assert!(detail["ipv4"].as_str().unwrap().starts_with("127.0.0."));
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn hosts_of_other_users_are_hidden(pool: PgPool) {
    let owner = create_user(&pool, "owner").await;
    create_user(&pool, "intruder").await;
    seed_hosts(&pool, owner, 1).await;
    let host_id = HostRepo::list_for_user(&pool, owner).await.unwrap()[0].id;
    let app = common::build_test_app(pool).await;

    let response = get_auth(app.clone(), "/api/v1/hosts/list", "intruder").await;
    let json = body_json(response).await;
    assert!(json["hosts"].as_array().unwrap().is_empty());

    let uri = format!("/api/v1/hosts/{host_id}");
    let response = get_auth(app.clone(), &uri, "intruder").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(app, &uri, "intruder").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_update_delete_host(pool: PgPool) {
    create_user(&pool, "user").await;
    let app = common::build_test_app(pool).await;

    let response = post_json(
        app.clone(),
        "/api/v1/hosts",
        Some("user"),
        json!({ "name": "gateway", "ipv4": "10.0.0.1", "timezone": "Europe/Warsaw" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["timezone"], "Europe/Warsaw");
    let uri = format!("/api/v1/hosts/{}", created["host_id"]);

    let response = put_json(
        app.clone(),
        &uri,
        "user",
        json!({ "description": "edge router" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await;
    assert_eq!(updated["description"], "edge router");
    assert_eq!(updated["name"], "gateway");

    let response = delete(app.clone(), &uri, "user").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(app, &uri, "user").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn host_with_unknown_timezone_is_rejected(pool: PgPool) {
    create_user(&pool, "user").await;
    let app = common::build_test_app(pool).await;

    let response = post_json(
        app,
        "/api/v1/hosts",
        Some("user"),
        json!({ "name": "gateway", "timezone": "Mars/Olympus" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
