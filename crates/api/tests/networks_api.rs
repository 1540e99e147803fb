//! HTTP-level tests for networks and their member hosts.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, delete, get_auth, post_auth, post_json, put_json};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn create(app: axum::Router, username: &str, uri: &str, body: Value) -> Value {
    let response = post_json(app, uri, Some(username), body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn network_crud_and_membership(pool: PgPool) {
    create_user(&pool, "user").await;
    let app = common::build_test_app(pool).await;

    let network = create(
        app.clone(),
        "user",
        "/api/v1/networks",
        json!({ "name": "office", "description": "ground floor" }),
    )
    .await;
    let host = create(
        app.clone(),
        "user",
        "/api/v1/hosts",
        json!({ "name": "printer", "ipv4": "192.168.1.20" }),
    )
    .await;
    let network_id = &network["network_id"];
    let host_id = &host["host_id"];

    let json = body_json(get_auth(app.clone(), "/api/v1/networks/list", "user").await).await;
    assert_eq!(json["networks"][0]["name"], "office");

    let member_uri = format!("/api/v1/networks/{network_id}/hosts/{host_id}");
    let response = post_auth(app.clone(), &member_uri, "user").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["hosts"], json!([host_id]));

    // Adding twice is harmless.
    let response = post_auth(app.clone(), &member_uri, "user").await;
    assert_eq!(body_json(response).await["hosts"], json!([host_id]));

    let uri = format!("/api/v1/networks/{network_id}");
    let response = put_json(app.clone(), &uri, "user", json!({ "name": "office-1" })).await;
    let json = body_json(response).await;
    assert_eq!(json["name"], "office-1");
    assert_eq!(json["description"], "ground floor");

    let response = delete(app.clone(), &member_uri, "user").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let json = body_json(get_auth(app.clone(), &uri, "user").await).await;
    assert_eq!(json["hosts"], json!([]));

    let response = delete(app.clone(), &uri, "user").await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let response = get_auth(app, &uri, "user").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn foreign_hosts_cannot_join(pool: PgPool) {
    create_user(&pool, "user").await;
    create_user(&pool, "other").await;
    let app = common::build_test_app(pool).await;

    let network = create(app.clone(), "user", "/api/v1/networks", json!({ "name": "lab" })).await;
    let host = create(app.clone(), "other", "/api/v1/hosts", json!({ "name": "theirs" })).await;

    let uri = format!(
        "/api/v1/networks/{}/hosts/{}",
        network["network_id"], host["host_id"]
    );
    let response = post_auth(app.clone(), &uri, "user").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_auth(app, &uri, "other").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn network_name_is_required(pool: PgPool) {
    create_user(&pool, "user").await;
    let app = common::build_test_app(pool).await;

    let response = post_json(app, "/api/v1/networks", Some("user"), json!({ "name": " " })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
