//! HTTP-level tests for host and network search.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, create_user, get_auth, post_json};
use serde_json::{json, Value};
use sqlx::PgPool;

async fn search(app: Router, query: &str) -> Value {
    body_json(get_auth(app, &format!("/api/v1/search?{query}"), "user").await).await
}

fn names(json: &Value) -> Vec<String> {
    json["data"]["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_hosts_and_networks(pool: PgPool) {
    create_user(&pool, "user").await;
    create_user(&pool, "other").await;
    let app = common::build_test_app(pool).await;

    for (uri, username, body) in [
        ("/api/v1/hosts", "user", json!({ "name": "mail relay", "ipv4": "10.1.0.5" })),
        ("/api/v1/hosts", "user", json!({ "name": "web frontend", "ipv4": "10.2.0.7" })),
        ("/api/v1/networks", "user", json!({ "name": "mail cluster" })),
        ("/api/v1/hosts", "other", json!({ "name": "mail other" })),
    ] {
        let response = post_json(app.clone(), uri, Some(username), body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let json = body_json(get_auth(app.clone(), "/api/v1/search?q=mai", "user").await).await;
    assert_eq!(json["data"]["total_count"], 2);
    let kinds: Vec<_> = json["data"]["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["kind"].as_str().unwrap().to_string())
        .collect();
    assert!(kinds.contains(&"host".to_string()));
    assert!(kinds.contains(&"network".to_string()));

    let json = body_json(get_auth(app.clone(), "/api/v1/search?q=mail&kinds=network", "user").await).await;
    assert_eq!(json["data"]["total_count"], 1);
    assert_eq!(json["data"]["results"][0]["name"], "mail cluster");

    let json = body_json(get_auth(app.clone(), "/api/v1/search?q=10.2", "user").await).await;
    assert_eq!(json["data"]["results"][0]["name"], "web frontend");

    let response = get_auth(app, "/api/v1/search?q=mail&kinds=user", "user").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn search_terms_match_across_fields(pool: PgPool) {
    create_user(&pool, "user").await;
    let app = common::build_test_app(pool).await;

    for body in [
        json!({ "name": "db", "ipv4": "10.0.0.1" }),
        json!({ "name": "db replica", "ipv4": "192.168.1.2" }),
        json!({ "name": "cache", "ipv4": "10.0.0.9", "ipv6": "FE80::9" }),
    ] {
        let response = post_json(app.clone(), "/api/v1/hosts", Some("user"), body).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Name term and address term on the same host.
    let json = search(app.clone(), "q=db+10.0").await;
    assert_eq!(json["data"]["total_count"], 1);
    assert_eq!(names(&json), vec!["db"]);

    // Two address terms, ipv6 matched case-insensitively.
    let json = search(app.clone(), "q=10.0+fe80").await;
    assert_eq!(names(&json), vec!["cache"]);

    // Every term has to match something.
    let json = search(app, "q=db+172.16").await;
    assert_eq!(json["data"]["total_count"], 0);
}
