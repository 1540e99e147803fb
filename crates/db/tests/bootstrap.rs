use sqlx::PgPool;

/// Connect, migrate, verify schema.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    hostwatch_db::health_check(&pool).await.unwrap();

    let tables = [
        "users",
        "user_profiles",
        "hosts",
        "networks",
        "network_hosts",
        "event_type_categories",
        "event_types",
        "events",
        "event_comments",
        "notifications",
        "plugin_settings",
        "dashboards",
        "widget_settings",
    ];

    for table in tables {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}
