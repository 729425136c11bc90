use sqlx::PgPool;

/// Full bootstrap test: connect, migrate, verify seed data.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    // Health check
    atelier_db::health_check(&pool).await.unwrap();

    // Both lookup tables must carry their seed rows.
    let roles: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM roles")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(roles.0, 4, "roles should be seeded");

    let statuses: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM statuses")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(statuses.0, 4, "statuses should be seeded");
}

/// Seeded role names must match the constants authorization keys on.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_seeded_roles_match_constants(pool: PgPool) {
    let names: Vec<(String,)> = sqlx::query_as("SELECT name FROM roles ORDER BY id")
        .fetch_all(&pool)
        .await
        .unwrap();
    let names: Vec<&str> = names.iter().map(|(n,)| n.as_str()).collect();
    assert_eq!(names, atelier_core::roles::SEEDED_ROLES);
}

/// The updated_at trigger must fire on every UPDATE.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_trigger_fires(pool: PgPool) {
    let before: (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("SELECT updated_at FROM statuses WHERE name = 'On Hold'")
            .fetch_one(&pool)
            .await
            .unwrap();

    sqlx::query("UPDATE statuses SET name = 'Paused' WHERE name = 'On Hold'")
        .execute(&pool)
        .await
        .unwrap();

    let after: (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("SELECT updated_at FROM statuses WHERE name = 'Paused'")
            .fetch_one(&pool)
            .await
            .unwrap();

    assert!(after.0 > before.0, "updated_at should move forward");
}
