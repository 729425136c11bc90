//! Schema-wide convention checks against information_schema, so a migration
//! that drifts from the house rules fails here rather than in code review.

use sqlx::PgPool;

/// All `id` columns are bigint, except `projects` which uses uuid.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_pks_are_correct_type(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, data_type
         FROM information_schema.columns
         WHERE column_name = 'id'
           AND table_schema = 'public'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    let violations: Vec<_> = rows
        .iter()
        .filter(|(table, data_type)| {
            let expected = if table == "projects" { "uuid" } else { "bigint" };
            data_type != expected
        })
        .collect();
    assert!(violations.is_empty(), "Unexpected pk types: {violations:?}");
}

/// Every table carries `created_at` and `updated_at` as timestamptz.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_tables_have_timestamps(pool: PgPool) {
    // One set-based probe: tables crossed with the two expected columns,
    // keeping the pairs that are missing or mistyped.
    let missing: Vec<(String, String)> = sqlx::query_as(
        "SELECT t.table_name, want.column_name
         FROM information_schema.tables t
         CROSS JOIN (VALUES ('created_at'), ('updated_at')) AS want(column_name)
         WHERE t.table_schema = 'public'
           AND t.table_type = 'BASE TABLE'
           AND t.table_name != '_sqlx_migrations'
           AND NOT EXISTS (
               SELECT 1
               FROM information_schema.columns c
               WHERE c.table_schema = t.table_schema
                 AND c.table_name = t.table_name
                 AND c.column_name = want.column_name
                 AND c.data_type = 'timestamp with time zone')
         ORDER BY t.table_name, want.column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(
        missing.is_empty(),
        "Tables missing timestamptz audit columns: {missing:?}"
    );
}

/// TEXT everywhere; no `character varying` columns.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_no_varchar_columns(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT table_name, column_name
         FROM information_schema.columns
         WHERE table_schema = 'public'
           AND data_type = 'character varying'
           AND table_name != '_sqlx_migrations'
         ORDER BY table_name, column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(rows.is_empty(), "VARCHAR columns found (use TEXT): {rows:?}");
}

/// Every foreign key column is covered by an index.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_fks_have_indexes(pool: PgPool) {
    let fk_columns: Vec<(String, String)> = sqlx::query_as(
        "SELECT DISTINCT tc.table_name, kcu.column_name
         FROM information_schema.table_constraints tc
         JOIN information_schema.key_column_usage kcu
             ON tc.constraint_name = kcu.constraint_name
             AND tc.table_schema = kcu.table_schema
         WHERE tc.constraint_type = 'FOREIGN KEY'
           AND tc.table_schema = 'public'
         ORDER BY tc.table_name, kcu.column_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();
    assert!(!fk_columns.is_empty(), "Expected foreign keys in the schema");

    let mut unindexed = Vec::new();
    for (table, column) in &fk_columns {
        // Leading-column match only; an index on (a, b) does not serve
        // lookups by b alone.
        let covered: (bool,) = sqlx::query_as(&format!(
            "SELECT EXISTS (
                SELECT 1
                FROM pg_indexes
                WHERE schemaname = 'public'
                  AND tablename = '{table}'
                  AND indexdef LIKE '%({column}%'
            )"
        ))
        .fetch_one(&pool)
        .await
        .unwrap();

        if !covered.0 {
            unindexed.push(format!("{table}.{column}"));
        }
    }
    assert!(unindexed.is_empty(), "FK columns without an index: {unindexed:?}");
}

/// Every foreign key names an intentional ON DELETE rule.
///
/// Postgres reports an omitted rule as NO ACTION; every relationship in this
/// schema is supposed to choose CASCADE, RESTRICT, or SET NULL explicitly.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_all_fks_have_explicit_delete_rules(pool: PgPool) {
    let defaulted: Vec<(String, String)> = sqlx::query_as(
        "SELECT tc.table_name, rc.constraint_name
         FROM information_schema.referential_constraints rc
         JOIN information_schema.table_constraints tc
             ON rc.constraint_name = tc.constraint_name
             AND rc.constraint_schema = tc.table_schema
         WHERE rc.constraint_schema = 'public'
           AND rc.delete_rule = 'NO ACTION'
         ORDER BY tc.table_name, rc.constraint_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert!(
        defaulted.is_empty(),
        "FKs with the implicit NO ACTION delete rule: {defaulted:?}"
    );
}

/// Every UNIQUE constraint carries the `uq_` prefix.
///
/// The API layer maps unique violations to 409 responses by matching this
/// prefix on the constraint name, so an unprefixed constraint would surface
/// as a 500 instead.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unique_constraints_use_uq_prefix(pool: PgPool) {
    let rows: Vec<(String, String)> = sqlx::query_as(
        "SELECT tc.table_name, tc.constraint_name
         FROM information_schema.table_constraints tc
         WHERE tc.constraint_type = 'UNIQUE'
           AND tc.table_schema = 'public'
         ORDER BY tc.table_name, tc.constraint_name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();
    assert!(!rows.is_empty(), "Expected UNIQUE constraints in the schema");

    let unprefixed: Vec<_> = rows
        .iter()
        .filter(|(_, constraint)| !constraint.starts_with("uq_"))
        .collect();
    assert!(
        unprefixed.is_empty(),
        "UNIQUE constraints not named uq_*: {unprefixed:?}"
    );
}
