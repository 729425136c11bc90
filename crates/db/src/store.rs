//! Entity-agnostic query helpers.
//!
//! Every entity table implements [`Table`] (name, column list, key type),
//! which lets the lookups shared by all repositories live in one place.
//! Entity-specific queries stay in their repository module.

use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgExecutor, Postgres};

/// An entity table the generic helpers can query.
pub trait Table: for<'r> FromRow<'r, PgRow> + Send + Unpin {
    /// Primary key type: `DbId` everywhere except projects (UUID).
    type Key: for<'q> sqlx::Encode<'q, Postgres> + sqlx::Type<Postgres> + Send + 'static;

    /// Table name.
    const TABLE: &'static str;

    /// Column list shared across queries.
    const COLUMNS: &'static str;
}

/// Ordering and paging for [`list`].
///
/// `order_by` takes compile-time column names only, so it can be spliced
/// into SQL directly.
#[derive(Debug, Clone)]
pub struct ListSpec {
    pub order_by: &'static str,
    pub descending: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl ListSpec {
    /// Ascending order on a column, no paging.
    pub fn by(order_by: &'static str) -> Self {
        Self {
            order_by,
            descending: false,
            limit: None,
            offset: None,
        }
    }

    /// Most recently created rows first.
    pub fn newest_first() -> Self {
        Self {
            order_by: "created_at",
            descending: true,
            limit: None,
            offset: None,
        }
    }

    pub fn descending(mut self) -> Self {
        self.descending = true;
        self
    }

    pub fn paged(mut self, limit: i64, offset: i64) -> Self {
        self.limit = Some(limit);
        self.offset = Some(offset);
        self
    }
}

/// Fetch one row by primary key. `None` when no row matches.
pub async fn find_by_id<T: Table>(
    executor: impl PgExecutor<'_>,
    id: T::Key,
) -> Result<Option<T>, sqlx::Error> {
    let query = format!("SELECT {} FROM {} WHERE id = $1", T::COLUMNS, T::TABLE);
    sqlx::query_as::<_, T>(&query)
        .bind(id)
        .fetch_optional(executor)
        .await
}

/// List rows per `spec`.
pub async fn list<T: Table>(
    executor: impl PgExecutor<'_>,
    spec: &ListSpec,
) -> Result<Vec<T>, sqlx::Error> {
    let direction = if spec.descending { "DESC" } else { "ASC" };
    let mut query = format!(
        "SELECT {} FROM {} ORDER BY {} {direction}",
        T::COLUMNS,
        T::TABLE,
        spec.order_by
    );
    if let Some(limit) = spec.limit {
        query.push_str(&format!(" LIMIT {limit}"));
    }
    if let Some(offset) = spec.offset {
        query.push_str(&format!(" OFFSET {offset}"));
    }
    sqlx::query_as::<_, T>(&query).fetch_all(executor).await
}

/// Whether a row with this primary key exists.
pub async fn exists_by_id<T: Table>(
    executor: impl PgExecutor<'_>,
    id: T::Key,
) -> Result<bool, sqlx::Error> {
    let query = format!("SELECT EXISTS (SELECT 1 FROM {} WHERE id = $1)", T::TABLE);
    sqlx::query_scalar::<_, bool>(&query)
        .bind(id)
        .fetch_one(executor)
        .await
}

/// Total row count.
pub async fn count<T: Table>(executor: impl PgExecutor<'_>) -> Result<i64, sqlx::Error> {
    let query = format!("SELECT COUNT(*) FROM {}", T::TABLE);
    sqlx::query_scalar::<_, i64>(&query).fetch_one(executor).await
}

/// Delete one row by primary key. `true` when a row was removed.
pub async fn delete_by_id<T: Table>(
    executor: impl PgExecutor<'_>,
    id: T::Key,
) -> Result<bool, sqlx::Error> {
    let query = format!("DELETE FROM {} WHERE id = $1", T::TABLE);
    let result = sqlx::query(&query).bind(id).execute(executor).await?;
    Ok(result.rows_affected() > 0)
}
