//! Repository for the `clients` table.

use atelier_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::client::{Client, CreateClient};
use crate::store::{self, ListSpec, Table};

impl Table for Client {
    type Key = DbId;
    const TABLE: &'static str = "clients";
    const COLUMNS: &'static str =
        "id, name, email, location, phone, image_path, created_at, updated_at";
}

/// Provides CRUD and uniqueness queries for clients.
pub struct ClientRepo;

impl ClientRepo {
    /// Insert a new client, returning the created row.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateClient,
    ) -> Result<Client, sqlx::Error> {
        let query = format!(
            "INSERT INTO clients (name, email, location, phone, image_path)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {}",
            Client::COLUMNS
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.location)
            .bind(&input.phone)
            .bind(&input.image_path)
            .fetch_one(executor)
            .await
    }

    /// Find a client by its primary key.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Client>, sqlx::Error> {
        store::find_by_id::<Client>(executor, id).await
    }

    /// Fetch the clients matching a set of ids. Unknown ids are skipped.
    pub async fn find_by_ids(
        executor: impl PgExecutor<'_>,
        ids: &[DbId],
    ) -> Result<Vec<Client>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM clients WHERE id = ANY($1)",
            Client::COLUMNS
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(ids)
            .fetch_all(executor)
            .await
    }

    /// List clients per `spec`.
    pub async fn list(
        executor: impl PgExecutor<'_>,
        spec: &ListSpec,
    ) -> Result<Vec<Client>, sqlx::Error> {
        store::list::<Client>(executor, spec).await
    }

    /// Write a client row back in full.
    ///
    /// Returns `None` if no row with the given id exists.
    pub async fn update(
        executor: impl PgExecutor<'_>,
        client: &Client,
    ) -> Result<Option<Client>, sqlx::Error> {
        let query = format!(
            "UPDATE clients
             SET name = $2, email = $3, location = $4, phone = $5, image_path = $6
             WHERE id = $1
             RETURNING {}",
            Client::COLUMNS
        );
        sqlx::query_as::<_, Client>(&query)
            .bind(client.id)
            .bind(&client.name)
            .bind(&client.email)
            .bind(&client.location)
            .bind(&client.phone)
            .bind(&client.image_path)
            .fetch_optional(executor)
            .await
    }

    /// Delete a client by id. Returns `true` if a row was removed.
    pub async fn delete(executor: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        store::delete_by_id::<Client>(executor, id).await
    }

    /// Whether a client with this exact name exists, optionally ignoring
    /// one row (the row being edited).
    pub async fn name_taken(
        executor: impl PgExecutor<'_>,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM clients
                WHERE name = $1 AND ($2::bigint IS NULL OR id <> $2)
            )",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(executor)
        .await
    }

    /// Whether a client with this email exists, optionally ignoring one row.
    pub async fn email_taken(
        executor: impl PgExecutor<'_>,
        email: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM clients
                WHERE email = $1 AND ($2::bigint IS NULL OR id <> $2)
            )",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(executor)
        .await
    }
}
