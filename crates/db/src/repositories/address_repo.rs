//! Repository for the `addresses` table.

use atelier_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::address::{Address, CreateAddress};
use crate::store::{self, ListSpec, Table};

impl Table for Address {
    type Key = DbId;
    const TABLE: &'static str = "addresses";
    const COLUMNS: &'static str = "id, street, postal_code, city, created_at, updated_at";
}

/// Provides CRUD queries for addresses.
pub struct AddressRepo;

impl AddressRepo {
    /// Insert a new address, returning the created row.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateAddress,
    ) -> Result<Address, sqlx::Error> {
        let query = format!(
            "INSERT INTO addresses (street, postal_code, city)
             VALUES ($1, $2, $3)
             RETURNING {}",
            Address::COLUMNS
        );
        sqlx::query_as::<_, Address>(&query)
            .bind(&input.street)
            .bind(&input.postal_code)
            .bind(&input.city)
            .fetch_one(executor)
            .await
    }

    /// Find an address by its primary key.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Address>, sqlx::Error> {
        store::find_by_id::<Address>(executor, id).await
    }

    /// List all addresses by city.
    pub async fn list(executor: impl PgExecutor<'_>) -> Result<Vec<Address>, sqlx::Error> {
        store::list::<Address>(executor, &ListSpec::by("city")).await
    }

    /// Write an address row back in full.
    ///
    /// Returns `None` if no row with the given id exists.
    pub async fn update(
        executor: impl PgExecutor<'_>,
        address: &Address,
    ) -> Result<Option<Address>, sqlx::Error> {
        let query = format!(
            "UPDATE addresses
             SET street = $2, postal_code = $3, city = $4
             WHERE id = $1
             RETURNING {}",
            Address::COLUMNS
        );
        sqlx::query_as::<_, Address>(&query)
            .bind(address.id)
            .bind(&address.street)
            .bind(&address.postal_code)
            .bind(&address.city)
            .fetch_optional(executor)
            .await
    }

    /// Delete an address by id. Returns `true` if a row was removed.
    pub async fn delete(executor: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        store::delete_by_id::<Address>(executor, id).await
    }
}
