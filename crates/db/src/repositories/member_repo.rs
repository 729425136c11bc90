//! Repository for the `members` table.

use atelier_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::member::{CreateMember, Member};
use crate::store::{self, ListSpec, Table};

impl Table for Member {
    type Key = DbId;
    const TABLE: &'static str = "members";
    const COLUMNS: &'static str = "id, first_name, last_name, email, phone, date_of_birth, \
         image_path, role_id, address_id, user_id, created_at, updated_at";
}

/// Provides CRUD and search queries for team members.
pub struct MemberRepo;

impl MemberRepo {
    /// Insert a new member, returning the created row.
    pub async fn create(
        executor: impl PgExecutor<'_>,
        input: &CreateMember,
    ) -> Result<Member, sqlx::Error> {
        let query = format!(
            "INSERT INTO members
                (first_name, last_name, email, phone, date_of_birth,
                 image_path, role_id, address_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {}",
            Member::COLUMNS
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.email)
            .bind(&input.phone)
            .bind(input.date_of_birth)
            .bind(&input.image_path)
            .bind(input.role_id)
            .bind(input.address_id)
            .fetch_one(executor)
            .await
    }

    /// Find a member by its primary key.
    pub async fn find_by_id(
        executor: impl PgExecutor<'_>,
        id: DbId,
    ) -> Result<Option<Member>, sqlx::Error> {
        store::find_by_id::<Member>(executor, id).await
    }

    /// Fetch the members matching a set of ids. Unknown ids are skipped.
    pub async fn find_by_ids(
        executor: impl PgExecutor<'_>,
        ids: &[DbId],
    ) -> Result<Vec<Member>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM members WHERE id = ANY($1) ORDER BY last_name ASC, first_name ASC",
            Member::COLUMNS
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(ids)
            .fetch_all(executor)
            .await
    }

    /// Find the member linked to a user account, if any.
    pub async fn find_by_user(
        executor: impl PgExecutor<'_>,
        user_id: DbId,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!(
            "SELECT {} FROM members WHERE user_id = $1",
            Member::COLUMNS
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(user_id)
            .fetch_optional(executor)
            .await
    }

    /// Find a member by exact email.
    pub async fn find_by_email(
        executor: impl PgExecutor<'_>,
        email: &str,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!("SELECT {} FROM members WHERE email = $1", Member::COLUMNS);
        sqlx::query_as::<_, Member>(&query)
            .bind(email)
            .fetch_optional(executor)
            .await
    }

    /// Case-insensitive substring search over first name, last name and
    /// email. A blank term returns the full set.
    pub async fn search(
        executor: impl PgExecutor<'_>,
        term: &str,
    ) -> Result<Vec<Member>, sqlx::Error> {
        let trimmed = term.trim();
        if trimmed.is_empty() {
            return store::list::<Member>(executor, &ListSpec::by("last_name")).await;
        }
        let pattern = format!("%{trimmed}%");
        let query = format!(
            "SELECT {} FROM members
             WHERE first_name ILIKE $1 OR last_name ILIKE $1 OR email ILIKE $1
             ORDER BY last_name ASC, first_name ASC",
            Member::COLUMNS
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(&pattern)
            .fetch_all(executor)
            .await
    }

    /// Write a member row back in full.
    ///
    /// Returns `None` if no row with the given id exists.
    pub async fn update(
        executor: impl PgExecutor<'_>,
        member: &Member,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!(
            "UPDATE members
             SET first_name = $2, last_name = $3, email = $4, phone = $5,
                 date_of_birth = $6, image_path = $7, role_id = $8,
                 address_id = $9, user_id = $10
             WHERE id = $1
             RETURNING {}",
            Member::COLUMNS
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(member.id)
            .bind(&member.first_name)
            .bind(&member.last_name)
            .bind(&member.email)
            .bind(&member.phone)
            .bind(member.date_of_birth)
            .bind(&member.image_path)
            .bind(member.role_id)
            .bind(member.address_id)
            .bind(member.user_id)
            .fetch_optional(executor)
            .await
    }

    /// Delete a member by id. Returns `true` if a row was removed.
    pub async fn delete(executor: impl PgExecutor<'_>, id: DbId) -> Result<bool, sqlx::Error> {
        store::delete_by_id::<Member>(executor, id).await
    }

    /// Whether a member with this email exists, optionally ignoring one row.
    pub async fn email_taken(
        executor: impl PgExecutor<'_>,
        email: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM members
                WHERE email = $1 AND ($2::bigint IS NULL OR id <> $2)
            )",
        )
        .bind(email)
        .bind(exclude_id)
        .fetch_one(executor)
        .await
    }
}
