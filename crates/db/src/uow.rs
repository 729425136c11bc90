//! Per-request transaction boundary.
//!
//! A [`UnitOfWork`] wraps the connection pool and at most one open
//! transaction. Services open one unit per business operation: writes go
//! through [`tx`](UnitOfWork::tx) so they stay invisible until
//! [`commit`](UnitOfWork::commit), and an early return (`?`) drops the
//! unit, which rolls the transaction back.

use sqlx::{PgConnection, PgPool, Postgres, Transaction};

pub struct UnitOfWork {
    pool: PgPool,
    tx: Option<Transaction<'static, Postgres>>,
}

impl UnitOfWork {
    pub fn new(pool: PgPool) -> Self {
        Self { pool, tx: None }
    }

    /// The underlying pool, for reads that do not need the transaction.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Open a transaction if none is active.
    ///
    /// Calling `begin` while a transaction is already open is a no-op;
    /// the open transaction keeps collecting writes.
    pub async fn begin(&mut self) -> Result<(), sqlx::Error> {
        if self.tx.is_none() {
            self.tx = Some(self.pool.begin().await?);
        }
        Ok(())
    }

    /// Executor joined to the active transaction, opening one if needed.
    ///
    /// Every statement executed through the returned connection is
    /// uncommitted until [`commit`](UnitOfWork::commit).
    pub async fn tx(&mut self) -> Result<&mut PgConnection, sqlx::Error> {
        if self.tx.is_none() {
            self.tx = Some(self.pool.begin().await?);
        }
        let Some(tx) = self.tx.as_mut() else {
            unreachable!("transaction opened above")
        };
        Ok(&mut **tx)
    }

    /// Commit the active transaction, making all writes durable at once.
    /// No-op when none is open.
    pub async fn commit(&mut self) -> Result<(), sqlx::Error> {
        if let Some(tx) = self.tx.take() {
            tx.commit().await?;
        }
        Ok(())
    }

    /// Roll back the active transaction, discarding every staged write.
    /// No-op when none is open.
    pub async fn rollback(&mut self) -> Result<(), sqlx::Error> {
        if let Some(tx) = self.tx.take() {
            tx.rollback().await?;
        }
        Ok(())
    }

    /// Whether a transaction is currently open.
    pub fn in_transaction(&self) -> bool {
        self.tx.is_some()
    }
}
