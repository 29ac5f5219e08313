//! Service layer
//!
//! One service per entity. Each owns the business rules for its entity and
//! runs every check-then-write sequence inside a single transaction.

pub mod alimento;
pub mod comanda;
pub mod despesa;

pub use alimento::AlimentoService;
pub use comanda::ComandaService;
pub use despesa::DespesaService;

use crate::db::repository::RepoError;
use crate::utils::AppResult;
use sqlx::pool::PoolConnection;
use sqlx::{Sqlite, SqlitePool, Transaction};

/// Check out a pooled connection for read-only work
async fn acquire(pool: &SqlitePool) -> AppResult<PoolConnection<Sqlite>> {
    Ok(pool.acquire().await.map_err(RepoError::from)?)
}

/// Open a write transaction. Dropping it without `commit` rolls back.
///
/// `BEGIN IMMEDIATE` takes the write lock up front, so concurrent writers
/// queue on `busy_timeout` instead of failing when a deferred read
/// transaction tries to upgrade.
async fn begin(pool: &SqlitePool) -> AppResult<Transaction<'static, Sqlite>> {
    Ok(pool
        .begin_with("BEGIN IMMEDIATE")
        .await
        .map_err(RepoError::from)?)
}

async fn commit(tx: Transaction<'static, Sqlite>) -> AppResult<()> {
    Ok(tx.commit().await.map_err(RepoError::from)?)
}
