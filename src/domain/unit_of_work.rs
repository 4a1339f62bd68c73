//! Transaction boundary for multi-step writes.
//!
//! A [`UnitOfWork`] opens a [`Transaction`]; [`run_in_transaction`] hands it to
//! a closure and commits on success or rolls back on failure. Writes made
//! through the transaction become visible to other sessions only on commit.
//!
//! [`Database`] ties it together: pooled sessions for single reads and a
//! unit of work whose transactions expose the full repository surface.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;

use crate::domain::repositories::Session;
use crate::error::AppError;

/// Boxed future returned by transactional closures.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// An open transaction.
#[async_trait]
pub trait Transaction: Send + Sized {
    async fn commit(self) -> Result<(), AppError>;

    async fn rollback(self) -> Result<(), AppError>;
}

/// Source of transactions.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    type Tx: Transaction;

    async fn begin(&self) -> Result<Self::Tx, AppError>;
}

/// Handle to the backing store.
///
/// Cheap to clone; clones share the underlying pool.
#[async_trait]
pub trait Database: UnitOfWork<Tx: Session> + Clone + 'static {
    type Conn: Session;

    /// Acquires a non-transactional session for reads and single writes.
    async fn connection(&self) -> Result<Self::Conn, AppError>;

    /// Round-trips to the store to prove it is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}

/// Runs `work` inside a fresh transaction.
///
/// Commits when `work` returns `Ok`. On `Err` the transaction is rolled back
/// and the original error is returned; if the rollback fails too, both are
/// combined into [`AppError::TransactionFailed`].
pub async fn run_in_transaction<U, T, F>(uow: &U, work: F) -> Result<T, AppError>
where
    U: UnitOfWork + ?Sized,
    T: Send,
    F: for<'t> FnOnce(&'t mut U::Tx) -> BoxFuture<'t, Result<T, AppError>> + Send,
{
    let mut tx = uow.begin().await?;

    match work(&mut tx).await {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => match tx.rollback().await {
            Ok(()) => Err(err),
            Err(rollback_err) => {
                tracing::error!(error = %err, rollback_error = %rollback_err, "Rollback failed");
                Err(AppError::transaction_failed(err, rollback_err))
            }
        },
    }
}
