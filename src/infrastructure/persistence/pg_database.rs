//! PostgreSQL pool handle and session types.

use std::ops::DerefMut;

use async_trait::async_trait;
use sqlx::pool::PoolConnection;
use sqlx::{PgConnection, PgPool, Postgres};

use crate::domain::unit_of_work::{Database, Transaction, UnitOfWork};
use crate::error::AppError;

/// Shared handle to the connection pool.
#[derive(Clone)]
pub struct PgDatabase {
    pool: PgPool,
}

impl PgDatabase {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Repository gateway bound to one executor.
///
/// `C` is either a pooled connection or an open transaction; both dereference
/// to a [`PgConnection`].
pub struct PgSession<C> {
    pub(super) conn: C,
}

impl<C> PgSession<C>
where
    C: DerefMut<Target = PgConnection> + Send,
{
    pub fn new(conn: C) -> Self {
        Self { conn }
    }
}

/// Session over a connection checked out from the pool.
pub type PgConnectionSession = PgSession<PoolConnection<Postgres>>;

/// Session over an open transaction.
pub type PgTransactionSession = PgSession<sqlx::Transaction<'static, Postgres>>;

#[async_trait]
impl Transaction for PgTransactionSession {
    async fn commit(self) -> Result<(), AppError> {
        self.conn.commit().await?;
        Ok(())
    }

    async fn rollback(self) -> Result<(), AppError> {
        self.conn.rollback().await?;
        Ok(())
    }
}

#[async_trait]
impl UnitOfWork for PgDatabase {
    type Tx = PgTransactionSession;

    async fn begin(&self) -> Result<Self::Tx, AppError> {
        let tx = self.pool.begin().await?;
        Ok(PgSession::new(tx))
    }
}

#[async_trait]
impl Database for PgDatabase {
    type Conn = PgConnectionSession;

    async fn connection(&self) -> Result<Self::Conn, AppError> {
        let conn = self.pool.acquire().await?;
        Ok(PgSession::new(conn))
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
