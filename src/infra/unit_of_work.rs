//! Unit of Work pattern implementation.
//!
//! Manages transaction lifecycle and repository access. Every use case runs
//! inside exactly one transaction:
//! - the closure receives a [`TransactionContext`] whose repository is bound
//!   to the open transaction,
//! - `Ok` commits, `Err` rolls back; there is no path that leaves the
//!   transaction open.

use std::future::Future;
use std::pin::Pin;

use async_trait::async_trait;
use sea_orm::{AccessMode, DatabaseTransaction, IsolationLevel, TransactionTrait};

use super::db::Database;
use super::repositories::UserStore;
use crate::domain::UserRepository;
use crate::errors::{AppError, AppResult};

/// Boxed future returned by transactional closures.
pub type TxFuture<'a, T> = Pin<Box<dyn Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Note: This trait is not object safe due to generic methods; services
/// take it as a type parameter.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Execute a closure within a read-write transaction.
    ///
    /// The transaction is committed on success or rolled back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;

    /// Execute a closure within a read-only transaction.
    async fn read_only<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Storage liveness probe used by the health endpoint.
#[async_trait]
pub trait HealthCheck: Send + Sync {
    /// Short backend name for reporting
    fn backend(&self) -> &'static str;

    /// Check storage connectivity
    async fn ping(&self) -> AppResult<()>;
}

/// Transaction context providing repository access within a transaction.
///
/// All repository operations performed through this context are part
/// of the same transaction.
#[derive(Clone, Copy)]
pub struct TransactionContext<'a> {
    users: &'a dyn UserRepository,
}

impl<'a> TransactionContext<'a> {
    /// Create a new transaction context around a transaction-bound repository
    pub fn new(users: &'a dyn UserRepository) -> Self {
        Self { users }
    }

    /// Get user repository for this transaction
    pub fn users(&self) -> &'a dyn UserRepository {
        self.users
    }
}

/// PostgreSQL implementation of UnitOfWork
#[derive(Clone)]
pub struct Persistence {
    database: Database,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(database: Database) -> Self {
        Self { database }
    }

    /// Internal transaction execution with configurable isolation and access mode
    async fn execute_transaction<F, T>(
        &self,
        isolation: IsolationLevel,
        access: AccessMode,
        f: F,
    ) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn: DatabaseTransaction = self
            .database
            .connection()
            .begin_with_config(Some(isolation), Some(access))
            .await
            .map_err(AppError::from)?;

        let result = {
            let users = UserStore::new(&txn);
            f(TransactionContext::new(&users)).await
        };

        match result {
            Ok(value) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(value)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        // ReadCommitted; email uniqueness is enforced by the unique index
        self.execute_transaction(IsolationLevel::ReadCommitted, AccessMode::ReadWrite, f)
            .await
    }

    async fn read_only<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute_transaction(IsolationLevel::ReadCommitted, AccessMode::ReadOnly, f)
            .await
    }
}

#[async_trait]
impl HealthCheck for Persistence {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> AppResult<()> {
        self.database.ping().await.map_err(AppError::from)
    }
}

/// Simpler API for executing transactional operations.
///
/// ```rust,ignore
/// let user = with_transaction!(self.uow, |ctx| ctx.users().save(&user).await)?;
/// let users = with_transaction!(read_only self.uow, |ctx| ctx.users().find_all().await)?;
/// ```
#[macro_export]
macro_rules! with_transaction {
    (read_only $uow:expr, |$ctx:ident| $body:expr) => {
        $uow.read_only(|$ctx| Box::pin(async move { $body })).await
    };
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
