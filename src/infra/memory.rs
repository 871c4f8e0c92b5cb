//! In-memory storage backend.
//!
//! Used by `serve --in-memory` and the integration tests. Transactions are
//! serialized behind one lock and work on a private copy of the state,
//! which replaces the shared state only when the closure succeeds.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::unit_of_work::{HealthCheck, TransactionContext, TxFuture, UnitOfWork};
use crate::domain::{Email, User, UserRepository};
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone)]
struct MemoryState {
    users: BTreeMap<i64, User>,
    next_id: i64,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self {
            users: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl MemoryState {
    fn email_taken_by_other(&self, email: &Email, id: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| u.email() == email && u.id() != id)
    }
}

fn duplicate_email(email: &Email) -> AppError {
    AppError::DuplicateEmail(format!("Email is already registered: {}", email))
}

/// Repository over one transaction's working copy.
pub struct MemoryUserRepository {
    state: Mutex<MemoryState>,
    read_only: bool,
}

impl MemoryUserRepository {
    fn new(state: MemoryState, read_only: bool) -> Self {
        Self {
            state: Mutex::new(state),
            read_only,
        }
    }

    fn ensure_writable(&self) -> AppResult<()> {
        if self.read_only {
            return Err(AppError::internal("Write attempted in a read-only transaction"));
        }
        Ok(())
    }

    fn into_state(self) -> MemoryState {
        self.state.into_inner()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn save(&self, user: &User) -> AppResult<User> {
        self.ensure_writable()?;
        let mut state = self.state.lock().await;

        if state.email_taken_by_other(user.email(), None) {
            return Err(duplicate_email(user.email()));
        }

        let id = state.next_id;
        let now = Utc::now();
        let stored = User::reconstitute(
            Some(id),
            user.name(),
            user.email().clone(),
            user.password().clone(),
            Some(now),
            Some(now),
        )?;

        state.next_id += 1;
        state.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.state.lock().await.users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>> {
        let state = self.state.lock().await;
        Ok(state.users.values().find(|u| u.email() == email).cloned())
    }

    async fn find_all(&self) -> AppResult<Vec<User>> {
        Ok(self.state.lock().await.users.values().cloned().collect())
    }

    async fn update(&self, user: &User) -> AppResult<User> {
        self.ensure_writable()?;
        let id = user
            .id()
            .ok_or_else(|| AppError::InvalidArgument("Cannot update a user without an ID".into()))?;

        let mut state = self.state.lock().await;
        let created_at = state
            .users
            .get(&id)
            .ok_or_else(|| AppError::not_found(format!("User not found: ID={}", id)))?
            .created_at();

        if state.email_taken_by_other(user.email(), Some(id)) {
            return Err(duplicate_email(user.email()));
        }

        let stored = User::reconstitute(
            Some(id),
            user.name(),
            user.email().clone(),
            user.password().clone(),
            created_at,
            Some(user.updated_at().unwrap_or_else(Utc::now)),
        )?;

        state.users.insert(id, stored.clone());
        Ok(stored)
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<()> {
        self.ensure_writable()?;
        match self.state.lock().await.users.remove(&id) {
            Some(_) => Ok(()),
            None => Err(AppError::not_found(format!("User not found: ID={}", id))),
        }
    }

    async fn exists_by_email(&self, email: &Email) -> AppResult<bool> {
        let state = self.state.lock().await;
        Ok(state.users.values().any(|u| u.email() == email))
    }
}

/// In-memory implementation of UnitOfWork
#[derive(Clone, Default)]
pub struct MemoryPersistence {
    state: Arc<Mutex<MemoryState>>,
}

impl MemoryPersistence {
    pub fn new() -> Self {
        Self::default()
    }

    async fn execute<F, T>(&self, read_only: bool, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let mut shared = self.state.lock().await;
        let users = MemoryUserRepository::new(shared.clone(), read_only);

        let result = f(TransactionContext::new(&users)).await;

        if result.is_ok() && !read_only {
            *shared = users.into_state();
        }
        result
    }
}

#[async_trait]
impl UnitOfWork for MemoryPersistence {
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute(false, f).await
    }

    async fn read_only<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        self.execute(true, f).await
    }
}

#[async_trait]
impl HealthCheck for MemoryPersistence {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
