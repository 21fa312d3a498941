//! Persistence behind the HTTP handlers.
//!
//! # Design
//! Handlers only see `TodoStore`. `postgres::Database` is the production
//! implementation and opens one session per call; `memory::MemoryStore`
//! keeps rows in process for tests and database-less runs. Both apply
//! partial updates through `TodoPatch::apply`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::todo::{NewTodo, Todo, TodoId, TodoPatch};

pub use memory::MemoryStore;
pub use postgres::{Database, Session};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("todo {0} not found")]
    NotFound(TodoId),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

#[async_trait]
pub trait TodoStore: Send + Sync + 'static {
    /// Every todo, in whatever order the backing store yields them.
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;

    /// Insert a row and return it with its assigned id.
    async fn create(&self, new: NewTodo) -> Result<Todo, StoreError>;

    /// Apply `patch` to an existing row; `NotFound` if `id` is absent.
    async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Todo, StoreError>;

    /// Remove a row; `NotFound` if `id` is absent.
    async fn delete(&self, id: TodoId) -> Result<(), StoreError>;
}
