//! PostgreSQL persistence handle.
//!
//! # Design
//! `Database` owns the process-wide pool and is built once in `main`.
//! Every `TodoStore` call opens its own `Session`, a transaction on a pooled
//! connection. A session that goes out of scope without `commit` is rolled
//! back and its connection returned to the pool, so not-found and error
//! paths release it the same way success does.

use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{FromRow, Postgres, Transaction};

use super::{StoreError, TodoStore};
use crate::config::DatabaseConfig;
use crate::todo::{NewTodo, Todo, TodoId, TodoPatch};

const CREATE_TODOS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS todos (
        id          BIGSERIAL PRIMARY KEY,
        title       TEXT      NOT NULL,
        description TEXT,
        completed   BOOLEAN   NOT NULL DEFAULT FALSE
    )
"#;

/// On-disk shape of a `todos` row.
#[derive(Debug, FromRow)]
struct TodoRow {
    id: i64,
    title: String,
    description: Option<String>,
    completed: bool,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Todo {
            id: row.id,
            title: row.title,
            description: row.description,
            completed: row.completed,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Build the shared pool. Fails if the first connection cannot be made.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.url)
            .await?;
        tracing::info!(
            max_connections = config.max_connections,
            "database pool ready"
        );
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `todos` table if it is missing. Not guarded against
    /// concurrent migrations.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(CREATE_TODOS_TABLE).execute(&self.pool).await?;
        Ok(())
    }

    /// Open a session. The caller either commits it or lets it drop.
    pub async fn acquire(&self) -> Result<Session, StoreError> {
        let tx = self.pool.begin().await?;
        tracing::debug!("session acquired");
        Ok(Session { tx })
    }

    /// Close every pooled connection. Sessions acquired afterwards fail.
    pub async fn close(&self) {
        self.pool.close().await;
        tracing::info!("database pool closed");
    }
}

/// One unit of work against the `todos` table.
pub struct Session {
    tx: Transaction<'static, Postgres>,
}

impl Session {
    /// No `ORDER BY`: rows come back in whatever order Postgres yields.
    pub async fn fetch_all(&mut self) -> Result<Vec<Todo>, StoreError> {
        let rows: Vec<TodoRow> =
            sqlx::query_as("SELECT id, title, description, completed FROM todos")
                .fetch_all(&mut *self.tx)
                .await?;
        Ok(rows.into_iter().map(Todo::from).collect())
    }

    pub async fn find(&mut self, id: TodoId) -> Result<Option<Todo>, StoreError> {
        let row: Option<TodoRow> =
            sqlx::query_as("SELECT id, title, description, completed FROM todos WHERE id = $1")
                .bind(id)
                .fetch_optional(&mut *self.tx)
                .await?;
        Ok(row.map(Todo::from))
    }

    /// Insert and read back the stored row, including its new id.
    pub async fn insert(&mut self, new: &NewTodo) -> Result<Todo, StoreError> {
        let row: TodoRow = sqlx::query_as(
            r#"
            INSERT INTO todos (title, description, completed)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, completed
            "#,
        )
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.completed)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(row.into())
    }

    /// Write every mutable column of `todo` back to its row.
    pub async fn update(&mut self, todo: &Todo) -> Result<Todo, StoreError> {
        let row: Option<TodoRow> = sqlx::query_as(
            r#"
            UPDATE todos
            SET title = $2, description = $3, completed = $4
            WHERE id = $1
            RETURNING id, title, description, completed
            "#,
        )
        .bind(todo.id)
        .bind(&todo.title)
        .bind(&todo.description)
        .bind(todo.completed)
        .fetch_optional(&mut *self.tx)
        .await?;
        row.map(Todo::from).ok_or(StoreError::NotFound(todo.id))
    }

    pub async fn delete(&mut self, id: TodoId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&mut *self.tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    pub async fn commit(self) -> Result<(), StoreError> {
        self.tx.commit().await?;
        tracing::debug!("session committed");
        Ok(())
    }
}

#[async_trait]
impl TodoStore for Database {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        // Read-only; the session rolls back on drop.
        let mut session = self.acquire().await?;
        session.fetch_all().await
    }

    async fn create(&self, new: NewTodo) -> Result<Todo, StoreError> {
        let mut session = self.acquire().await?;
        let todo = session.insert(&new).await?;
        session.commit().await?;
        Ok(todo)
    }

    async fn update(&self, id: TodoId, patch: TodoPatch) -> Result<Todo, StoreError> {
        let mut session = self.acquire().await?;
        let mut todo = session.find(id).await?.ok_or(StoreError::NotFound(id))?;
        patch.apply(&mut todo);
        let todo = session.update(&todo).await?;
        session.commit().await?;
        Ok(todo)
    }

    async fn delete(&self, id: TodoId) -> Result<(), StoreError> {
        let mut session = self.acquire().await?;
        session.delete(id).await?;
        session.commit().await
    }
}
