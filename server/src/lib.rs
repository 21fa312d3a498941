//! HTTP backend for a todo list persisted in PostgreSQL.
//!
//! # Overview
//! `GET /todos`, `POST /todos`, `PUT /todos/{todo_id}` and
//! `DELETE /todos/{todo_id}` each map onto one store operation. `GET /`
//! only reports that the service is up.
//! Request bodies are validated by extractors before a handler runs, so an
//! invalid payload never reaches storage.
//!
//! # Design
//! - Handlers depend on `store::TodoStore`, injected through `AppState`.
//! - `store::Database` opens one transaction per call and releases it on
//!   every exit path.
//! - CORS is fully permissive. This is meant for testing, not for an
//!   exposed deployment.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod schemas;
pub mod state;
pub mod store;
pub mod telemetry;
pub mod todo;

use axum::{
    routing::{get, put},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use error::ApiError;
pub use state::AppState;
pub use store::{Database, MemoryStore, StoreError, TodoStore};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::root))
        .route("/todos", get(routes::list_todos).post(routes::create_todo))
        .route(
            "/todos/{todo_id}",
            put(routes::update_todo).delete(routes::delete_todo),
        )
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve on an already-bound listener until the process exits.
pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}
