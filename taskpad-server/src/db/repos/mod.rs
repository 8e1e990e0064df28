//! Repository implementations for database access
//!
//! Each repository holds a pool reference and exposes one method per
//! operation. Every value reaching SQL is bound as a parameter; partial
//! updates are read-merge-write with a fixed UPDATE statement rather than
//! an assembled SET clause.

pub mod todos;
pub mod users;

pub use todos::{TodoFilter, TodoRepo};
pub use users::UserRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} {id}")]
    NotFound { resource: &'static str, id: i64 },

    #[error("conflict: {message}")]
    Conflict { message: String },

    #[error("invalid reference: {message}")]
    InvalidReference { message: String },

    #[error("row missing after insert: {resource}")]
    MissingRow { resource: &'static str },
}

/// True when the error is a UNIQUE constraint violation.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

#[cfg(test)]
pub(crate) async fn test_pool() -> sqlx::SqlitePool {
    let pool = crate::db::pool::connect_in_memory().await.expect("pool");
    crate::db::migrations::run_migrations(&pool)
        .await
        .expect("migrations");
    pool
}
