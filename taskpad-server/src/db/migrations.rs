//! Schema migrations, run on startup

use anyhow::{Context, Result};
use sqlx::SqlitePool;
use tracing::info;

pub async fn run_migrations(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            name       TEXT NOT NULL,
            email      TEXT NOT NULL UNIQUE,
            created_at INTEGER NOT NULL
        );
    "#,
    )
    .execute(pool)
    .await
    .context("failed to create users table")?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS todos (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id     INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
            title       TEXT NOT NULL,
            description TEXT,
            completed   INTEGER NOT NULL DEFAULT 0,
            created_at  INTEGER NOT NULL,
            updated_at  INTEGER NOT NULL
        );
    "#,
    )
    .execute(pool)
    .await
    .context("failed to create todos table")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_todos_user_id ON todos(user_id);")
        .execute(pool)
        .await
        .context("failed to create todos user_id index")?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_todos_created_at ON todos(created_at);")
        .execute(pool)
        .await
        .context("failed to create todos created_at index")?;

    info!("database migrations complete");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::connect_in_memory;

    #[tokio::test]
    async fn migrations_are_idempotent() {
        let pool = connect_in_memory().await.expect("pool");
        run_migrations(&pool).await.expect("first run");
        run_migrations(&pool).await.expect("second run");
    }

    #[tokio::test]
    async fn cascade_is_declared() {
        let pool = connect_in_memory().await.expect("pool");
        run_migrations(&pool).await.expect("migrations");

        let (on_delete,): (String,) =
            sqlx::query_as("SELECT on_delete FROM pragma_foreign_key_list('todos')")
                .fetch_one(&pool)
                .await
                .expect("pragma");

        assert_eq!(on_delete, "CASCADE");
    }
}
