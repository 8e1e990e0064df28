//! Todo repository

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};

use taskpad_core::{datetime_to_ts, ts_to_datetime, NewTodo, Page, Todo, TodoPatch};

use super::DbError;

/// Todo record as stored (epoch-milliseconds timestamps, 0/1 completed).
#[derive(Debug, Clone, FromRow)]
struct TodoRow {
    id: i64,
    user_id: i64,
    title: String,
    description: Option<String>,
    completed: bool,
    created_at: i64,
    updated_at: i64,
}

impl From<TodoRow> for Todo {
    fn from(row: TodoRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            description: row.description,
            completed: row.completed,
            created_at: ts_to_datetime(row.created_at),
            updated_at: ts_to_datetime(row.updated_at),
        }
    }
}

const SELECT_TODO: &str =
    "SELECT id, user_id, title, description, completed, created_at, updated_at FROM todos";

/// Equality filters for todo listings. Absent fields match everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct TodoFilter {
    pub user_id: Option<i64>,
    pub completed: Option<bool>,
}

/// Todo repository
pub struct TodoRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> TodoRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List todos, newest first, with optional equality filters.
    ///
    /// The WHERE clause varies with the filters but every value is bound.
    pub async fn list(&self, filter: TodoFilter, page: Page) -> Result<Vec<Todo>, DbError> {
        let mut sql = format!("{SELECT_TODO} WHERE 1=1");
        if filter.user_id.is_some() {
            sql.push_str(" AND user_id = ?");
        }
        if filter.completed.is_some() {
            sql.push_str(" AND completed = ?");
        }
        sql.push_str(" ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?");

        let mut query = sqlx::query_as::<_, TodoRow>(&sql);
        if let Some(user_id) = filter.user_id {
            query = query.bind(user_id);
        }
        if let Some(completed) = filter.completed {
            query = query.bind(completed);
        }
        let rows = query
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(self.pool)
            .await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    /// Get a single todo by id.
    pub async fn get(&self, id: i64) -> Result<Todo, DbError> {
        let row: Option<TodoRow> = sqlx::query_as(&format!("{SELECT_TODO} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(Todo::from).ok_or(DbError::NotFound {
            resource: "todo",
            id,
        })
    }

    /// All todos owned by a user, unpaginated.
    ///
    /// Does not check that the user exists: an unknown user yields an
    /// empty list, while the create path rejects it. That asymmetry is
    /// part of the contract.
    pub async fn list_by_user(
        &self,
        user_id: i64,
        completed: Option<bool>,
    ) -> Result<Vec<Todo>, DbError> {
        let mut sql = format!("{SELECT_TODO} WHERE user_id = ?");
        if completed.is_some() {
            sql.push_str(" AND completed = ?");
        }
        sql.push_str(" ORDER BY created_at DESC, id DESC");

        let mut query = sqlx::query_as::<_, TodoRow>(&sql).bind(user_id);
        if let Some(completed) = completed {
            query = query.bind(completed);
        }
        let rows = query.fetch_all(self.pool).await?;

        Ok(rows.into_iter().map(Todo::from).collect())
    }

    /// Insert a todo after checking the owning user exists.
    pub async fn create(&self, new: NewTodo) -> Result<Todo, DbError> {
        let owner: Option<(i64,)> = sqlx::query_as("SELECT id FROM users WHERE id = ?")
            .bind(new.user_id)
            .fetch_optional(self.pool)
            .await?;
        if owner.is_none() {
            return Err(DbError::InvalidReference {
                message: "user not found".to_owned(),
            });
        }

        let now = datetime_to_ts(Utc::now());
        let result = sqlx::query(
            "INSERT INTO todos (user_id, title, description, completed, created_at, updated_at) \
             VALUES (?, ?, ?, 0, ?, ?)",
        )
        .bind(new.user_id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(now)
        .bind(now)
        .execute(self.pool)
        .await?;

        let id = result.last_insert_rowid();
        let row: Option<TodoRow> = sqlx::query_as(&format!("{SELECT_TODO} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(Todo::from)
            .ok_or(DbError::MissingRow { resource: "todo" })
    }

    /// Apply a partial update, refreshing `updated_at` when any field is
    /// applied. An empty patch returns the row untouched.
    pub async fn update(&self, id: i64, patch: TodoPatch) -> Result<Todo, DbError> {
        let current = self.get(id).await?;
        if patch.is_empty() {
            return Ok(current);
        }

        let title = patch.title.unwrap_or(current.title);
        let description = patch.description.or(current.description);
        let completed = patch.completed.unwrap_or(current.completed);
        let now = datetime_to_ts(Utc::now());

        sqlx::query(
            "UPDATE todos SET title = ?, description = ?, completed = ?, updated_at = ? \
             WHERE id = ?",
        )
        .bind(&title)
        .bind(&description)
        .bind(completed)
        .bind(now)
        .bind(id)
        .execute(self.pool)
        .await?;

        self.get(id).await
    }

    /// Delete a todo.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "todo",
                id,
            });
        }
        Ok(())
    }
}
