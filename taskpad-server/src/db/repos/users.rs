//! User repository

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};

use taskpad_core::{datetime_to_ts, ts_to_datetime, NewUser, Page, User, UserPatch};

use super::{is_unique_violation, DbError};

/// User record as stored (epoch-milliseconds timestamp).
#[derive(Debug, Clone, FromRow)]
struct UserRow {
    id: i64,
    name: String,
    email: String,
    created_at: i64,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            created_at: ts_to_datetime(row.created_at),
        }
    }
}

const SELECT_USER: &str = "SELECT id, name, email, created_at FROM users";

/// User repository
pub struct UserRepo<'a> {
    pool: &'a SqlitePool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List users, newest first.
    pub async fn list(&self, page: Page) -> Result<Vec<User>, DbError> {
        let rows: Vec<UserRow> = sqlx::query_as(&format!(
            "{SELECT_USER} ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(User::from).collect())
    }

    /// Get a single user by id.
    pub async fn get(&self, id: i64) -> Result<User, DbError> {
        let row: Option<UserRow> = sqlx::query_as(&format!("{SELECT_USER} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(User::from).ok_or(DbError::NotFound {
            resource: "user",
            id,
        })
    }

    /// Insert a user and read it back by its generated id.
    pub async fn create(&self, new: NewUser) -> Result<User, DbError> {
        let now = datetime_to_ts(Utc::now());

        let result = sqlx::query("INSERT INTO users (name, email, created_at) VALUES (?, ?, ?)")
            .bind(&new.name)
            .bind(&new.email)
            .bind(now)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DbError::Conflict {
                        message: format!("email '{}' already exists", new.email),
                    }
                } else {
                    DbError::Sqlx(e)
                }
            })?;

        let id = result.last_insert_rowid();
        let row: Option<UserRow> = sqlx::query_as(&format!("{SELECT_USER} WHERE id = ?"))
            .bind(id)
            .fetch_optional(self.pool)
            .await?;

        row.map(User::from)
            .ok_or(DbError::MissingRow { resource: "user" })
    }

    /// Apply a partial update. An empty patch returns the row unchanged.
    pub async fn update(&self, id: i64, patch: UserPatch) -> Result<User, DbError> {
        let current = self.get(id).await?;
        if patch.is_empty() {
            return Ok(current);
        }

        let name = patch.name.unwrap_or(current.name);
        let email = patch.email.unwrap_or(current.email);

        sqlx::query("UPDATE users SET name = ?, email = ? WHERE id = ?")
            .bind(&name)
            .bind(&email)
            .bind(id)
            .execute(self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    DbError::Conflict {
                        message: format!("email '{email}' already exists"),
                    }
                } else {
                    DbError::Sqlx(e)
                }
            })?;

        self.get(id).await
    }

    /// Delete a user. Owned todos go with it via the storage cascade.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::NotFound {
                resource: "user",
                id,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::test_pool;

    #[tokio::test]
    async fn create_then_get_returns_equal_entity() {
        let pool = test_pool().await;
        let repo = UserRepo::new(&pool);

        let created = repo
            .create(NewUser::new("Ann", "ann@x.com").unwrap())
            .await
            .unwrap();
        let fetched = repo.get(created.id).await.unwrap();

        assert_eq!(created, fetched);
        assert_eq!(fetched.name, "Ann");
        assert_eq!(fetched.email, "ann@x.com");
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict_and_first_survives() {
        let pool = test_pool().await;
        let repo = UserRepo::new(&pool);

        let first = repo
            .create(NewUser::new("Ann", "ann@x.com").unwrap())
            .await
            .unwrap();
        let err = repo
            .create(NewUser::new("Impostor", "ann@x.com").unwrap())
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::Conflict { .. }));
        assert_eq!(repo.get(first.id).await.unwrap().name, "Ann");
    }

    #[tokio::test]
    async fn get_missing_is_not_found() {
        let pool = test_pool().await;
        let err = UserRepo::new(&pool).get(42).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::NotFound {
                resource: "user",
                id: 42
            }
        ));
    }

    #[tokio::test]
    async fn empty_patch_returns_row_unchanged() {
        let pool = test_pool().await;
        let repo = UserRepo::new(&pool);

        let created = repo
            .create(NewUser::new("Ann", "ann@x.com").unwrap())
            .await
            .unwrap();
        let updated = repo
            .update(created.id, UserPatch::default())
            .await
            .unwrap();

        assert_eq!(created, updated);
    }

    #[tokio::test]
    async fn partial_update_applies_only_provided_fields() {
        let pool = test_pool().await;
        let repo = UserRepo::new(&pool);

        let created = repo
            .create(NewUser::new("Ann", "ann@x.com").unwrap())
            .await
            .unwrap();
        let patch = UserPatch::new(Some("Annette".into()), None).unwrap();
        let updated = repo.update(created.id, patch).await.unwrap();

        assert_eq!(updated.name, "Annette");
        assert_eq!(updated.email, "ann@x.com");
        assert_eq!(updated.created_at, created.created_at);
    }

    #[tokio::test]
    async fn update_to_taken_email_is_conflict() {
        let pool = test_pool().await;
        let repo = UserRepo::new(&pool);

        repo.create(NewUser::new("Ann", "ann@x.com").unwrap())
            .await
            .unwrap();
        let bea = repo
            .create(NewUser::new("Bea", "bea@x.com").unwrap())
            .await
            .unwrap();

        let patch = UserPatch::new(None, Some("ann@x.com".into())).unwrap();
        let err = repo.update(bea.id, patch).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { .. }));
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let pool = test_pool().await;
        let err = UserRepo::new(&pool).delete(7).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    async fn list_pages_are_disjoint_and_ordered() {
        let pool = test_pool().await;
        let repo = UserRepo::new(&pool);

        for i in 0..5 {
            repo.create(NewUser::new(&format!("User {i}"), &format!("u{i}@x.com")).unwrap())
                .await
                .unwrap();
        }

        let all = repo.list(Page::default()).await.unwrap();
        assert_eq!(all.len(), 5);

        let first = repo.list(Page::new(2, 0)).await.unwrap();
        let second = repo.list(Page::new(2, 2)).await.unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
        assert_eq!(first, all[0..2].to_vec());
        assert_eq!(second, all[2..4].to_vec());
        assert!(first.iter().all(|u| !second.contains(u)));
    }
}
