//! SQLite repository adapter.

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;
use uuid::Uuid;

use contacts_types::{
    Contact, ContactId, ContactRepository, CreateContactRequest, RepoError, UpdateContactRequest,
    UserId, UserProfile, domain::contact::validate_fields,
};

use crate::map_db_err;
use crate::types::{DbContact, DbUser};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            // Remove query parameters
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        let repo = Self { pool };
        repo.create_schema().await?;
        Ok(repo)
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Creates the database schema (idempotent).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        for (name, ddl) in [
            ("0001", include_str!("../migrations/0001_create_contacts.sql")),
            ("0002", include_str!("../migrations/0002_create_users.sql")),
        ] {
            for statement in ddl.split(';') {
                let stmt = statement.trim();
                if !stmt.is_empty() {
                    sqlx::query(stmt)
                        .execute(&self.pool)
                        .await
                        .map_err(|e| {
                            RepoError::Database(format!("Migration {} failed: {}", name, e))
                        })?;
                }
            }
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ContactRepository for SqliteRepo {
    async fn create_contact(
        &self,
        user_id: UserId,
        req: CreateContactRequest,
    ) -> Result<Contact, RepoError> {
        // Validate first
        validate_fields(&req.first_name, &req.last_name, &req.email)
            .map_err(RepoError::Domain)?;

        let id = Uuid::new_v4();
        let now = chrono::Utc::now();

        sqlx::query(
            r#"INSERT INTO contacts (id, user_id, first_name, last_name, email, phone_number, birthday, note, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.email)
        .bind(&req.phone_number)
        .bind(req.birthday.to_string())
        .bind(&req.note)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;

        Ok(Contact::from_parts(
            ContactId::from_uuid(id),
            user_id,
            req.first_name,
            req.last_name,
            req.email,
            req.phone_number,
            req.birthday,
            req.note,
            now,
        ))
    }

    async fn get_contact(
        &self,
        user_id: UserId,
        id: ContactId,
    ) -> Result<Option<Contact>, RepoError> {
        let row: Option<DbContact> = sqlx::query_as(
            r#"SELECT id, user_id, first_name, last_name, email, phone_number, birthday, note, created_at
               FROM contacts WHERE id = ? AND user_id = ?"#,
        )
        .bind(id.to_string())
        .bind(user_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbContact::into_domain).transpose()
    }

    async fn list_contacts(
        &self,
        user_id: UserId,
        search: Option<&str>,
    ) -> Result<Vec<Contact>, RepoError> {
        let rows: Vec<DbContact> = match search {
            Some(query) if !query.is_empty() => {
                let pattern = format!("%{}%", query);
                sqlx::query_as(
                    r#"SELECT id, user_id, first_name, last_name, email, phone_number, birthday, note, created_at
                       FROM contacts
                       WHERE user_id = ?
                         AND (first_name LIKE ? OR last_name LIKE ? OR email LIKE ?)
                       ORDER BY created_at DESC"#,
                )
                .bind(user_id.to_string())
                .bind(&pattern)
                .bind(&pattern)
                .bind(&pattern)
                .fetch_all(&self.pool)
                .await
            }
            _ => {
                sqlx::query_as(
                    r#"SELECT id, user_id, first_name, last_name, email, phone_number, birthday, note, created_at
                       FROM contacts WHERE user_id = ? ORDER BY created_at DESC"#,
                )
                .bind(user_id.to_string())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| RepoError::Database(e.to_string()))?;

        rows.into_iter().map(DbContact::into_domain).collect()
    }

    async fn update_contact(
        &self,
        user_id: UserId,
        id: ContactId,
        req: UpdateContactRequest,
    ) -> Result<Option<Contact>, RepoError> {
        validate_fields(&req.first_name, &req.last_name, &req.email)
            .map_err(RepoError::Domain)?;

        let result = sqlx::query(
            r#"UPDATE contacts
               SET first_name = ?, last_name = ?, email = ?, phone_number = ?, birthday = ?, note = ?
               WHERE id = ? AND user_id = ?"#,
        )
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.email)
        .bind(&req.phone_number)
        .bind(req.birthday.to_string())
        .bind(&req.note)
        .bind(id.to_string())
        .bind(user_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(map_db_err)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_contact(user_id, id).await
    }

    async fn delete_contact(
        &self,
        user_id: UserId,
        id: ContactId,
    ) -> Result<Option<Contact>, RepoError> {
        let Some(contact) = self.get_contact(user_id, id).await? else {
            return Ok(None);
        };

        sqlx::query(r#"DELETE FROM contacts WHERE id = ? AND user_id = ?"#)
            .bind(id.to_string())
            .bind(user_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(Some(contact))
    }

    async fn set_avatar_url(
        &self,
        user_id: UserId,
        email: &str,
        url: &str,
    ) -> Result<UserProfile, RepoError> {
        let now = chrono::Utc::now();

        sqlx::query(
            r#"INSERT INTO users (id, email, avatar_url, updated_at) VALUES (?, ?, ?, ?)
               ON CONFLICT(id) DO UPDATE SET email = excluded.email,
                                             avatar_url = excluded.avatar_url,
                                             updated_at = excluded.updated_at"#,
        )
        .bind(user_id.to_string())
        .bind(email)
        .bind(url)
        .bind(now.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| RepoError::Database(e.to_string()))?;

        Ok(UserProfile::from_parts(
            user_id,
            email.to_string(),
            Some(url.to_string()),
            now,
        ))
    }

    async fn get_user(&self, user_id: UserId) -> Result<Option<UserProfile>, RepoError> {
        let row: Option<DbUser> =
            sqlx::query_as(r#"SELECT id, email, avatar_url, updated_at FROM users WHERE id = ?"#)
                .bind(user_id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbUser::into_domain).transpose()
    }
}
