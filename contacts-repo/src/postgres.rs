//! PostgreSQL repository adapter.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use contacts_types::{
    Contact, ContactId, ContactRepository, CreateContactRequest, RepoError, UpdateContactRequest,
    UserId, UserProfile, domain::contact::validate_fields,
};

use crate::map_db_err;
use crate::types::{DbContact, DbUser};

// ─────────────────────────────────────────────────────────────────────────────
// PostgreSQL Repository
// ─────────────────────────────────────────────────────────────────────────────

/// PostgreSQL repository implementation.
pub struct PostgresRepo {
    pool: PgPool,
}

/// Executes SQL statements from a migration file, splitting by semicolons.
async fn execute_migration(pool: &PgPool, sql: &str, name: &str) -> Result<(), anyhow::Error> {
    for statement in sql.split(';') {
        let stmt = statement.trim();
        if !stmt.is_empty() {
            sqlx::query(stmt)
                .execute(pool)
                .await
                .map_err(|e| anyhow::anyhow!("Migration {} failed: {}", name, e))?;
        }
    }
    Ok(())
}

/// Runs all database migrations.
async fn run_migrations(pool: &PgPool) -> Result<(), anyhow::Error> {
    execute_migration(
        pool,
        include_str!("../migrations/0001_create_contacts_pg.sql"),
        "0001",
    )
    .await?;

    execute_migration(
        pool,
        include_str!("../migrations/0002_create_users_pg.sql"),
        "0002",
    )
    .await?;

    Ok(())
}

impl PostgresRepo {
    /// Creates a new PostgreSQL repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        run_migrations(&pool).await?;
        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Creates the database schema (for testing with existing pool).
    pub async fn create_schema(&self) -> Result<(), RepoError> {
        run_migrations(&self.pool)
            .await
            .map_err(|e| RepoError::Database(e.to_string()))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl ContactRepository for PostgresRepo {
    async fn create_contact(
        &self,
        user_id: UserId,
        req: CreateContactRequest,
    ) -> Result<Contact, RepoError> {
        // Validate first
        validate_fields(&req.first_name, &req.last_name, &req.email)
            .map_err(RepoError::Domain)?;

        let id = Uuid::new_v4();
        let now = Utc::now();

        sqlx::query(
            r#"INSERT INTO contacts (id, user_id, first_name, last_name, email, phone_number, birthday, note, created_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)"#,
        )
        .bind(id)
        .bind(user_id.into_uuid())
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.email)
        .bind(&req.phone_number)
        .bind(req.birthday)
        .bind(&req.note)
        .bind(now)
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
               FROM contacts WHERE id = $1 AND user_id = $2"#,
        )
        .bind(id.into_uuid())
        .bind(user_id.into_uuid())
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
                       WHERE user_id = $1
                         AND (first_name ILIKE $2 OR last_name ILIKE $2 OR email ILIKE $2)
                       ORDER BY created_at DESC"#,
                )
                .bind(user_id.into_uuid())
                .bind(&pattern)
                .fetch_all(&self.pool)
                .await
            }
            _ => {
                sqlx::query_as(
                    r#"SELECT id, user_id, first_name, last_name, email, phone_number, birthday, note, created_at
                       FROM contacts WHERE user_id = $1 ORDER BY created_at DESC"#,
                )
                .bind(user_id.into_uuid())
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
               SET first_name = $1, last_name = $2, email = $3, phone_number = $4, birthday = $5, note = $6
               WHERE id = $7 AND user_id = $8"#,
        )
        .bind(&req.first_name)
        .bind(&req.last_name)
        .bind(&req.email)
        .bind(&req.phone_number)
        .bind(req.birthday)
        .bind(&req.note)
        .bind(id.into_uuid())
        .bind(user_id.into_uuid())
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

        sqlx::query(r#"DELETE FROM contacts WHERE id = $1 AND user_id = $2"#)
            .bind(id.into_uuid())
            .bind(user_id.into_uuid())
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
        let now = Utc::now();

        sqlx::query(
            r#"INSERT INTO users (id, email, avatar_url, updated_at) VALUES ($1, $2, $3, $4)
               ON CONFLICT (id) DO UPDATE SET email = excluded.email,
                                              avatar_url = excluded.avatar_url,
                                              updated_at = excluded.updated_at"#,
        )
        .bind(user_id.into_uuid())
        .bind(email)
        .bind(url)
        .bind(now)
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
            sqlx::query_as(r#"SELECT id, email, avatar_url, updated_at FROM users WHERE id = $1"#)
                .bind(user_id.into_uuid())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepoError::Database(e.to_string()))?;

        row.map(DbUser::into_domain).transpose()
    }
}
