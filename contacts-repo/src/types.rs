//! Shared database types with feature-gated fields for SQLite and PostgreSQL.

use sqlx::FromRow;

use contacts_types::{Contact, ContactId, RepoError, UserId, UserProfile};

// ─────────────────────────────────────────────────────────────────────────────
// Feature-gated imports
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(not(feature = "sqlite"))]
use chrono::{DateTime, NaiveDate, Utc};
#[cfg(not(feature = "sqlite"))]
use uuid::Uuid;

// ─────────────────────────────────────────────────────────────────────────────
// Database row structs (derive FromRow for automatic mapping)
// ─────────────────────────────────────────────────────────────────────────────

/// Contact row from database.
#[derive(FromRow)]
pub struct DbContact {
    #[cfg(not(feature = "sqlite"))]
    pub id: Uuid,
    #[cfg(feature = "sqlite")]
    pub id: String,

    #[cfg(not(feature = "sqlite"))]
    pub user_id: Uuid,
    #[cfg(feature = "sqlite")]
    pub user_id: String,

    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,

    #[cfg(not(feature = "sqlite"))]
    pub birthday: NaiveDate,
    #[cfg(feature = "sqlite")]
    pub birthday: String,

    pub note: Option<String>,

    #[cfg(not(feature = "sqlite"))]
    pub created_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub created_at: String,
}

impl DbContact {
    pub fn into_domain(self) -> Result<Contact, RepoError> {
        #[cfg(not(feature = "sqlite"))]
        let (id, user_id, birthday, created_at) =
            (self.id, self.user_id, self.birthday, self.created_at);

        #[cfg(feature = "sqlite")]
        let (id, user_id, birthday, created_at) = (
            uuid::Uuid::parse_str(&self.id).map_err(|e| RepoError::Database(e.to_string()))?,
            uuid::Uuid::parse_str(&self.user_id)
                .map_err(|e| RepoError::Database(e.to_string()))?,
            self.birthday
                .parse::<chrono::NaiveDate>()
                .map_err(|e| RepoError::Database(e.to_string()))?,
            chrono::DateTime::parse_from_rfc3339(&self.created_at)
                .map_err(|e| RepoError::Database(e.to_string()))?
                .with_timezone(&chrono::Utc),
        );

        Ok(Contact::from_parts(
            ContactId::from_uuid(id),
            UserId::from_uuid(user_id),
            self.first_name,
            self.last_name,
            self.email,
            self.phone_number,
            birthday,
            self.note,
            created_at,
        ))
    }
}

/// User profile row from database.
#[derive(FromRow)]
pub struct DbUser {
    #[cfg(not(feature = "sqlite"))]
    pub id: Uuid,
    #[cfg(feature = "sqlite")]
    pub id: String,

    pub email: String,
    pub avatar_url: Option<String>,

    #[cfg(not(feature = "sqlite"))]
    pub updated_at: DateTime<Utc>,
    #[cfg(feature = "sqlite")]
    pub updated_at: String,
}

impl DbUser {
    pub fn into_domain(self) -> Result<UserProfile, RepoError> {
        #[cfg(not(feature = "sqlite"))]
        let (id, updated_at) = (self.id, self.updated_at);

        #[cfg(feature = "sqlite")]
        let (id, updated_at) = (
            uuid::Uuid::parse_str(&self.id).map_err(|e| RepoError::Database(e.to_string()))?,
            chrono::DateTime::parse_from_rfc3339(&self.updated_at)
                .map_err(|e| RepoError::Database(e.to_string()))?
                .with_timezone(&chrono::Utc),
        );

        Ok(UserProfile::from_parts(
            UserId::from_uuid(id),
            self.email,
            self.avatar_url,
            updated_at,
        ))
    }
}
