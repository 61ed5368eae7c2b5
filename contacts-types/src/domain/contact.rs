//! Contact domain model.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::user::UserId;
use crate::error::DomainError;

/// Unique identifier for a Contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct ContactId(Uuid);

impl ContactId {
    /// Creates a new random ContactId.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a ContactId from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }

    /// Returns the UUID value.
    pub fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for ContactId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ContactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ContactId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A contact record owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    /// Unique identifier
    pub id: ContactId,
    /// Owning user
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    /// Unique across all contacts (enforced by the storage layer)
    pub email: String,
    pub phone_number: String,
    pub birthday: NaiveDate,
    /// Optional free-text note
    pub note: Option<String>,
    /// When the contact was created
    pub created_at: DateTime<Utc>,
}

impl Contact {
    /// Creates a new contact after validating its fields.
    ///
    /// # Validation
    /// - First and last name cannot be empty
    /// - Email must contain an `@`
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        user_id: UserId,
        first_name: String,
        last_name: String,
        email: String,
        phone_number: String,
        birthday: NaiveDate,
        note: Option<String>,
    ) -> Result<Self, DomainError> {
        validate_fields(&first_name, &last_name, &email)?;

        Ok(Self {
            id: ContactId::new(),
            user_id,
            first_name,
            last_name,
            email,
            phone_number,
            birthday,
            note,
            created_at: Utc::now(),
        })
    }

    /// Creates a contact with all fields specified (for database reconstruction).
    #[allow(clippy::too_many_arguments)]
    pub fn from_parts(
        id: ContactId,
        user_id: UserId,
        first_name: String,
        last_name: String,
        email: String,
        phone_number: String,
        birthday: NaiveDate,
        note: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            user_id,
            first_name,
            last_name,
            email,
            phone_number,
            birthday,
            note,
            created_at,
        }
    }

    /// Case-insensitive substring match against first name, last name or email.
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.first_name.to_lowercase().contains(&needle)
            || self.last_name.to_lowercase().contains(&needle)
            || self.email.to_lowercase().contains(&needle)
    }

    /// The next occurrence of this contact's birthday on or after `today`.
    ///
    /// Feb 29 birthdays are observed on Mar 1 in common years.
    pub fn next_birthday(&self, today: NaiveDate) -> NaiveDate {
        let occurrence = |year: i32| {
            NaiveDate::from_ymd_opt(year, self.birthday.month(), self.birthday.day())
                .unwrap_or_else(|| {
                    NaiveDate::from_ymd_opt(year, 3, 1).expect("Mar 1 exists in every year")
                })
        };

        let this_year = occurrence(today.year());
        if this_year >= today {
            this_year
        } else {
            occurrence(today.year() + 1)
        }
    }

    /// Whether the next birthday falls within `days` days of `today` (inclusive).
    pub fn birthday_within(&self, today: NaiveDate, days: i64) -> bool {
        (self.next_birthday(today) - today).num_days() <= days
    }
}

/// Shared field validation for create and full-replace updates.
pub fn validate_fields(first_name: &str, last_name: &str, email: &str) -> Result<(), DomainError> {
    if first_name.trim().is_empty() {
        return Err(DomainError::ValidationError(
            "First name cannot be empty".into(),
        ));
    }
    if last_name.trim().is_empty() {
        return Err(DomainError::ValidationError(
            "Last name cannot be empty".into(),
        ));
    }
    if !email.contains('@') {
        return Err(DomainError::ValidationError(format!(
            "Invalid email address: {}",
            email
        )));
    }
    Ok(())
}
