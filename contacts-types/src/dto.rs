//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Contact, ContactId, UserId};

// ─────────────────────────────────────────────────────────────────────────────
// Contact DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to create a new contact.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateContactRequest {
    /// First name of the contact
    #[schema(example = "Ada")]
    pub first_name: String,
    /// Last name of the contact
    #[schema(example = "Lovelace")]
    pub last_name: String,
    /// Email address, unique across all contacts
    #[schema(example = "ada@example.com")]
    pub email: String,
    /// Phone number in any format
    #[schema(example = "+44 20 7946 0000")]
    pub phone_number: String,
    /// Date of birth (ISO 8601 date)
    #[schema(value_type = String, example = "1815-12-10")]
    pub birthday: NaiveDate,
    /// Optional free-text note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Request to replace a contact. PUT semantics: every field is rewritten.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateContactRequest {
    #[schema(example = "Ada")]
    pub first_name: String,
    #[schema(example = "King-Noel")]
    pub last_name: String,
    #[schema(example = "ada@example.com")]
    pub email: String,
    #[schema(example = "+44 20 7946 0000")]
    pub phone_number: String,
    #[schema(value_type = String, example = "1815-12-10")]
    pub birthday: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// A contact as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ContactResponse {
    /// Unique contact identifier
    pub id: ContactId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    #[schema(value_type = String, example = "1815-12-10")]
    pub birthday: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// When the contact was created (ISO 8601)
    #[schema(value_type = String, example = "2024-01-01T00:00:00Z")]
    pub created_at: String,
}

impl From<Contact> for ContactResponse {
    fn from(contact: Contact) -> Self {
        Self {
            id: contact.id,
            first_name: contact.first_name,
            last_name: contact.last_name,
            email: contact.email,
            phone_number: contact.phone_number,
            birthday: contact.birthday,
            note: contact.note,
            created_at: contact.created_at.to_rfc3339(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to mint a bearer token for a known user identity.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct IssueTokenRequest {
    /// Identifier of the user the token is issued for
    pub user_id: UserId,
    /// Email of the user (becomes the `sub` claim and the rate-limit key)
    #[schema(example = "ada@example.com")]
    pub email: String,
}

/// Response containing a freshly minted bearer token.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    /// Always "Bearer"
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Seconds until the token expires
    #[schema(example = 3600)]
    pub expires_in: u64,
}

// ─────────────────────────────────────────────────────────────────────────────
// Avatar DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Response after a successful avatar upload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AvatarResponse {
    /// Public URL of the stored avatar
    #[schema(example = "https://images.example.com/v1/abc123.png")]
    pub avatar_url: String,
    pub message: String,
}
