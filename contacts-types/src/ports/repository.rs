//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (Postgres, SQLite, InMemory) will implement this trait.

use crate::domain::{Contact, ContactId, UserId, UserProfile};
use crate::dto::{CreateContactRequest, UpdateContactRequest};
use crate::error::RepoError;

/// The main repository port for contact storage.
///
/// Every contact operation is scoped to the owning user: a contact id that
/// belongs to a different user behaves exactly like a missing row.
/// A unique-email violation MUST surface as `RepoError::Conflict`.
#[async_trait::async_trait]
pub trait ContactRepository: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────────
    // Contact Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Creates a new contact owned by `user_id`.
    async fn create_contact(
        &self,
        user_id: UserId,
        req: CreateContactRequest,
    ) -> Result<Contact, RepoError>;

    /// Gets a contact by ID, if it exists and is owned by `user_id`.
    async fn get_contact(
        &self,
        user_id: UserId,
        id: ContactId,
    ) -> Result<Option<Contact>, RepoError>;

    /// Lists the user's contacts, optionally filtered by a case-insensitive
    /// substring match on first name, last name or email.
    async fn list_contacts(
        &self,
        user_id: UserId,
        search: Option<&str>,
    ) -> Result<Vec<Contact>, RepoError>;

    /// Replaces every mutable field of a contact. Returns `None` if the
    /// contact does not exist for this user.
    async fn update_contact(
        &self,
        user_id: UserId,
        id: ContactId,
        req: UpdateContactRequest,
    ) -> Result<Option<Contact>, RepoError>;

    /// Deletes a contact, returning the deleted record.
    async fn delete_contact(
        &self,
        user_id: UserId,
        id: ContactId,
    ) -> Result<Option<Contact>, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────────
    // User Profile Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Stores the avatar URL for a user, creating the profile row if needed.
    async fn set_avatar_url(
        &self,
        user_id: UserId,
        email: &str,
        url: &str,
    ) -> Result<UserProfile, RepoError>;

    /// Gets a user's profile row, if one has been stored.
    async fn get_user(&self, user_id: UserId) -> Result<Option<UserProfile>, RepoError>;
}
