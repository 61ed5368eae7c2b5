//! Contact Application Service
//!
//! Orchestrates domain operations through the repository and avatar ports.
//! Contains NO infrastructure logic - pure business orchestration.

use chrono::Utc;

use contacts_types::{
    AppError, AvatarStore, Contact, ContactId, ContactRepository, CreateContactRequest,
    UpdateContactRequest, UserId, UserProfile, domain::contact::validate_fields,
};

/// Largest accepted birthday lookahead window, in days.
const MAX_BIRTHDAY_WINDOW: i64 = 366;

/// Application service for contact operations.
///
/// Generic over its ports - the adapters are injected at compile time.
/// This enables:
/// - Swapping adapters without code changes
/// - Testing with in-memory implementations
/// - Compile-time checks for port implementation
pub struct ContactService<R: ContactRepository, A: AvatarStore> {
    repo: R,
    avatars: A,
}

impl<R: ContactRepository, A: AvatarStore> ContactService<R, A> {
    /// Creates a new contact service with the given adapters.
    pub fn new(repo: R, avatars: A) -> Self {
        Self { repo, avatars }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Contact Operations
    // ─────────────────────────────────────────────────────────────────────────────

    /// Creates a new contact owned by the caller.
    pub async fn create_contact(
        &self,
        user_id: UserId,
        req: CreateContactRequest,
    ) -> Result<Contact, AppError> {
        validate_fields(&req.first_name, &req.last_name, &req.email)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        self.repo
            .create_contact(user_id, req)
            .await
            .map_err(Into::into)
    }

    /// Gets a contact by ID.
    pub async fn get_contact(&self, user_id: UserId, id: ContactId) -> Result<Contact, AppError> {
        self.repo
            .get_contact(user_id, id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::NotFound(format!("Contact {}", id))))
    }

    /// Lists the caller's contacts, optionally filtered by a search term.
    pub async fn list_contacts(
        &self,
        user_id: UserId,
        search: Option<&str>,
    ) -> Result<Vec<Contact>, AppError> {
        self.repo
            .list_contacts(user_id, search)
            .await
            .map_err(Into::into)
    }

    /// Replaces every field of a contact.
    pub async fn update_contact(
        &self,
        user_id: UserId,
        id: ContactId,
        req: UpdateContactRequest,
    ) -> Result<Contact, AppError> {
        validate_fields(&req.first_name, &req.last_name, &req.email)
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        self.repo
            .update_contact(user_id, id, req)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::NotFound(format!("Contact {}", id))))
    }

    /// Deletes a contact, returning the deleted record.
    pub async fn delete_contact(
        &self,
        user_id: UserId,
        id: ContactId,
    ) -> Result<Contact, AppError> {
        self.repo
            .delete_contact(user_id, id)
            .await
            .map_err(Into::into)
            .and_then(|opt| opt.ok_or_else(|| AppError::NotFound(format!("Contact {}", id))))
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Birthday Query
    // ─────────────────────────────────────────────────────────────────────────────

    /// Contacts whose next birthday falls within `days` days of today,
    /// ordered by that next occurrence.
    ///
    /// The projection is done here rather than in SQL so the December to
    /// January wrap and Feb 29 birthdays behave the same on both backends.
    pub async fn upcoming_birthdays(
        &self,
        user_id: UserId,
        days: i64,
    ) -> Result<Vec<Contact>, AppError> {
        if !(1..=MAX_BIRTHDAY_WINDOW).contains(&days) {
            return Err(AppError::BadRequest(format!(
                "days must be between 1 and {}",
                MAX_BIRTHDAY_WINDOW
            )));
        }

        let today = Utc::now().date_naive();

        let mut contacts: Vec<Contact> = self
            .repo
            .list_contacts(user_id, None)
            .await
            .map_err(AppError::from)?
            .into_iter()
            .filter(|c| c.birthday_within(today, days))
            .collect();

        contacts.sort_by_key(|c| c.next_birthday(today));
        Ok(contacts)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Avatar
    // ─────────────────────────────────────────────────────────────────────────────

    /// Uploads an avatar to the external host and stores the resulting URL
    /// on the caller's profile.
    pub async fn update_avatar(
        &self,
        user_id: UserId,
        email: &str,
        filename: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<UserProfile, AppError> {
        if bytes.is_empty() {
            return Err(AppError::BadRequest("Avatar file is empty".into()));
        }

        let url = self.avatars.upload(filename, content_type, bytes).await?;

        self.repo
            .set_avatar_url(user_id, email, &url)
            .await
            .map_err(Into::into)
    }
}
