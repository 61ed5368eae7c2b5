//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use contacts_types::{
    AppError, AvatarResponse, AvatarStore, ContactId, ContactRepository, ContactResponse,
    CreateContactRequest, IssueTokenRequest, TokenResponse, UpdateContactRequest,
};

use crate::ContactService;
use crate::auth::{CurrentUser, TokenKeys};

/// Application state shared across handlers.
pub struct AppState<R: ContactRepository, A: AvatarStore> {
    pub service: ContactService<R, A>,
    pub tokens: Arc<TokenKeys>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg.clone()),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Auth
// ─────────────────────────────────────────────────────────────────────────────

/// Mint a bearer token for a known user identity.
///
/// Development issuance helper: user management lives outside this service,
/// so the caller supplies the identity the token is minted for.
#[tracing::instrument(skip(state, req), fields(email = %req.email))]
pub async fn issue_token<R: ContactRepository, A: AvatarStore>(
    State(state): State<Arc<AppState<R, A>>>,
    Json(req): Json<IssueTokenRequest>,
) -> Result<impl IntoResponse, ApiError> {
    if !req.email.contains('@') {
        return Err(AppError::BadRequest(format!("Invalid email address: {}", req.email)).into());
    }

    let access_token = state.tokens.issue(req.user_id, &req.email)?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: state.tokens.ttl_secs(),
        }),
    ))
}

// ─────────────────────────────────────────────────────────────────────────────
// Contacts
// ─────────────────────────────────────────────────────────────────────────────

/// Create a new contact.
#[tracing::instrument(skip(state, req), fields(user_id = %user.id))]
pub async fn create_contact<R: ContactRepository, A: AvatarStore>(
    State(state): State<Arc<AppState<R, A>>>,
    Extension(user): Extension<CurrentUser>,
    Json(req): Json<CreateContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let contact = state.service.create_contact(user.id, req).await?;
    Ok((StatusCode::CREATED, Json(ContactResponse::from(contact))))
}

/// Query parameters for listing contacts.
#[derive(Debug, Deserialize)]
pub struct ListContactsParams {
    /// Search by first name, last name, or email
    pub query: Option<String>,
}

/// List the caller's contacts, optionally filtered by a search term.
#[tracing::instrument(skip(state), fields(user_id = %user.id))]
pub async fn list_contacts<R: ContactRepository, A: AvatarStore>(
    State(state): State<Arc<AppState<R, A>>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<ListContactsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let contacts = state
        .service
        .list_contacts(user.id, params.query.as_deref())
        .await?;

    let response: Vec<ContactResponse> = contacts.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// Query parameters for the birthday range query.
#[derive(Debug, Deserialize)]
pub struct BirthdayParams {
    /// Lookahead window in days (default 7)
    pub days: Option<i64>,
}

/// List contacts with a birthday in the next `days` days.
#[tracing::instrument(skip(state), fields(user_id = %user.id))]
pub async fn upcoming_birthdays<R: ContactRepository, A: AvatarStore>(
    State(state): State<Arc<AppState<R, A>>>,
    Extension(user): Extension<CurrentUser>,
    Query(params): Query<BirthdayParams>,
) -> Result<impl IntoResponse, ApiError> {
    let days = params.days.unwrap_or(7);
    let contacts = state.service.upcoming_birthdays(user.id, days).await?;

    let response: Vec<ContactResponse> = contacts.into_iter().map(Into::into).collect();
    Ok(Json(response))
}

/// Get a contact by ID.
#[tracing::instrument(skip(state), fields(user_id = %user.id, contact_id = %id))]
pub async fn get_contact<R: ContactRepository, A: AvatarStore>(
    State(state): State<Arc<AppState<R, A>>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let contact_id: ContactId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid contact ID".into()))?;

    let contact = state.service.get_contact(user.id, contact_id).await?;
    Ok(Json(ContactResponse::from(contact)))
}

/// Replace every field of a contact.
#[tracing::instrument(skip(state, req), fields(user_id = %user.id, contact_id = %id))]
pub async fn update_contact<R: ContactRepository, A: AvatarStore>(
    State(state): State<Arc<AppState<R, A>>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(req): Json<UpdateContactRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let contact_id: ContactId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid contact ID".into()))?;

    let contact = state
        .service
        .update_contact(user.id, contact_id, req)
        .await?;
    Ok(Json(ContactResponse::from(contact)))
}

/// Delete a contact, returning the deleted record.
#[tracing::instrument(skip(state), fields(user_id = %user.id, contact_id = %id))]
pub async fn delete_contact<R: ContactRepository, A: AvatarStore>(
    State(state): State<Arc<AppState<R, A>>>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let contact_id: ContactId = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid contact ID".into()))?;

    let contact = state.service.delete_contact(user.id, contact_id).await?;
    Ok(Json(ContactResponse::from(contact)))
}

// ─────────────────────────────────────────────────────────────────────────────
// Avatar
// ─────────────────────────────────────────────────────────────────────────────

/// Upload an avatar image for the authenticated user.
///
/// Expects a multipart form with a `file` part. The image is forwarded to
/// the external host and the resulting URL stored on the user's profile.
#[tracing::instrument(skip(state, multipart), fields(user_id = %user.id))]
pub async fn upload_avatar<R: ContactRepository, A: AvatarStore>(
    State(state): State<Arc<AppState<R, A>>>,
    Extension(user): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or("avatar").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {}", e)))?;

        let profile = state
            .service
            .update_avatar(user.id, &user.email, &filename, &content_type, bytes.to_vec())
            .await?;

        let avatar_url = profile
            .avatar_url
            .ok_or_else(|| AppError::Internal("Avatar URL missing after upload".into()))?;

        return Ok(Json(AvatarResponse {
            avatar_url,
            message: "Avatar updated successfully".to_string(),
        }));
    }

    Err(AppError::BadRequest("Missing `file` field in multipart body".into()).into())
}
