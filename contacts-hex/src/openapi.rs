//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use contacts_types::domain::{ContactId, UserId};
use contacts_types::dto::{
    AvatarResponse, ContactResponse, CreateContactRequest, IssueTokenRequest, TokenResponse,
    UpdateContactRequest,
};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// Mint a bearer token for a known user identity
#[utoipa::path(
    post,
    path = "/auth/token",
    tag = "auth",
    request_body = IssueTokenRequest,
    responses(
        (status = 201, description = "Token issued", body = TokenResponse),
        (status = 400, description = "Invalid email")
    )
)]
async fn issue_token() {}

/// Create a new contact
#[utoipa::path(
    post,
    path = "/api/contacts",
    tag = "contacts",
    request_body = CreateContactRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Contact created successfully", body = ContactResponse),
        (status = 400, description = "Invalid request"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "A contact with this email already exists")
    )
)]
async fn create_contact() {}

/// List contacts, optionally filtered by a search term
#[utoipa::path(
    get,
    path = "/api/contacts",
    tag = "contacts",
    security(("bearer_auth" = [])),
    params(
        ("query" = Option<String>, Query, description = "Search by first name, last name, or email")
    ),
    responses(
        (status = 200, description = "List of contacts", body = Vec<ContactResponse>),
        (status = 401, description = "Unauthorized")
    )
)]
async fn list_contacts() {}

/// List contacts with a birthday in the next N days
#[utoipa::path(
    get,
    path = "/api/contacts/birthdays",
    tag = "contacts",
    security(("bearer_auth" = [])),
    params(
        ("days" = Option<i64>, Query, description = "Lookahead window in days (default 7, max 366)")
    ),
    responses(
        (status = 200, description = "Contacts with upcoming birthdays", body = Vec<ContactResponse>),
        (status = 400, description = "Window out of range"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn upcoming_birthdays() {}

/// Get contact by ID
#[utoipa::path(
    get,
    path = "/api/contacts/{id}",
    tag = "contacts",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Contact ID (UUID)")
    ),
    responses(
        (status = 200, description = "The contact", body = ContactResponse),
        (status = 404, description = "Contact not found"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn get_contact() {}

/// Replace every field of a contact
#[utoipa::path(
    put,
    path = "/api/contacts/{id}",
    tag = "contacts",
    request_body = UpdateContactRequest,
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Contact ID (UUID)")
    ),
    responses(
        (status = 200, description = "The updated contact", body = ContactResponse),
        (status = 404, description = "Contact not found"),
        (status = 409, description = "A contact with this email already exists"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn update_contact() {}

/// Delete a contact
#[utoipa::path(
    delete,
    path = "/api/contacts/{id}",
    tag = "contacts",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Contact ID (UUID)")
    ),
    responses(
        (status = 200, description = "The deleted contact", body = ContactResponse),
        (status = 404, description = "Contact not found"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn delete_contact() {}

/// Upload an avatar for the authenticated user
#[utoipa::path(
    put,
    path = "/api/users/me/avatar",
    tag = "users",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Avatar updated", body = AvatarResponse),
        (status = 400, description = "Missing or empty file"),
        (status = 502, description = "Image host failure"),
        (status = 401, description = "Unauthorized")
    )
)]
async fn upload_avatar() {}

/// Security scheme modifier for bearer token authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    Http::builder()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// The OpenAPI document for the Contacts API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Contacts API",
        description = "Contact-book web service with bearer authentication, per-user rate limiting and avatar uploads"
    ),
    paths(
        health,
        issue_token,
        create_contact,
        list_contacts,
        upcoming_birthdays,
        get_contact,
        update_contact,
        delete_contact,
        upload_avatar
    ),
    components(schemas(
        ContactId,
        UserId,
        CreateContactRequest,
        UpdateContactRequest,
        ContactResponse,
        IssueTokenRequest,
        TokenResponse,
        AvatarResponse
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Liveness probes"),
        (name = "auth", description = "Token issuance"),
        (name = "contacts", description = "Contact CRUD and birthday queries"),
        (name = "users", description = "User profile operations")
    )
)]
pub struct ApiDoc;
