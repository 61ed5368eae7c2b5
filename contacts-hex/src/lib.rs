//! # Contacts Hex
//!
//! Application service layer and HTTP adapter for the contacts service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates domain operations)
//! - `auth/` - Bearer token issuance and validation
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `R: ContactRepository` and `A: AvatarStore`,
//! allowing different adapter implementations to be injected.

pub mod auth;
pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::ContactService;
