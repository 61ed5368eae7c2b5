//! Domain models for the contacts service.

pub mod contact;
pub mod user;

pub use contact::{Contact, ContactId};
pub use user::{UserId, UserProfile};
