//! Ports (trait definitions) of the hexagonal architecture.
//!
//! Adapters in `contacts-repo` implement these traits; the application
//! service in `contacts-hex` consumes them.

pub mod avatar;
pub mod repository;

pub use avatar::AvatarStore;
pub use repository::ContactRepository;
