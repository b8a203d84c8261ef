//! Business logic services for the application layer.

pub mod auth_service;
pub mod short_link_service;

pub use auth_service::{AdminCredentials, AuthService};
pub use short_link_service::ShortLinkService;
