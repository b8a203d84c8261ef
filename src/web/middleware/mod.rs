//! Web-specific middleware.

pub mod admin_auth;
pub mod tracing;
