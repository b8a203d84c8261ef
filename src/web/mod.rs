//! HTTP surface: redirects, the admin page and the public form.
//!
//! Pages are rendered server-side with Askama templates from `templates/`.
//!
//! # Modules
//!
//! - [`forms`] - Form payloads and the shared creation flow
//! - [`handlers`] - Redirect and page handlers
//! - [`middleware`] - Basic auth and request tracing
//! - [`routes`] - Route groups

pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod routes;
