//! HTTP handlers for redirects and the HTML pages.

mod admin;
mod redirect;
mod submit;

pub use admin::{admin_action_handler, admin_page_handler};
pub use redirect::{home_handler, redirect_handler};
pub use submit::submit_handler;
