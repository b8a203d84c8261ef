//! Core domain entities.
//!
//! - [`ShortLink`] - A stored alias → URL mapping
//! - [`NewShortLink`] - Input for inserting a mapping

pub mod short_link;

pub use short_link::{NewShortLink, ShortLink};
