//! Domain layer containing the short link entity, alias rules and the store contract.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`alias`] - Alias alphabet, random generation and reserved values
//! - [`repositories`] - Data access trait definitions
//!
//! The domain layer has no dependencies on infrastructure or presentation layers.
//! Business logic lives in [`crate::application::services`].

pub mod alias;
pub mod entities;
pub mod repositories;
