//! Alias alphabet, random alias generation and reserved values.
//!
//! Generated aliases are [`ALIAS_LENGTH`] characters drawn uniformly from
//! [`ALIAS_ALPHABET`], giving 62^6 ≈ 5.68 × 10^10 possible values. Caller-supplied
//! aliases are compared byte for byte; no case folding or trimming is applied.

use rand::Rng;

/// Characters a generated alias may contain: digits, uppercase, lowercase.
pub const ALIAS_ALPHABET: &[u8; 62] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Length of a generated alias.
pub const ALIAS_LENGTH: usize = 6;

/// Aliases that collide with route names and can never be assigned.
pub const RESERVED_ALIASES: &[&str] = &["new"];

/// Draws a random alias of [`ALIAS_LENGTH`] characters.
///
/// Uniqueness is not checked here; see
/// [`crate::application::services::ShortLinkService::generate_alias`].
pub fn generate_alias() -> String {
    let mut rng = rand::rng();

    (0..ALIAS_LENGTH)
        .map(|_| ALIAS_ALPHABET[rng.random_range(0..ALIAS_ALPHABET.len())] as char)
        .collect()
}

/// Returns true if `alias` is one of [`RESERVED_ALIASES`].
pub fn is_reserved(alias: &str) -> bool {
    RESERVED_ALIASES.contains(&alias)
}
