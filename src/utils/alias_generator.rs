//! Alias generation.
//!
//! Aliases are 6 independent uniform picks (with replacement) from the
//! 62-symbol alphabet `A-Za-z0-9`. Uniqueness is not guaranteed here; the
//! store rejects a colliding alias at insert time.

use rand::{Rng, distr::Alphanumeric};

/// Number of characters in a generated alias.
pub const ALIAS_LENGTH: usize = 6;

/// Generates a random 6-character alphanumeric alias.
///
/// # Examples
///
/// ```ignore
/// let alias = generate_alias();
/// assert_eq!(alias.len(), 6);
/// assert!(alias.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_alias() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(ALIAS_LENGTH)
        .map(char::from)
        .collect()
}

/// Returns true if `alias` has the shape of a generated alias.
pub fn is_valid_alias(alias: &str) -> bool {
    alias.len() == ALIAS_LENGTH && alias.chars().all(|c| c.is_ascii_alphanumeric())
}
