//! Mapping entity: an original URL and the alias standing in for it.

/// A stored association between an original URL and its alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mapping {
    pub original_url: String,
    pub alias: String,
}

impl Mapping {
    pub fn new(original_url: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            original_url: original_url.into(),
            alias: alias.into(),
        }
    }
}
