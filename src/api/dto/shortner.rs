//! DTOs for the shortner endpoints.

use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

/// Body of create, lookup and delete requests.
///
/// Only the length is checked; any string of the right size is accepted as a
/// "URL". Surrounding whitespace is trimmed before validation.
#[derive(Debug, Deserialize, Validate)]
pub struct UrlRequest {
    #[serde(deserialize_with = "trimmed")]
    #[validate(length(min = 8, max = 2000))]
    pub url: String,
}

/// Path parameter of the redirect endpoint.
#[derive(Debug, Deserialize, Validate)]
pub struct AliasPath {
    #[validate(length(equal = 6))]
    pub alias: String,
}

/// `data` member returned by create and lookup.
#[derive(Debug, Serialize)]
pub struct ShortenedUrl {
    pub shortened_url: String,
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.trim().to_string())
}
