//! Handler for alias resolution.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shortner::AliasPath;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its original URL.
///
/// # Endpoint
///
/// `POST /api/v1/shortner/{alias}` (also answers `GET` for browsers)
///
/// # Request Flow
///
/// 1. Validate the alias is exactly 6 characters
/// 2. Look the alias up in the alias index (one key read, no scan)
/// 3. Return `302 Found` with `Location` set to the original URL, with
///    whitespace, control and non-ASCII characters percent-encoded
///
/// # Errors
///
/// - 400 if the alias is not 6 characters long or not valid UTF-8
/// - 404 if no mapping uses the alias
/// - 500 on store errors
pub async fn redirect_handler(
    path: Result<Path<AliasPath>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let Path(params) = path?;
    params.validate()?;

    let original_url = state.shortner_service.resolve(&params.alias).await?;

    let location = HeaderValue::try_from(location_value(&original_url)).map_err(|e| {
        AppError::internal(json!({
            "reason": "Stored URL is not a valid Location header",
            "alias": params.alias,
            "error": e.to_string(),
        }))
    })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Percent-encodes every character a `Location` header cannot carry verbatim.
///
/// Stored URLs are only length-checked, so they may hold spaces, control
/// characters or non-ASCII text. Printable ASCII passes through untouched,
/// which keeps existing `%XX` escapes and URL delimiters intact.
fn location_value(url: &str) -> String {
    let mut encoded = String::with_capacity(url.len());
    let mut buf = [0u8; 4];

    for ch in url.chars() {
        if ch.is_ascii_graphic() {
            encoded.push(ch);
        } else {
            encoded.push_str(&urlencoding::encode(ch.encode_utf8(&mut buf)));
        }
    }

    encoded
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_keeps_printable_ascii() {
        let url = "https://example.com/a/b?x=1&y=%20#frag";
        assert_eq!(location_value(url), url);
    }

    #[test]
    fn test_location_encodes_unsafe_characters() {
        assert_eq!(
            location_value("https://example.com/a\r\nSet-Cookie: x"),
            "https://example.com/a%0D%0ASet-Cookie:%20x"
        );
        assert_eq!(location_value("https://example.com/é"), "https://example.com/%C3%A9");
    }
}
