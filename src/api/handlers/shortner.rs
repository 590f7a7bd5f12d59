//! Handlers for the mapping endpoints (create, lookup, delete).
//!
//! All three take the same `{"url": string}` body. A missing or malformed body
//! is reported as a validation error before the store is touched.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::envelope::ApiResponse;
use crate::api::dto::shortner::{ShortenedUrl, UrlRequest};
use crate::error::AppError;
use crate::state::AppState;

/// Extracts and validates the `{"url"}` body, returning the trimmed URL.
fn validated_url(payload: Result<Json<UrlRequest>, JsonRejection>) -> Result<String, AppError> {
    let Json(request) = payload?;
    request.validate()?;
    Ok(request.url)
}

/// Shortens a URL.
///
/// # Endpoint
///
/// `POST /api/v1/shortner/`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/some/long/path" }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "status": "success",
///   "message": "URL has been shortened.",
///   "data": { "shortened_url": "http://8000/aB3xY9" }
/// }
/// ```
///
/// # Errors
///
/// - 400 if the body is not `{"url"}` with 8-2000 characters
/// - 409 if the URL was already shortened
/// - 500 on store errors
pub async fn create_handler(
    State(state): State<AppState>,
    payload: Result<Json<UrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<ShortenedUrl>>), AppError> {
    let url = validated_url(payload)?;

    let mapping = state.shortner_service.create(&url).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "URL has been shortened.",
            ShortenedUrl {
                shortened_url: state.shortner_service.short_url(&mapping.alias),
            },
        )),
    ))
}

/// Returns the short URL previously created for a URL.
///
/// # Endpoint
///
/// `GET /api/v1/shortner/` with a JSON body `{"url"}`.
///
/// # Errors
///
/// - 400 on validation failure
/// - 404 if the URL was never shortened
/// - 500 on store errors
pub async fn lookup_handler(
    State(state): State<AppState>,
    payload: Result<Json<UrlRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ShortenedUrl>>, AppError> {
    let url = validated_url(payload)?;

    let mapping = state.shortner_service.find_by_original_url(&url).await?;

    Ok(Json(ApiResponse::success(
        "Shortened URL was found.",
        ShortenedUrl {
            shortened_url: state.shortner_service.short_url(&mapping.alias),
        },
    )))
}

/// Deletes the mapping for a URL.
///
/// # Endpoint
///
/// `DELETE /api/v1/shortner/` with a JSON body `{"url"}`.
///
/// # Errors
///
/// - 400 on validation failure
/// - 404 if there is no mapping for the URL
/// - 500 on store errors
pub async fn delete_handler(
    State(state): State<AppState>,
    payload: Result<Json<UrlRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    let url = validated_url(payload)?;

    state.shortner_service.delete(&url).await?;

    Ok(Json(ApiResponse::ok("Shortened URL has been deleted.")))
}
