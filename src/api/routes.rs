//! API route configuration.

use crate::api::handlers::{create_handler, delete_handler, lookup_handler, redirect_handler};
use crate::state::AppState;
use axum::{Router, routing::post};

/// Versioned API routes, nested under `/api/v1`.
///
/// # Endpoints
///
/// - `POST   /shortner/`         - Shorten a URL
/// - `GET    /shortner/`         - Look up the short URL for a URL
/// - `DELETE /shortner/`         - Delete the mapping for a URL
/// - `POST   /shortner/{alias}`  - Redirect to the original URL
/// - `GET    /shortner/{alias}`  - Same, for browsers
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/shortner/",
            post(create_handler)
                .get(lookup_handler)
                .delete(delete_handler),
        )
        .route(
            "/shortner/{alias}",
            post(redirect_handler).get(redirect_handler),
        )
}
