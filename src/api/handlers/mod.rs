//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod redirect;
pub mod shortner;

pub use health::{health_handler, root_handler};
pub use redirect::redirect_handler;
pub use shortner::{create_handler, delete_handler, lookup_handler};
