//! Application layer services implementing business logic.
//!
//! Services consume repository traits and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::shortner_service::ShortnerService`] - Mapping lifecycle and alias resolution

pub mod services;
