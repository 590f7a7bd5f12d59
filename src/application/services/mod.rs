//! Business logic services for the application layer.

pub mod shortner_service;

pub use shortner_service::ShortnerService;
