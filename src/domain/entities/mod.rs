//! Core domain entities.
//!
//! The service has a single entity, [`Mapping`]. Entities are plain data
//! structures without business logic.

pub mod mapping;

pub use mapping::Mapping;
