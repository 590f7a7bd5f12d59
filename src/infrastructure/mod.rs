//! Infrastructure layer for external integrations.
//!
//! Provides the concrete implementations of the storage contract defined by
//! the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - Redis and in-memory mapping repositories

pub mod persistence;
