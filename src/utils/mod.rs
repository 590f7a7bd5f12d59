//! Utility functions.
//!
//! - [`alias_generator`] - Random alias generation

pub mod alias_generator;
