//! Test fixtures for collection-router.
//!
//! Provides realistic test data:
//! - Pune neighbourhood collection areas
//! - A builder for collection points

pub mod pune_locations;

pub use pune_locations::*;
