//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod config;
pub mod legacy_store;
pub mod location_directory;
pub mod ports;
pub mod sqlite;
