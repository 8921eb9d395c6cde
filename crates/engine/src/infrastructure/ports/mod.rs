//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete types.
//! Ports exist for:
//! - Database access (warehouses, products, stores)
//! - The location directory (static table today, external service tomorrow)
//! - The legacy store manager
//! - Clock (for testing)

mod error;
mod external;
mod repos;
mod testing;

// =============================================================================
// Repository Ports
// =============================================================================
pub use repos::{ProductRepo, StoreRepo, WarehouseRepo};

// =============================================================================
// External Service Ports
// =============================================================================
pub use external::{LegacyStorePort, LocationDirectory};

// =============================================================================
// Test-Only Mocks (only available during test builds)
// =============================================================================
#[cfg(test)]
pub use repos::{MockProductRepo, MockStoreRepo, MockWarehouseRepo};

#[cfg(test)]
pub use external::{MockLegacyStorePort, MockLocationDirectory};

#[cfg(test)]
pub use testing::MockClockPort;

// =============================================================================
// Testing Ports
// =============================================================================
pub use testing::ClockPort;

// =============================================================================
// Error Types
// =============================================================================
pub use error::RepoError;
