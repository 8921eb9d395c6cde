//! Ports for collaborators outside the relational store.

use async_trait::async_trait;
use fulfilment_domain::{Location, Store};

/// Read-only directory of valid locations and their admission caps.
///
/// Assumed static for the duration of a request.
#[cfg_attr(test, mockall::automock)]
pub trait LocationDirectory: Send + Sync {
    /// `None` for unknown or empty identifiers.
    fn resolve_by_identifier(&self, identifier: &str) -> Option<Location>;
}

/// Outbound notifications to the legacy store manager.
///
/// Only called after the change is durably written. Delivery is best effort:
/// implementations log failures and never report them back.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LegacyStorePort: Send + Sync {
    async fn store_created(&self, store: &Store);
    async fn store_updated(&self, store: &Store);
}
