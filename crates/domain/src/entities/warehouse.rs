//! Warehouse entity - a fulfilment unit registered at a location
//!
//! A warehouse is created once, may be replaced wholesale any number of times while
//! active, and is finally archived. Archival is terminal: an archived record is kept
//! (its business unit code can never be reused) but no longer counts towards the
//! aggregates of its location.
//!
//! Snapshots are immutable values. Transitions return a new `Warehouse`; storage
//! receives the full replacement value and never hands out a live reference.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::{BusinessUnitCode, LocationIdentifier};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub business_unit_code: BusinessUnitCode,
    pub location: LocationIdentifier,
    /// Maximum stock this warehouse may hold
    pub capacity: u32,
    /// Quantity currently held
    pub stock: u32,
    /// Set once on creation, preserved across replacement
    pub creation_at: Option<DateTime<Utc>>,
    /// `None` while active
    pub archived_at: Option<DateTime<Utc>>,
}

impl Warehouse {
    /// A proposed warehouse with no timestamps, as submitted by a caller.
    pub fn new(
        business_unit_code: BusinessUnitCode,
        location: LocationIdentifier,
        capacity: u32,
        stock: u32,
    ) -> Self {
        Self {
            business_unit_code,
            location,
            capacity,
            stock,
            creation_at: None,
            archived_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.archived_at.is_none()
    }

    pub fn is_archived(&self) -> bool {
        self.archived_at.is_some()
    }

    /// Whether this warehouse is large enough to hold `stock` units.
    pub fn can_hold(&self, stock: u32) -> bool {
        self.capacity >= stock
    }

    pub fn with_creation_at(mut self, creation_at: DateTime<Utc>) -> Self {
        self.creation_at = Some(creation_at);
        self
    }

    /// Returns the archived snapshot of this warehouse.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidStateTransition` if the warehouse is already
    /// archived; `archived_at` is never overwritten.
    pub fn archived(&self, at: DateTime<Utc>) -> Result<Self, DomainError> {
        if self.is_archived() {
            return Err(DomainError::invalid_state_transition(format!(
                "Warehouse already archived: {}",
                self.business_unit_code
            )));
        }
        Ok(Self {
            archived_at: Some(at),
            ..self.clone()
        })
    }
}
