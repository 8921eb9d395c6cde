//! Location entity - reference data owned by an external directory

use serde::{Deserialize, Serialize};

use crate::value_objects::LocationIdentifier;

/// A place where warehouses can be registered, with its two admission caps.
///
/// Locations are never created or mutated by this system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub identification: LocationIdentifier,
    /// Maximum number of active warehouses at this location
    pub max_number_of_warehouses: u32,
    /// Maximum summed capacity of the active warehouses at this location
    pub max_capacity: u32,
}

impl Location {
    pub fn new(
        identification: LocationIdentifier,
        max_number_of_warehouses: u32,
        max_capacity: u32,
    ) -> Self {
        Self {
            identification,
            max_number_of_warehouses,
            max_capacity,
        }
    }
}
