//! Static location directory.

use std::collections::HashMap;

use fulfilment_domain::{Location, LocationIdentifier};

use crate::infrastructure::ports::LocationDirectory;

/// (identification, max number of warehouses, max capacity)
const LOCATIONS: [(&str, u32, u32); 8] = [
    ("ZWOLLE-001", 1, 40),
    ("ZWOLLE-002", 2, 50),
    ("AMSTERDAM-001", 5, 100),
    ("AMSTERDAM-002", 3, 75),
    ("TILBURG-001", 1, 40),
    ("HELMOND-001", 1, 45),
    ("EINDHOVEN-001", 2, 70),
    ("VETSBY-001", 1, 90),
];

/// In-memory directory holding the fixed reference table of locations.
pub struct StaticLocationDirectory {
    locations: HashMap<String, Location>,
}

impl StaticLocationDirectory {
    pub fn new() -> Self {
        Self::from_locations(LOCATIONS.iter().filter_map(|(id, max_count, max_capacity)| {
            LocationIdentifier::new(*id)
                .ok()
                .map(|identification| Location::new(identification, *max_count, *max_capacity))
        }))
    }

    pub fn from_locations(locations: impl IntoIterator<Item = Location>) -> Self {
        Self {
            locations: locations
                .into_iter()
                .map(|l| (l.identification.as_str().to_string(), l))
                .collect(),
        }
    }
}

impl Default for StaticLocationDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl LocationDirectory for StaticLocationDirectory {
    fn resolve_by_identifier(&self, identifier: &str) -> Option<Location> {
        self.locations.get(identifier.trim()).cloned()
    }
}
