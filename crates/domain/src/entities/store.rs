//! Store entity - retail store mirrored to the legacy store manager

use serde::{Deserialize, Serialize};

use crate::ids::StoreId;
use crate::value_objects::StoreName;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Store {
    pub id: StoreId,
    pub name: StoreName,
    pub quantity_products_in_stock: u32,
}

/// A store that has not been persisted yet (no id assigned).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStore {
    pub name: StoreName,
    pub quantity_products_in_stock: u32,
}

impl NewStore {
    pub fn new(name: StoreName, quantity_products_in_stock: u32) -> Self {
        Self {
            name,
            quantity_products_in_stock,
        }
    }

    pub fn into_store(self, id: StoreId) -> Store {
        Store {
            id,
            name: self.name,
            quantity_products_in_stock: self.quantity_products_in_stock,
        }
    }
}
