//! Product entity - catalogue item with plain field-level CRUD

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ids::ProductId;
use crate::value_objects::ProductName;

/// A product as stored.
///
/// # Simple Data Struct
///
/// No invariants beyond those of its field types; the name is unique across
/// products, which the repository enforces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: ProductName,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: u32,
}

/// A product that has not been persisted yet (no id assigned).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: ProductName,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: u32,
}

impl NewProduct {
    pub fn new(name: ProductName) -> Self {
        Self {
            name,
            description: None,
            price: None,
            stock: 0,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_stock(mut self, stock: u32) -> Self {
        self.stock = stock;
        self
    }

    /// Attach the id assigned by storage.
    pub fn into_product(self, id: ProductId) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price: self.price,
            stock: self.stock,
        }
    }
}
