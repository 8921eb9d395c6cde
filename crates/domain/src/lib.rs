//! Fulfilment domain: entities, value objects and invariants shared by the engine.
//!
//! This crate has no I/O. Persistence, HTTP and orchestration live in
//! `fulfilment-engine`.

pub mod common;
pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{Location, NewProduct, NewStore, Product, Store, Warehouse};
pub use error::DomainError;
pub use ids::{ProductId, StoreId};
pub use value_objects::{BusinessUnitCode, LocationIdentifier, ProductName, StoreName};

// rust_decimal is part of the public Product type
pub use rust_decimal::Decimal;
