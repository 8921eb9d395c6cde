//! Domain entities

mod location;
mod product;
mod store;
mod warehouse;

pub use location::Location;
pub use product::{NewProduct, Product};
pub use store::{NewStore, Store};
pub use warehouse::Warehouse;
