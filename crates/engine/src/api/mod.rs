//! API layer - HTTP entry points.

pub mod http;
mod products;
mod stores;
mod warehouses;
