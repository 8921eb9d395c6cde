//! Fulfilment Engine library.
//!
//! This crate contains all server-side code for the fulfilment backend.
//!
//! ## Structure
//!
//! - `use_cases/` - Warehouse lifecycle rules and product/store management
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points
//! - `app` - Application composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod use_cases;

pub use app::App;
