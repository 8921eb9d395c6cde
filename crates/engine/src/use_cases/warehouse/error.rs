//! Warehouse lifecycle errors.

use fulfilment_domain::BusinessUnitCode;
use serde::Serialize;

use crate::infrastructure::ports::RepoError;

/// Business rule a rejected warehouse operation violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationKind {
    DuplicateCode,
    UnknownLocation,
    LocationFull,
    CapacityExceeded,
    InvalidStock,
    NotFound,
    AlreadyArchived,
    InsufficientCapacity,
    StockMismatch,
}

impl ValidationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DuplicateCode => "DuplicateCode",
            Self::UnknownLocation => "UnknownLocation",
            Self::LocationFull => "LocationFull",
            Self::CapacityExceeded => "CapacityExceeded",
            Self::InvalidStock => "InvalidStock",
            Self::NotFound => "NotFound",
            Self::AlreadyArchived => "AlreadyArchived",
            Self::InsufficientCapacity => "InsufficientCapacity",
            Self::StockMismatch => "StockMismatch",
        }
    }
}

impl std::fmt::Display for ValidationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rejected warehouse operation: expected outcome of user input, never a fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationFailure {
    pub kind: ValidationKind,
    pub message: String,
}

impl ValidationFailure {
    pub fn new(kind: ValidationKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn duplicate_code(code: &BusinessUnitCode) -> Self {
        Self::new(
            ValidationKind::DuplicateCode,
            format!("Business unit code already exists: {code}"),
        )
    }

    pub fn unknown_location(identifier: &str) -> Self {
        Self::new(
            ValidationKind::UnknownLocation,
            format!("Invalid or unknown location: {identifier}"),
        )
    }

    pub fn location_full(identifier: &str, max_number_of_warehouses: u32) -> Self {
        Self::new(
            ValidationKind::LocationFull,
            format!(
                "Maximum number of warehouses ({max_number_of_warehouses}) already reached for location: {identifier}"
            ),
        )
    }

    pub fn capacity_exceeded(identifier: &str, max_capacity: u32) -> Self {
        Self::new(
            ValidationKind::CapacityExceeded,
            format!(
                "Total capacity would exceed location max capacity {max_capacity} for location: {identifier}"
            ),
        )
    }

    pub fn invalid_stock() -> Self {
        Self::new(
            ValidationKind::InvalidStock,
            "Warehouse capacity must be at least the stock amount",
        )
    }

    pub fn not_found(code: &BusinessUnitCode) -> Self {
        Self::new(ValidationKind::NotFound, format!("Warehouse not found: {code}"))
    }

    pub fn already_archived(code: &BusinessUnitCode) -> Self {
        Self::new(
            ValidationKind::AlreadyArchived,
            format!("Warehouse already archived: {code}"),
        )
    }

    pub fn cannot_replace_archived(code: &BusinessUnitCode) -> Self {
        Self::new(
            ValidationKind::AlreadyArchived,
            format!("Cannot replace archived warehouse: {code}"),
        )
    }

    pub fn insufficient_capacity(existing_stock: u32) -> Self {
        Self::new(
            ValidationKind::InsufficientCapacity,
            format!("New warehouse capacity must accommodate existing stock ({existing_stock})"),
        )
    }

    pub fn stock_mismatch(existing_stock: u32) -> Self {
        Self::new(
            ValidationKind::StockMismatch,
            format!(
                "Stock of the new warehouse must match the previous warehouse stock ({existing_stock})"
            ),
        )
    }
}

/// Errors from warehouse lifecycle operations.
#[derive(Debug, thiserror::Error)]
pub enum WarehouseError {
    #[error("{0}")]
    Validation(#[from] ValidationFailure),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl WarehouseError {
    /// The violated rule, or `None` for infrastructure faults.
    pub fn kind(&self) -> Option<ValidationKind> {
        match self {
            Self::Validation(failure) => Some(failure.kind),
            Self::Repo(_) => None,
        }
    }
}
