//! Management use cases for CRUD-style operations.
//!
//! Products and stores carry no business rules beyond required names and unique
//! names, so these use cases are thin pass-throughs over the repositories. Store
//! changes are reported to the legacy store manager once they are written.

mod product;
mod store;

pub use product::{ProductCrud, ProductInput};
pub use store::{StoreCrud, StoreInput, StorePatch};

use crate::infrastructure::ports::RepoError;

/// Shared error type for management use cases.
#[derive(Debug, thiserror::Error)]
pub enum ManagementError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

impl ManagementError {
    /// Map a unique-key violation to `Conflict`, anything else to `Repo`.
    fn from_write(e: RepoError, conflict_message: impl FnOnce() -> String) -> Self {
        match e {
            RepoError::ConstraintViolation(_) => Self::Conflict(conflict_message()),
            e => Self::Repo(e),
        }
    }

    /// Like [`Self::from_write`], but a row that vanished since it was read is `missing()`.
    fn from_update(
        e: RepoError,
        missing: impl FnOnce() -> Self,
        conflict_message: impl FnOnce() -> String,
    ) -> Self {
        if e.is_not_found() {
            return missing();
        }
        Self::from_write(e, conflict_message)
    }
}

/// Container for management use cases.
pub struct ManagementUseCases {
    pub product: ProductCrud,
    pub store: StoreCrud,
}

impl ManagementUseCases {
    pub fn new(product: ProductCrud, store: StoreCrud) -> Self {
        Self { product, store }
    }
}
