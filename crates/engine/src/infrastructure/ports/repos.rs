//! Repository port traits for database access.

use async_trait::async_trait;
use fulfilment_domain::{
    BusinessUnitCode, LocationIdentifier, NewProduct, NewStore, Product, ProductId, Store,
    StoreId, Warehouse,
};

use super::error::RepoError;

// =============================================================================
// Warehouses
// =============================================================================

/// Persistence of warehouse snapshots plus the aggregates admission checks read.
///
/// "Active" means `archived_at` is unset. Archived rows stay stored forever so
/// their codes remain taken.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WarehouseRepo: Send + Sync {
    /// Any warehouse with this code, active or archived.
    async fn find_by_code(&self, code: &BusinessUnitCode)
        -> Result<Option<Warehouse>, RepoError>;

    async fn count_active_by_location(&self, location: &LocationIdentifier)
        -> Result<u64, RepoError>;

    /// Summed capacity of the active warehouses at `location`; 0 when there are none.
    async fn sum_capacity_by_location(&self, location: &LocationIdentifier)
        -> Result<u64, RepoError>;

    /// Active warehouses ordered by business unit code.
    async fn list_active(&self) -> Result<Vec<Warehouse>, RepoError>;

    async fn create(&self, warehouse: &Warehouse) -> Result<(), RepoError>;

    /// Overwrite the stored row with the same business unit code.
    ///
    /// Fails with `RepoError::NotFound` if no such row exists.
    async fn update(&self, warehouse: &Warehouse) -> Result<(), RepoError>;
}

// =============================================================================
// Products
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepo: Send + Sync {
    /// All products ordered by name.
    async fn list(&self) -> Result<Vec<Product>, RepoError>;
    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepoError>;
    async fn create(&self, product: NewProduct) -> Result<Product, RepoError>;
    /// Fails with `RepoError::NotFound` if the product does not exist.
    async fn update(&self, product: &Product) -> Result<(), RepoError>;
    /// Returns false if nothing was deleted.
    async fn delete(&self, id: ProductId) -> Result<bool, RepoError>;
}

// =============================================================================
// Stores
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StoreRepo: Send + Sync {
    /// All stores ordered by name.
    async fn list(&self) -> Result<Vec<Store>, RepoError>;
    async fn get(&self, id: StoreId) -> Result<Option<Store>, RepoError>;
    async fn create(&self, store: NewStore) -> Result<Store, RepoError>;
    /// Fails with `RepoError::NotFound` if the store does not exist.
    async fn update(&self, store: &Store) -> Result<(), RepoError>;
    /// Returns false if nothing was deleted.
    async fn delete(&self, id: StoreId) -> Result<bool, RepoError>;
}
