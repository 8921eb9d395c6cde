//! Application state and composition.

use std::sync::Arc;

use crate::infrastructure::{
    ports::{ClockPort, LegacyStorePort, LocationDirectory, ProductRepo, StoreRepo, WarehouseRepo},
    sqlite::SqliteRepositories,
};
use crate::use_cases::{
    management::{ProductCrud, StoreCrud},
    warehouse::{
        AdmissionLocks, ArchiveWarehouse, CreateWarehouse, ReplaceWarehouse, WarehouseQueries,
        WarehouseValidator,
    },
    ManagementUseCases, WarehouseUseCases,
};

/// Main application state.
///
/// Holds all repositories and use cases.
/// Passed to HTTP handlers via Axum state.
pub struct App {
    pub repositories: Repositories,
    pub use_cases: UseCases,
}

/// Port traits injected directly.
pub struct Repositories {
    pub warehouse: Arc<dyn WarehouseRepo>,
    pub product: Arc<dyn ProductRepo>,
    pub store: Arc<dyn StoreRepo>,
    pub locations: Arc<dyn LocationDirectory>,
}

/// Container for all use cases.
pub struct UseCases {
    pub warehouse: WarehouseUseCases,
    pub management: ManagementUseCases,
}

impl App {
    pub fn new(
        repos: SqliteRepositories,
        locations: Arc<dyn LocationDirectory>,
        legacy: Arc<dyn LegacyStorePort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let repositories = Repositories {
            warehouse: repos.warehouse,
            product: repos.product,
            store: repos.store,
            locations,
        };

        // One lock table shared by every warehouse mutation
        let locks = Arc::new(AdmissionLocks::new());
        let validator = Arc::new(WarehouseValidator::new(
            repositories.warehouse.clone(),
            repositories.locations.clone(),
        ));

        let warehouse = WarehouseUseCases::new(
            Arc::new(CreateWarehouse::new(
                repositories.warehouse.clone(),
                validator.clone(),
                locks.clone(),
                clock.clone(),
            )),
            Arc::new(ReplaceWarehouse::new(
                repositories.warehouse.clone(),
                validator,
                locks.clone(),
            )),
            Arc::new(ArchiveWarehouse::new(
                repositories.warehouse.clone(),
                locks,
                clock,
            )),
            Arc::new(WarehouseQueries::new(repositories.warehouse.clone())),
        );

        let management = ManagementUseCases::new(
            ProductCrud::new(repositories.product.clone()),
            StoreCrud::new(repositories.store.clone(), legacy),
        );

        Self {
            repositories,
            use_cases: UseCases {
                warehouse,
                management,
            },
        }
    }
}
