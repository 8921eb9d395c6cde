//! Warehouse lifecycle use cases.
//!
//! Create, replace and archive run their rule checks through the shared
//! [`WarehouseValidator`] and write only after every check passed, while holding
//! the [`AdmissionLocks`] for the code and location involved.

use std::sync::Arc;

use fulfilment_domain::{BusinessUnitCode, Warehouse};

use crate::infrastructure::ports::{RepoError, WarehouseRepo};

mod archive;
mod create;
mod error;
mod locks;
mod replace;
mod validator;

pub use archive::ArchiveWarehouse;
pub use create::CreateWarehouse;
pub use error::{ValidationFailure, ValidationKind, WarehouseError};
pub use locks::AdmissionLocks;
pub use replace::ReplaceWarehouse;
pub use validator::WarehouseValidator;

/// Container for warehouse use cases.
pub struct WarehouseUseCases {
    pub create: Arc<CreateWarehouse>,
    pub replace: Arc<ReplaceWarehouse>,
    pub archive: Arc<ArchiveWarehouse>,
    pub queries: Arc<WarehouseQueries>,
}

impl WarehouseUseCases {
    pub fn new(
        create: Arc<CreateWarehouse>,
        replace: Arc<ReplaceWarehouse>,
        archive: Arc<ArchiveWarehouse>,
        queries: Arc<WarehouseQueries>,
    ) -> Self {
        Self {
            create,
            replace,
            archive,
            queries,
        }
    }
}

/// Read path, straight through to the repository.
pub struct WarehouseQueries {
    warehouse_repo: Arc<dyn WarehouseRepo>,
}

impl WarehouseQueries {
    pub fn new(warehouse_repo: Arc<dyn WarehouseRepo>) -> Self {
        Self { warehouse_repo }
    }

    pub async fn list_active(&self) -> Result<Vec<Warehouse>, RepoError> {
        self.warehouse_repo.list_active().await
    }

    /// Archived warehouses are reported as absent.
    pub async fn get_active(
        &self,
        code: &BusinessUnitCode,
    ) -> Result<Option<Warehouse>, RepoError> {
        Ok(self
            .warehouse_repo
            .find_by_code(code)
            .await?
            .filter(Warehouse::is_active))
    }
}

fn log_outcome(
    operation: &'static str,
    code: &BusinessUnitCode,
    result: &Result<Warehouse, WarehouseError>,
) {
    match result {
        Ok(warehouse) => tracing::info!(
            operation,
            business_unit_code = %code,
            location = %warehouse.location,
            capacity = warehouse.capacity,
            stock = warehouse.stock,
            "Warehouse operation succeeded"
        ),
        Err(WarehouseError::Validation(failure)) => tracing::warn!(
            operation,
            business_unit_code = %code,
            kind = %failure.kind,
            reason = %failure.message,
            "Warehouse operation rejected"
        ),
        Err(WarehouseError::Repo(e)) => tracing::error!(
            operation,
            business_unit_code = %code,
            error = %e,
            "Warehouse operation failed"
        ),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, TimeZone, Utc};
    use fulfilment_domain::{BusinessUnitCode, Location, LocationIdentifier, Warehouse};

    use crate::infrastructure::ports::MockLocationDirectory;

    pub fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 7, 1, 12, 0, 0).unwrap()
    }

    pub fn location(id: &str, max_number_of_warehouses: u32, max_capacity: u32) -> Location {
        Location::new(
            LocationIdentifier::new(id).unwrap(),
            max_number_of_warehouses,
            max_capacity,
        )
    }

    pub fn warehouse(code: &str, location: &str, capacity: u32, stock: u32) -> Warehouse {
        Warehouse::new(
            BusinessUnitCode::new(code).unwrap(),
            LocationIdentifier::new(location).unwrap(),
            capacity,
            stock,
        )
    }

    /// Directory that knows exactly one location.
    pub fn directory_with(known: Location) -> MockLocationDirectory {
        let mut directory = MockLocationDirectory::new();
        directory
            .expect_resolve_by_identifier()
            .returning(move |id| (id == known.identification.as_str()).then(|| known.clone()));
        directory
    }
}
