//! Warehouse admission rules.

use std::sync::Arc;

use fulfilment_domain::{BusinessUnitCode, Location, LocationIdentifier};

use crate::infrastructure::ports::{LocationDirectory, WarehouseRepo};

use super::error::{ValidationFailure, WarehouseError};

/// Stateless rule engine shared by the lifecycle use cases.
///
/// Every check reads current data from its collaborators and never mutates.
pub struct WarehouseValidator {
    warehouse_repo: Arc<dyn WarehouseRepo>,
    locations: Arc<dyn LocationDirectory>,
}

impl WarehouseValidator {
    pub fn new(
        warehouse_repo: Arc<dyn WarehouseRepo>,
        locations: Arc<dyn LocationDirectory>,
    ) -> Self {
        Self {
            warehouse_repo,
            locations,
        }
    }

    /// Resolve `identifier` in the location directory.
    pub fn validate_location(&self, identifier: &str) -> Result<Location, WarehouseError> {
        self.locations
            .resolve_by_identifier(identifier)
            .ok_or_else(|| ValidationFailure::unknown_location(identifier).into())
    }

    /// Codes are never reused, so archived warehouses count too.
    pub async fn validate_business_unit_code_unique(
        &self,
        code: &BusinessUnitCode,
    ) -> Result<(), WarehouseError> {
        if self.warehouse_repo.find_by_code(code).await?.is_some() {
            return Err(ValidationFailure::duplicate_code(code).into());
        }
        Ok(())
    }

    /// Fails when `location` already holds its maximum number of active warehouses.
    pub async fn validate_location_feasibility(
        &self,
        location: &Location,
    ) -> Result<(), WarehouseError> {
        let active = self
            .warehouse_repo
            .count_active_by_location(&location.identification)
            .await?;

        if active >= u64::from(location.max_number_of_warehouses) {
            return Err(ValidationFailure::location_full(
                location.identification.as_str(),
                location.max_number_of_warehouses,
            )
            .into());
        }
        Ok(())
    }

    /// Fails when adding `new_capacity` would push the location over its cap.
    ///
    /// `existing_capacity` is the contribution being replaced at this same location;
    /// it is removed from the current total before the new one is added.
    pub async fn validate_capacity(
        &self,
        location: &Location,
        new_capacity: u32,
        existing_capacity: Option<u32>,
    ) -> Result<(), WarehouseError> {
        let current = self.sum_capacity(&location.identification).await?;
        let total = current.saturating_sub(u64::from(existing_capacity.unwrap_or(0)))
            + u64::from(new_capacity);

        if total > u64::from(location.max_capacity) {
            return Err(ValidationFailure::capacity_exceeded(
                location.identification.as_str(),
                location.max_capacity,
            )
            .into());
        }
        Ok(())
    }

    async fn sum_capacity(&self, location: &LocationIdentifier) -> Result<u64, WarehouseError> {
        Ok(self
            .warehouse_repo
            .sum_capacity_by_location(location)
            .await?)
    }
}
