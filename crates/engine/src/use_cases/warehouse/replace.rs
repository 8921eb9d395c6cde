//! Replace warehouse use case.

use std::sync::Arc;

use fulfilment_domain::Warehouse;

use crate::infrastructure::ports::WarehouseRepo;

use super::error::{ValidationFailure, WarehouseError};
use super::locks::AdmissionLocks;
use super::validator::WarehouseValidator;
use super::log_outcome;

/// Swaps the attributes of an active warehouse while keeping its identity,
/// creation time and stock.
pub struct ReplaceWarehouse {
    warehouse_repo: Arc<dyn WarehouseRepo>,
    validator: Arc<WarehouseValidator>,
    locks: Arc<AdmissionLocks>,
}

impl ReplaceWarehouse {
    pub fn new(
        warehouse_repo: Arc<dyn WarehouseRepo>,
        validator: Arc<WarehouseValidator>,
        locks: Arc<AdmissionLocks>,
    ) -> Self {
        Self {
            warehouse_repo,
            validator,
            locks,
        }
    }

    /// Replace the stored warehouse with the same business unit code.
    ///
    /// A move to another location is admitted like a new warehouse there. At the
    /// same location the old capacity is taken out of the total before the new one
    /// is added, and no slot check is made.
    pub async fn execute(&self, replacement: Warehouse) -> Result<Warehouse, WarehouseError> {
        let code = replacement.business_unit_code.clone();
        let result = self.replace(replacement).await;
        log_outcome("replace", &code, &result);
        result
    }

    async fn replace(&self, replacement: Warehouse) -> Result<Warehouse, WarehouseError> {
        let code = &replacement.business_unit_code;
        let _code_guard = self.locks.lock_code(code).await;

        let existing = self
            .warehouse_repo
            .find_by_code(code)
            .await?
            .ok_or_else(|| ValidationFailure::not_found(code))?;

        if existing.is_archived() {
            return Err(ValidationFailure::cannot_replace_archived(code).into());
        }

        let location = self
            .validator
            .validate_location(replacement.location.as_str())?;
        let _location_guard = self.locks.lock_location(&location.identification).await;

        let same_location = existing.location == replacement.location;
        if !same_location {
            self.validator.validate_location_feasibility(&location).await?;
        }

        if !replacement.can_hold(existing.stock) {
            return Err(ValidationFailure::insufficient_capacity(existing.stock).into());
        }

        self.validator
            .validate_capacity(
                &location,
                replacement.capacity,
                same_location.then_some(existing.capacity),
            )
            .await?;

        if replacement.stock != existing.stock {
            return Err(ValidationFailure::stock_mismatch(existing.stock).into());
        }

        let replacement = Warehouse {
            creation_at: existing.creation_at,
            archived_at: None,
            ..replacement
        };
        self.warehouse_repo.update(&replacement).await?;

        Ok(replacement)
    }
}
