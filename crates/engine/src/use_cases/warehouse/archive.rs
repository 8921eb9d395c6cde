//! Archive warehouse use case.

use std::sync::Arc;

use fulfilment_domain::{BusinessUnitCode, Warehouse};

use crate::infrastructure::ports::{ClockPort, WarehouseRepo};

use super::error::{ValidationFailure, WarehouseError};
use super::locks::AdmissionLocks;
use super::log_outcome;

/// Retires a warehouse. The record stays stored and its code stays taken, but it
/// no longer counts towards its location.
pub struct ArchiveWarehouse {
    warehouse_repo: Arc<dyn WarehouseRepo>,
    locks: Arc<AdmissionLocks>,
    clock: Arc<dyn ClockPort>,
}

impl ArchiveWarehouse {
    pub fn new(
        warehouse_repo: Arc<dyn WarehouseRepo>,
        locks: Arc<AdmissionLocks>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            warehouse_repo,
            locks,
            clock,
        }
    }

    pub async fn execute(&self, code: &BusinessUnitCode) -> Result<Warehouse, WarehouseError> {
        let result = self.archive(code).await;
        log_outcome("archive", code, &result);
        result
    }

    async fn archive(&self, code: &BusinessUnitCode) -> Result<Warehouse, WarehouseError> {
        // Archiving only frees room at a location, so no location lock is needed
        let _code_guard = self.locks.lock_code(code).await;

        let existing = self
            .warehouse_repo
            .find_by_code(code)
            .await?
            .ok_or_else(|| ValidationFailure::not_found(code))?;

        let archived = existing
            .archived(self.clock.now())
            .map_err(|_| ValidationFailure::already_archived(code))?;

        self.warehouse_repo.update(&archived).await?;
        Ok(archived)
    }
}
