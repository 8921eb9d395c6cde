//! Create warehouse use case.

use std::sync::Arc;

use fulfilment_domain::Warehouse;

use crate::infrastructure::ports::{ClockPort, RepoError, WarehouseRepo};

use super::error::{ValidationFailure, WarehouseError};
use super::locks::AdmissionLocks;
use super::validator::WarehouseValidator;
use super::log_outcome;

/// Admits a brand-new warehouse at its location.
pub struct CreateWarehouse {
    warehouse_repo: Arc<dyn WarehouseRepo>,
    validator: Arc<WarehouseValidator>,
    locks: Arc<AdmissionLocks>,
    clock: Arc<dyn ClockPort>,
}

impl CreateWarehouse {
    pub fn new(
        warehouse_repo: Arc<dyn WarehouseRepo>,
        validator: Arc<WarehouseValidator>,
        locks: Arc<AdmissionLocks>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        Self {
            warehouse_repo,
            validator,
            locks,
            clock,
        }
    }

    /// Validate and persist `proposal`, returning the stored snapshot.
    ///
    /// Rules run in a fixed order and the first failure wins: unique code, known
    /// location, free slot at the location, capacity cap, capacity holds stock.
    /// Nothing is written unless every rule passes.
    pub async fn execute(&self, proposal: Warehouse) -> Result<Warehouse, WarehouseError> {
        let code = proposal.business_unit_code.clone();
        let result = self.admit(proposal).await;
        log_outcome("create", &code, &result);
        result
    }

    async fn admit(&self, proposal: Warehouse) -> Result<Warehouse, WarehouseError> {
        let _code_guard = self.locks.lock_code(&proposal.business_unit_code).await;

        self.validator
            .validate_business_unit_code_unique(&proposal.business_unit_code)
            .await?;

        let location = self.validator.validate_location(proposal.location.as_str())?;
        let _location_guard = self.locks.lock_location(&location.identification).await;

        self.validator.validate_location_feasibility(&location).await?;
        self.validator
            .validate_capacity(&location, proposal.capacity, None)
            .await?;

        if !proposal.can_hold(proposal.stock) {
            return Err(ValidationFailure::invalid_stock().into());
        }

        let warehouse = Warehouse {
            creation_at: Some(self.clock.now()),
            archived_at: None,
            ..proposal
        };

        self.warehouse_repo
            .create(&warehouse)
            .await
            .map_err(|e| match e {
                // Another process took the code between check and insert
                RepoError::ConstraintViolation(_) => {
                    WarehouseError::from(ValidationFailure::duplicate_code(
                        &warehouse.business_unit_code,
                    ))
                }
                e => WarehouseError::Repo(e),
            })?;

        Ok(warehouse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::clock::FixedClock;
    use crate::infrastructure::ports::{MockLocationDirectory, MockWarehouseRepo};
    use crate::use_cases::warehouse::error::ValidationKind;
    use crate::use_cases::warehouse::test_support::{directory_with, fixed_now, location, warehouse};

    fn use_case(repo: MockWarehouseRepo, directory: MockLocationDirectory) -> CreateWarehouse {
        let repo: Arc<dyn WarehouseRepo> = Arc::new(repo);
        CreateWarehouse::new(
            repo.clone(),
            Arc::new(WarehouseValidator::new(repo, Arc::new(directory))),
            Arc::new(AdmissionLocks::new()),
            Arc::new(FixedClock(fixed_now())),
        )
    }

    /// Repo with `count` active warehouses and `sum` capacity at every location.
    fn repo_with(count: u64, sum: u64) -> MockWarehouseRepo {
        let mut repo = MockWarehouseRepo::new();
        repo.expect_find_by_code().returning(|_| Ok(None));
        repo.expect_count_active_by_location()
            .returning(move |_| Ok(count));
        repo.expect_sum_capacity_by_location()
            .returning(move |_| Ok(sum));
        repo
    }

    #[tokio::test]
    async fn creates_and_stamps_creation_time() {
        let mut repo = repo_with(0, 0);
        repo.expect_create()
            .withf(|w| {
                w.business_unit_code.as_str() == "BU-1"
                    && w.creation_at == Some(fixed_now())
                    && w.archived_at.is_none()
            })
            .times(1)
            .returning(|_| Ok(()));

        let created = use_case(repo, directory_with(location("LOC-1", 1, 100)))
            .execute(warehouse("BU-1", "LOC-1", 100, 50))
            .await
            .unwrap();

        assert_eq!(created.creation_at, Some(fixed_now()));
        assert_eq!(created.capacity, 100);
        assert_eq!(created.stock, 50);
    }

    #[tokio::test]
    async fn second_warehouse_at_single_slot_location_is_rejected() {
        let mut repo = repo_with(1, 100);
        repo.expect_create().never();

        let err = use_case(repo, directory_with(location("LOC-1", 1, 100)))
            .execute(warehouse("BU-2", "LOC-1", 10, 0))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), Some(ValidationKind::LocationFull));
    }

    #[tokio::test]
    async fn capacity_over_location_cap_is_rejected() {
        let mut repo = repo_with(1, 100);
        repo.expect_create().never();

        let err = use_case(repo, directory_with(location("LOC-1", 2, 150)))
            .execute(warehouse("BU-2", "LOC-1", 60, 0))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), Some(ValidationKind::CapacityExceeded));
    }

    #[tokio::test]
    async fn stock_above_capacity_is_rejected_without_persisting() {
        let mut repo = repo_with(0, 0);
        repo.expect_create().never();

        let err = use_case(repo, directory_with(location("LOC-1", 1, 100)))
            .execute(warehouse("BU-1", "LOC-1", 40, 50))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), Some(ValidationKind::InvalidStock));
    }

    #[tokio::test]
    async fn duplicate_code_wins_over_every_other_rule() {
        let mut repo = MockWarehouseRepo::new();
        repo.expect_find_by_code()
            .returning(|_| Ok(Some(warehouse("BU-1", "LOC-1", 10, 0))));
        repo.expect_count_active_by_location().never();
        repo.expect_sum_capacity_by_location().never();
        repo.expect_create().never();

        let mut directory = MockLocationDirectory::new();
        directory.expect_resolve_by_identifier().never();

        // Unknown location and stock above capacity would also fail
        let err = use_case(repo, directory)
            .execute(warehouse("BU-1", "NOWHERE", 1, 5))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), Some(ValidationKind::DuplicateCode));
        assert_eq!(err.to_string(), "Business unit code already exists: BU-1");
    }

    #[tokio::test]
    async fn unknown_location_checked_before_aggregates() {
        let mut repo = MockWarehouseRepo::new();
        repo.expect_find_by_code().returning(|_| Ok(None));
        repo.expect_count_active_by_location().never();
        repo.expect_create().never();

        let mut directory = MockLocationDirectory::new();
        directory.expect_resolve_by_identifier().returning(|_| None);

        let err = use_case(repo, directory)
            .execute(warehouse("BU-1", "NOWHERE", 10, 0))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), Some(ValidationKind::UnknownLocation));
    }

    #[tokio::test]
    async fn full_location_reported_before_capacity() {
        let mut repo = repo_with(1, 100);
        repo.expect_create().never();

        let err = use_case(repo, directory_with(location("LOC-1", 1, 100)))
            .execute(warehouse("BU-2", "LOC-1", 500, 600))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), Some(ValidationKind::LocationFull));
    }

    #[tokio::test]
    async fn unique_violation_on_insert_is_a_duplicate() {
        let mut repo = repo_with(0, 0);
        repo.expect_create()
            .returning(|_| Err(RepoError::constraint("UNIQUE constraint failed")));

        let err = use_case(repo, directory_with(location("LOC-1", 1, 100)))
            .execute(warehouse("BU-1", "LOC-1", 10, 0))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), Some(ValidationKind::DuplicateCode));
    }

    #[tokio::test]
    async fn database_failure_is_not_a_validation_failure() {
        let mut repo = repo_with(0, 0);
        repo.expect_create()
            .returning(|_| Err(RepoError::database("create_warehouse", "locked")));

        let err = use_case(repo, directory_with(location("LOC-1", 1, 100)))
            .execute(warehouse("BU-1", "LOC-1", 10, 0))
            .await
            .unwrap_err();

        assert!(matches!(err, WarehouseError::Repo(_)));
        assert_eq!(err.kind(), None);
    }
}
