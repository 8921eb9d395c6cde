//! SQLite warehouse repository.

use async_trait::async_trait;
use fulfilment_domain::common::parse_datetime_opt;
use fulfilment_domain::{BusinessUnitCode, LocationIdentifier, Warehouse};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::{column_u32, map_sqlx_error};
use crate::infrastructure::ports::{RepoError, WarehouseRepo};

const SELECT_COLUMNS: &str =
    "SELECT business_unit_code, location, capacity, stock, created_at, archived_at FROM warehouse";

pub struct SqliteWarehouseRepo {
    pool: SqlitePool,
}

impl SqliteWarehouseRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_warehouse(row: SqliteRow) -> Result<Warehouse, RepoError> {
        let code: String = row
            .try_get("business_unit_code")
            .map_err(|e| RepoError::database("warehouse_row", e))?;
        let location: String = row
            .try_get("location")
            .map_err(|e| RepoError::database("warehouse_row", e))?;
        let capacity: Option<i64> = row
            .try_get("capacity")
            .map_err(|e| RepoError::database("warehouse_row", e))?;
        let stock: Option<i64> = row
            .try_get("stock")
            .map_err(|e| RepoError::database("warehouse_row", e))?;
        let created_at: Option<String> = row
            .try_get("created_at")
            .map_err(|e| RepoError::database("warehouse_row", e))?;
        let archived_at: Option<String> = row
            .try_get("archived_at")
            .map_err(|e| RepoError::database("warehouse_row", e))?;

        Ok(Warehouse {
            business_unit_code: BusinessUnitCode::new(code)
                .map_err(RepoError::serialization)?,
            location: LocationIdentifier::new(location)
                .map_err(RepoError::serialization)?,
            capacity: column_u32(capacity, "capacity")?,
            stock: column_u32(stock, "stock")?,
            creation_at: parse_datetime_opt(created_at.as_deref())
                .map_err(RepoError::serialization)?,
            archived_at: parse_datetime_opt(archived_at.as_deref())
                .map_err(RepoError::serialization)?,
        })
    }
}

#[async_trait]
impl WarehouseRepo for SqliteWarehouseRepo {
    async fn find_by_code(
        &self,
        code: &BusinessUnitCode,
    ) -> Result<Option<Warehouse>, RepoError> {
        let row = sqlx::query(&format!("{SELECT_COLUMNS} WHERE business_unit_code = ?"))
            .bind(code.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("find_by_code", e))?;

        row.map(Self::row_to_warehouse).transpose()
    }

    async fn count_active_by_location(
        &self,
        location: &LocationIdentifier,
    ) -> Result<u64, RepoError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM warehouse WHERE location = ? AND archived_at IS NULL",
        )
        .bind(location.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("count_active_by_location", e))?;

        u64::try_from(count).map_err(|_| RepoError::serialization("negative warehouse count"))
    }

    async fn sum_capacity_by_location(
        &self,
        location: &LocationIdentifier,
    ) -> Result<u64, RepoError> {
        let sum: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(COALESCE(capacity, 0)), 0) FROM warehouse \
             WHERE location = ? AND archived_at IS NULL",
        )
        .bind(location.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("sum_capacity_by_location", e))?;

        u64::try_from(sum).map_err(|_| RepoError::serialization("negative capacity sum"))
    }

    async fn list_active(&self) -> Result<Vec<Warehouse>, RepoError> {
        let rows = sqlx::query(&format!(
            "{SELECT_COLUMNS} WHERE archived_at IS NULL ORDER BY business_unit_code ASC"
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("list_active", e))?;

        rows.into_iter().map(Self::row_to_warehouse).collect()
    }

    async fn create(&self, warehouse: &Warehouse) -> Result<(), RepoError> {
        sqlx::query(
            r#"
            INSERT INTO warehouse
                (business_unit_code, location, capacity, stock, created_at, archived_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(warehouse.business_unit_code.as_str())
        .bind(warehouse.location.as_str())
        .bind(i64::from(warehouse.capacity))
        .bind(i64::from(warehouse.stock))
        .bind(warehouse.creation_at.map(|t| t.to_rfc3339()))
        .bind(warehouse.archived_at.map(|t| t.to_rfc3339()))
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_warehouse", e))?;

        Ok(())
    }

    async fn update(&self, warehouse: &Warehouse) -> Result<(), RepoError> {
        // created_at is owned by the stored row and never overwritten here
        let result = sqlx::query(
            r#"
            UPDATE warehouse
            SET location = ?, capacity = ?, stock = ?, archived_at = ?
            WHERE business_unit_code = ?
            "#,
        )
        .bind(warehouse.location.as_str())
        .bind(i64::from(warehouse.capacity))
        .bind(i64::from(warehouse.stock))
        .bind(warehouse.archived_at.map(|t| t.to_rfc3339()))
        .bind(warehouse.business_unit_code.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_warehouse", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found(
                "Warehouse",
                &warehouse.business_unit_code,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sqlite::test_pool;
    use chrono::{TimeZone, Utc};

    fn code(s: &str) -> BusinessUnitCode {
        BusinessUnitCode::new(s).unwrap()
    }

    fn loc(s: &str) -> LocationIdentifier {
        LocationIdentifier::new(s).unwrap()
    }

    fn warehouse(c: &str, l: &str, capacity: u32, stock: u32) -> Warehouse {
        Warehouse::new(code(c), loc(l), capacity, stock)
            .with_creation_at(Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap())
    }

    #[tokio::test]
    async fn create_then_find_round_trips_all_fields() {
        let repo = SqliteWarehouseRepo::new(test_pool().await);
        let w = warehouse("MWH.001", "ZWOLLE-001", 40, 10);

        repo.create(&w).await.unwrap();

        let found = repo.find_by_code(&code("MWH.001")).await.unwrap();
        assert_eq!(found, Some(w));
        assert!(repo.find_by_code(&code("MWH.404")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_code_is_a_constraint_violation() {
        let repo = SqliteWarehouseRepo::new(test_pool().await);
        repo.create(&warehouse("MWH.001", "ZWOLLE-001", 40, 10))
            .await
            .unwrap();

        let err = repo
            .create(&warehouse("MWH.001", "AMSTERDAM-001", 10, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, RepoError::ConstraintViolation(_)));
    }

    #[tokio::test]
    async fn aggregates_ignore_archived_warehouses() {
        let repo = SqliteWarehouseRepo::new(test_pool().await);
        repo.create(&warehouse("MWH.001", "AMSTERDAM-001", 30, 0))
            .await
            .unwrap();
        repo.create(&warehouse("MWH.002", "AMSTERDAM-001", 20, 0))
            .await
            .unwrap();
        repo.create(&warehouse("MWH.003", "ZWOLLE-001", 40, 0))
            .await
            .unwrap();

        let archived = warehouse("MWH.002", "AMSTERDAM-001", 20, 0)
            .archived(Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap())
            .unwrap();
        repo.update(&archived).await.unwrap();

        let amsterdam = loc("AMSTERDAM-001");
        assert_eq!(repo.count_active_by_location(&amsterdam).await.unwrap(), 1);
        assert_eq!(repo.sum_capacity_by_location(&amsterdam).await.unwrap(), 30);
    }

    #[tokio::test]
    async fn sum_for_empty_location_is_zero() {
        let repo = SqliteWarehouseRepo::new(test_pool().await);
        let empty = loc("VETSBY-001");
        assert_eq!(repo.sum_capacity_by_location(&empty).await.unwrap(), 0);
        assert_eq!(repo.count_active_by_location(&empty).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn null_capacity_counts_as_zero() {
        let pool = test_pool().await;
        sqlx::query(
            "INSERT INTO warehouse (business_unit_code, location, capacity, stock) \
             VALUES ('MWH.NULL', 'ZWOLLE-002', NULL, NULL)",
        )
        .execute(&pool)
        .await
        .unwrap();
        let repo = SqliteWarehouseRepo::new(pool);
        repo.create(&warehouse("MWH.002", "ZWOLLE-002", 25, 0))
            .await
            .unwrap();

        let zwolle = loc("ZWOLLE-002");
        assert_eq!(repo.sum_capacity_by_location(&zwolle).await.unwrap(), 25);

        let stored = repo.find_by_code(&code("MWH.NULL")).await.unwrap().unwrap();
        assert_eq!(stored.capacity, 0);
        assert_eq!(stored.stock, 0);
        assert!(stored.creation_at.is_none());
    }

    #[tokio::test]
    async fn list_active_is_sorted_and_skips_archived() {
        let repo = SqliteWarehouseRepo::new(test_pool().await);
        for c in ["MWH.023", "MWH.001", "MWH.012"] {
            repo.create(&warehouse(c, "AMSTERDAM-001", 10, 0))
                .await
                .unwrap();
        }
        let archived = warehouse("MWH.012", "AMSTERDAM-001", 10, 0)
            .archived(Utc.with_ymd_and_hms(2024, 8, 1, 0, 0, 0).unwrap())
            .unwrap();
        repo.update(&archived).await.unwrap();

        let codes: Vec<String> = repo
            .list_active()
            .await
            .unwrap()
            .into_iter()
            .map(|w| w.business_unit_code.to_string())
            .collect();
        assert_eq!(codes, vec!["MWH.001", "MWH.023"]);
    }

    #[tokio::test]
    async fn update_overwrites_but_keeps_created_at() {
        let repo = SqliteWarehouseRepo::new(test_pool().await);
        let original = warehouse("MWH.001", "ZWOLLE-002", 20, 5);
        repo.create(&original).await.unwrap();

        let mut replacement = Warehouse::new(code("MWH.001"), loc("EINDHOVEN-001"), 30, 5);
        replacement.creation_at = Some(Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap());
        repo.update(&replacement).await.unwrap();

        let stored = repo.find_by_code(&code("MWH.001")).await.unwrap().unwrap();
        assert_eq!(stored.location.as_str(), "EINDHOVEN-001");
        assert_eq!(stored.capacity, 30);
        assert_eq!(stored.creation_at, original.creation_at);
    }

    #[tokio::test]
    async fn update_of_unknown_code_fails() {
        let repo = SqliteWarehouseRepo::new(test_pool().await);
        let err = repo
            .update(&warehouse("MWH.404", "ZWOLLE-001", 10, 0))
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
