//! SQLite store repository.

use async_trait::async_trait;
use fulfilment_domain::{NewStore, Store, StoreId, StoreName};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::{column_u32, map_sqlx_error};
use crate::infrastructure::ports::{RepoError, StoreRepo};

pub struct SqliteStoreRepo {
    pool: SqlitePool,
}

impl SqliteStoreRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_store(row: SqliteRow) -> Result<Store, RepoError> {
        let get_err = |e: sqlx::Error| RepoError::database("store_row", e);
        let id: i64 = row.try_get("id").map_err(get_err)?;
        let name: String = row.try_get("name").map_err(get_err)?;
        let quantity: Option<i64> = row.try_get("quantity_products_in_stock").map_err(get_err)?;

        Ok(Store {
            id: StoreId::new(id),
            name: StoreName::new(name).map_err(RepoError::serialization)?,
            quantity_products_in_stock: column_u32(quantity, "quantity_products_in_stock")?,
        })
    }
}

#[async_trait]
impl StoreRepo for SqliteStoreRepo {
    async fn list(&self) -> Result<Vec<Store>, RepoError> {
        let rows = sqlx::query("SELECT id, name, quantity_products_in_stock FROM store ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_stores", e))?;

        rows.into_iter().map(Self::row_to_store).collect()
    }

    async fn get(&self, id: StoreId) -> Result<Option<Store>, RepoError> {
        let row = sqlx::query("SELECT id, name, quantity_products_in_stock FROM store WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_store", e))?;

        row.map(Self::row_to_store).transpose()
    }

    async fn create(&self, store: NewStore) -> Result<Store, RepoError> {
        let result =
            sqlx::query("INSERT INTO store (name, quantity_products_in_stock) VALUES (?, ?)")
                .bind(store.name.as_str())
                .bind(i64::from(store.quantity_products_in_stock))
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("create_store", e))?;

        Ok(store.into_store(StoreId::new(result.last_insert_rowid())))
    }

    async fn update(&self, store: &Store) -> Result<(), RepoError> {
        let result =
            sqlx::query("UPDATE store SET name = ?, quantity_products_in_stock = ? WHERE id = ?")
                .bind(store.name.as_str())
                .bind(i64::from(store.quantity_products_in_stock))
                .bind(store.id.as_i64())
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error("update_store", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Store", store.id));
        }
        Ok(())
    }

    async fn delete(&self, id: StoreId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM store WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_store", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::sqlite::test_pool;

    fn new_store(name: &str, quantity: u32) -> NewStore {
        NewStore::new(StoreName::new(name).unwrap(), quantity)
    }

    #[tokio::test]
    async fn crud_cycle() {
        let repo = SqliteStoreRepo::new(test_pool().await);
        let mut store = repo.create(new_store("TONSTAD", 10)).await.unwrap();
        repo.create(new_store("KALLAX", 5)).await.unwrap();

        let names: Vec<String> = repo
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|s| s.name.to_string())
            .collect();
        assert_eq!(names, vec!["KALLAX", "TONSTAD"]);

        store.quantity_products_in_stock = 42;
        repo.update(&store).await.unwrap();
        assert_eq!(repo.get(store.id).await.unwrap(), Some(store.clone()));

        assert!(repo.delete(store.id).await.unwrap());
        assert!(repo.get(store.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn duplicate_name_is_a_constraint_violation() {
        let repo = SqliteStoreRepo::new(test_pool().await);
        repo.create(new_store("BESTA", 1)).await.unwrap();
        let err = repo.create(new_store("BESTA", 2)).await.unwrap_err();
        assert!(matches!(err, RepoError::ConstraintViolation(_)));
    }
}
