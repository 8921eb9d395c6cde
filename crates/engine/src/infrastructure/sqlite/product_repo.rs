//! SQLite product repository.

use std::str::FromStr;

use async_trait::async_trait;
use fulfilment_domain::{Decimal, NewProduct, Product, ProductId, ProductName};
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};

use super::{column_u32, map_sqlx_error};
use crate::infrastructure::ports::{ProductRepo, RepoError};

pub struct SqliteProductRepo {
    pool: SqlitePool,
}

impl SqliteProductRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_product(row: SqliteRow) -> Result<Product, RepoError> {
        let get_err = |e: sqlx::Error| RepoError::database("product_row", e);
        let id: i64 = row.try_get("id").map_err(get_err)?;
        let name: String = row.try_get("name").map_err(get_err)?;
        let description: Option<String> = row.try_get("description").map_err(get_err)?;
        let price: Option<String> = row.try_get("price").map_err(get_err)?;
        let stock: Option<i64> = row.try_get("stock").map_err(get_err)?;

        let price = price
            .as_deref()
            .map(Decimal::from_str)
            .transpose()
            .map_err(RepoError::serialization)?;

        Ok(Product {
            id: ProductId::new(id),
            name: ProductName::new(name).map_err(RepoError::serialization)?,
            description,
            price,
            stock: column_u32(stock, "stock")?,
        })
    }
}

#[async_trait]
impl ProductRepo for SqliteProductRepo {
    async fn list(&self) -> Result<Vec<Product>, RepoError> {
        let rows = sqlx::query("SELECT id, name, description, price, stock FROM product ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("list_products", e))?;

        rows.into_iter().map(Self::row_to_product).collect()
    }

    async fn get(&self, id: ProductId) -> Result<Option<Product>, RepoError> {
        let row = sqlx::query("SELECT id, name, description, price, stock FROM product WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("get_product", e))?;

        row.map(Self::row_to_product).transpose()
    }

    async fn create(&self, product: NewProduct) -> Result<Product, RepoError> {
        let result = sqlx::query(
            "INSERT INTO product (name, description, price, stock) VALUES (?, ?, ?, ?)",
        )
        .bind(product.name.as_str())
        .bind(product.description.as_deref())
        .bind(product.price.map(|p| p.to_string()))
        .bind(i64::from(product.stock))
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_product", e))?;

        Ok(product.into_product(ProductId::new(result.last_insert_rowid())))
    }

    async fn update(&self, product: &Product) -> Result<(), RepoError> {
        let result = sqlx::query(
            "UPDATE product SET name = ?, description = ?, price = ?, stock = ? WHERE id = ?",
        )
        .bind(product.name.as_str())
        .bind(product.description.as_deref())
        .bind(product.price.map(|p| p.to_string()))
        .bind(i64::from(product.stock))
        .bind(product.id.as_i64())
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("update_product", e))?;

        if result.rows_affected() == 0 {
            return Err(RepoError::not_found("Product", product.id));
        }
        Ok(())
    }

    async fn delete(&self, id: ProductId) -> Result<bool, RepoError> {
        let result = sqlx::query("DELETE FROM product WHERE id = ?")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(|e| map_sqlx_error("delete_product", e))?;

        Ok(result.rows_affected() > 0)
    }
}
