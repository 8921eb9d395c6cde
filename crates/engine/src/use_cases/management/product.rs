//! Product CRUD.

use std::sync::Arc;

use fulfilment_domain::{Decimal, NewProduct, Product, ProductId, ProductName};

use crate::infrastructure::ports::ProductRepo;

use super::ManagementError;

/// Caller-supplied product fields, used for both create and full update.
#[derive(Debug, Clone, Default)]
pub struct ProductInput {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: u32,
}

impl ProductInput {
    fn name(&self) -> Result<ProductName, ManagementError> {
        let name = self.name.as_deref().ok_or_else(|| {
            ManagementError::InvalidInput("Product Name was not set on request.".into())
        })?;
        ProductName::new(name).map_err(|e| ManagementError::InvalidInput(e.to_string()))
    }
}

pub struct ProductCrud {
    product_repo: Arc<dyn ProductRepo>,
}

impl ProductCrud {
    pub fn new(product_repo: Arc<dyn ProductRepo>) -> Self {
        Self { product_repo }
    }

    pub async fn list(&self) -> Result<Vec<Product>, ManagementError> {
        Ok(self.product_repo.list().await?)
    }

    pub async fn get(&self, id: ProductId) -> Result<Product, ManagementError> {
        self.product_repo
            .get(id)
            .await?
            .ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, input: ProductInput) -> Result<Product, ManagementError> {
        let name = input.name()?;
        let mut product = NewProduct::new(name.clone()).with_stock(input.stock);
        product.description = input.description;
        product.price = input.price;

        let product = self
            .product_repo
            .create(product)
            .await
            .map_err(|e| ManagementError::from_write(e, || duplicate(&name)))?;

        tracing::info!(product_id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Overwrite every field of an existing product.
    pub async fn update(
        &self,
        id: ProductId,
        input: ProductInput,
    ) -> Result<Product, ManagementError> {
        let name = input.name()?;
        let existing = self.get(id).await?;

        let product = Product {
            id: existing.id,
            name,
            description: input.description,
            price: input.price,
            stock: input.stock,
        };

        self.product_repo
            .update(&product)
            .await
            .map_err(|e| {
                ManagementError::from_update(e, || not_found(id), || duplicate(&product.name))
            })?;

        tracing::info!(product_id = %id, "Product updated");
        Ok(product)
    }

    pub async fn delete(&self, id: ProductId) -> Result<(), ManagementError> {
        if !self.product_repo.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }
}

fn not_found(id: ProductId) -> ManagementError {
    ManagementError::NotFound(format!("Product with id of {id} does not exist."))
}

fn duplicate(name: &ProductName) -> String {
    format!("Product name already exists: {name}")
}
