//! Store CRUD with legacy notifications.

use std::sync::Arc;

use fulfilment_domain::{NewStore, Store, StoreId, StoreName};

use crate::infrastructure::ports::{LegacyStorePort, StoreRepo};

use super::ManagementError;

/// Caller-supplied store fields for create and full update.
#[derive(Debug, Clone, Default)]
pub struct StoreInput {
    pub name: Option<String>,
    pub quantity_products_in_stock: u32,
}

/// Partial update; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct StorePatch {
    pub name: Option<String>,
    pub quantity_products_in_stock: Option<u32>,
}

pub struct StoreCrud {
    store_repo: Arc<dyn StoreRepo>,
    legacy: Arc<dyn LegacyStorePort>,
}

impl StoreCrud {
    pub fn new(store_repo: Arc<dyn StoreRepo>, legacy: Arc<dyn LegacyStorePort>) -> Self {
        Self { store_repo, legacy }
    }

    pub async fn list(&self) -> Result<Vec<Store>, ManagementError> {
        Ok(self.store_repo.list().await?)
    }

    pub async fn get(&self, id: StoreId) -> Result<Store, ManagementError> {
        self.store_repo.get(id).await?.ok_or_else(|| not_found(id))
    }

    pub async fn create(&self, input: StoreInput) -> Result<Store, ManagementError> {
        let name = required_name(input.name.as_deref())?;

        let store = self
            .store_repo
            .create(NewStore::new(name.clone(), input.quantity_products_in_stock))
            .await
            .map_err(|e| ManagementError::from_write(e, || duplicate(&name)))?;

        tracing::info!(store_id = %store.id, name = %store.name, "Store created");
        self.legacy.store_created(&store).await;
        Ok(store)
    }

    /// Overwrite every field of an existing store.
    pub async fn update(&self, id: StoreId, input: StoreInput) -> Result<Store, ManagementError> {
        let name = required_name(input.name.as_deref())?;
        let existing = self.get(id).await?;

        let store = Store {
            id: existing.id,
            name,
            quantity_products_in_stock: input.quantity_products_in_stock,
        };
        self.write(&store).await?;

        tracing::info!(store_id = %id, "Store updated");
        self.legacy.store_updated(&store).await;
        Ok(store)
    }

    pub async fn patch(&self, id: StoreId, patch: StorePatch) -> Result<Store, ManagementError> {
        let name = patch
            .name
            .as_deref()
            .map(|n| required_name(Some(n)))
            .transpose()?;
        let mut store = self.get(id).await?;

        if let Some(name) = name {
            store.name = name;
        }
        if let Some(quantity) = patch.quantity_products_in_stock {
            store.quantity_products_in_stock = quantity;
        }
        self.write(&store).await?;

        tracing::info!(store_id = %id, "Store patched");
        self.legacy.store_updated(&store).await;
        Ok(store)
    }

    pub async fn delete(&self, id: StoreId) -> Result<(), ManagementError> {
        if !self.store_repo.delete(id).await? {
            return Err(not_found(id));
        }
        tracing::info!(store_id = %id, "Store deleted");
        Ok(())
    }

    async fn write(&self, store: &Store) -> Result<(), ManagementError> {
        self.store_repo
            .update(store)
            .await
            .map_err(|e| {
                ManagementError::from_update(e, || not_found(store.id), || duplicate(&store.name))
            })
    }
}

fn required_name(name: Option<&str>) -> Result<StoreName, ManagementError> {
    let name = name.ok_or_else(|| {
        ManagementError::InvalidInput("Store Name was not set on request.".into())
    })?;
    StoreName::new(name).map_err(|e| ManagementError::InvalidInput(e.to_string()))
}

fn not_found(id: StoreId) -> ManagementError {
    ManagementError::NotFound(format!("Store with id of {id} does not exist."))
}

fn duplicate(name: &StoreName) -> String {
    format!("Store name already exists: {name}")
}
