//! Reference data for local development.
//!
//! Only fills empty tables, so restarting against an existing database is a no-op.
//! Reference warehouses are skipped while any warehouse is active.

use chrono::{TimeZone, Utc};
use fulfilment_domain::{
    BusinessUnitCode, Decimal, LocationIdentifier, NewProduct, NewStore, ProductName, StoreName,
    Warehouse,
};

use super::SqliteRepositories;
use crate::infrastructure::ports::{ProductRepo, RepoError, StoreRepo, WarehouseRepo};

/// (code, location, capacity, stock, created y/m/d)
const WAREHOUSES: [(&str, &str, u32, u32, (i32, u32, u32)); 3] = [
    ("MWH.001", "ZWOLLE-001", 40, 10, (2024, 7, 1)),
    ("MWH.012", "AMSTERDAM-001", 50, 5, (2023, 3, 12)),
    ("MWH.023", "TILBURG-001", 30, 27, (2021, 2, 1)),
];

const CATALOGUE: [(&str, u32); 3] = [("TONSTAD", 10), ("KALLAX", 5), ("BESTÅ", 3)];

pub async fn seed_demo_data(repos: &SqliteRepositories) -> Result<(), RepoError> {
    if repos.product.list().await?.is_empty() {
        for (name, stock) in CATALOGUE {
            let name = ProductName::new(name).map_err(RepoError::serialization)?;
            repos
                .product
                .create(NewProduct::new(name).with_stock(stock).with_price(Decimal::ZERO))
                .await?;
        }
    }

    if repos.store.list().await?.is_empty() {
        for (name, quantity) in CATALOGUE {
            let name = StoreName::new(name).map_err(RepoError::serialization)?;
            repos.store.create(NewStore::new(name, quantity)).await?;
        }
    }

    // Reference rows respect the location caps only among themselves, so they
    // go in only while no warehouse is active.
    if repos.warehouse.list_active().await?.is_empty() {
        seed_warehouses(repos).await?;
    } else {
        tracing::info!("Active warehouses present, reference warehouses skipped");
    }

    tracing::info!("Demo data seeded");
    Ok(())
}

async fn seed_warehouses(repos: &SqliteRepositories) -> Result<(), RepoError> {
    for (code, location, capacity, stock, (y, m, d)) in WAREHOUSES {
        let code = BusinessUnitCode::new(code).map_err(RepoError::serialization)?;
        // Archived codes stay taken
        if repos.warehouse.find_by_code(&code).await?.is_some() {
            continue;
        }
        let location = LocationIdentifier::new(location).map_err(RepoError::serialization)?;
        let mut warehouse = Warehouse::new(code, location, capacity, stock);
        warehouse.creation_at = Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single();
        repos.warehouse.create(&warehouse).await?;
    }
    Ok(())
}
