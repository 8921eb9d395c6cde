//! SQLite schema initialization - tables and indexes.

use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

const STATEMENTS: [&str; 4] = [
    r#"
    CREATE TABLE IF NOT EXISTS warehouse (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        business_unit_code TEXT NOT NULL UNIQUE,
        location TEXT NOT NULL,
        capacity INTEGER CHECK (capacity IS NULL OR capacity >= 0),
        stock INTEGER CHECK (stock IS NULL OR stock >= 0),
        created_at TEXT,
        archived_at TEXT
    )
    "#,
    r#"
    CREATE INDEX IF NOT EXISTS warehouse_location_active
        ON warehouse (location, archived_at)
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS product (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        description TEXT,
        price TEXT,
        stock INTEGER NOT NULL DEFAULT 0
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS store (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        name TEXT NOT NULL UNIQUE,
        quantity_products_in_stock INTEGER NOT NULL DEFAULT 0
    )
    "#,
];

/// Create tables and indexes.
///
/// Idempotent; called once on startup.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), RepoError> {
    for statement in STATEMENTS {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| RepoError::database("ensure_schema", e))?;
    }

    tracing::info!("SQLite schema initialized (tables and indexes ensured)");
    Ok(())
}
