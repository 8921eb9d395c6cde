//! SQLite database implementations.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::infrastructure::ports::RepoError;

mod product_repo;
mod schema;
mod seed;
mod store_repo;
mod warehouse_repo;

pub use product_repo::SqliteProductRepo;
pub use schema::ensure_schema;
pub use seed::seed_demo_data;
pub use store_repo::SqliteStoreRepo;
pub use warehouse_repo::SqliteWarehouseRepo;

/// Open a connection pool.
///
/// `sqlite::memory:` databases are private to a connection, so callers using one
/// must pass `max_connections = 1` to see a single database.
pub async fn connect(url: &str, max_connections: u32) -> Result<SqlitePool, RepoError> {
    let options = SqliteConnectOptions::from_str(url)
        .map_err(|e| RepoError::database("connect", e))?
        .create_if_missing(true)
        .busy_timeout(Duration::from_secs(5));

    SqlitePoolOptions::new()
        .max_connections(max_connections.max(1))
        .connect_with(options)
        .await
        .map_err(|e| RepoError::database("connect", e))
}

/// Create all SQLite repositories from a pool.
pub struct SqliteRepositories {
    pub warehouse: Arc<SqliteWarehouseRepo>,
    pub product: Arc<SqliteProductRepo>,
    pub store: Arc<SqliteStoreRepo>,
}

impl SqliteRepositories {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            warehouse: Arc::new(SqliteWarehouseRepo::new(pool.clone())),
            product: Arc::new(SqliteProductRepo::new(pool.clone())),
            store: Arc::new(SqliteStoreRepo::new(pool)),
        }
    }
}

/// Map a sqlx error, surfacing unique-key collisions as constraint violations.
pub(crate) fn map_sqlx_error(operation: &'static str, e: sqlx::Error) -> RepoError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            RepoError::constraint(format!("{operation}: {}", db.message()))
        }
        _ => RepoError::database(operation, e),
    }
}

/// Read a non-negative integer column into `u32`, treating NULL as 0.
pub(crate) fn column_u32(value: Option<i64>, column: &'static str) -> Result<u32, RepoError> {
    u32::try_from(value.unwrap_or(0))
        .map_err(|_| RepoError::serialization(format!("{column} out of range")))
}

#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let pool = connect("sqlite::memory:", 1).await.expect("in-memory pool");
    ensure_schema(&pool).await.expect("schema");
    pool
}
