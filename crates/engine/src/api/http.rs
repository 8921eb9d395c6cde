//! HTTP routes.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::sync::Arc;

use crate::app::App;
use crate::infrastructure::ports::RepoError;
use crate::use_cases::management::ManagementError;
use crate::use_cases::warehouse::{ValidationFailure, ValidationKind, WarehouseError};

use super::{products, stores, warehouses};

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route(
            "/warehouse",
            get(warehouses::list_warehouses).post(warehouses::create_warehouse),
        )
        .route(
            "/warehouse/{id}",
            get(warehouses::get_warehouse).delete(warehouses::archive_warehouse),
        )
        .route(
            "/warehouse/{id}/replacement",
            post(warehouses::replace_warehouse),
        )
        .route(
            "/product",
            get(products::list_products).post(products::create_product),
        )
        .route(
            "/product/{id}",
            get(products::get_product)
                .put(products::update_product)
                .delete(products::delete_product),
        )
        .route("/stores", get(stores::list_stores).post(stores::create_store))
        .route(
            "/stores/{id}",
            get(stores::get_store)
                .put(stores::update_store)
                .patch(stores::patch_store)
                .delete(stores::delete_store),
        )
}

async fn health() -> &'static str {
    "OK"
}

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Unprocessable(String),
    Conflict(String),
    /// A warehouse business rule rejected the request.
    Rejected(ValidationFailure),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, None, msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, None, msg),
            ApiError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, None, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, None, msg),
            ApiError::Rejected(failure) => {
                let status = match failure.kind {
                    ValidationKind::NotFound => StatusCode::NOT_FOUND,
                    _ => StatusCode::BAD_REQUEST,
                };
                (status, Some(failure.kind), failure.message)
            }
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Failed to handle request");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    None,
                    "Internal error".to_string(),
                )
            }
        };

        let mut body = serde_json::json!({
            "code": status.as_u16(),
            "error": message,
        });
        if let Some(kind) = kind {
            body["kind"] = serde_json::Value::from(kind.as_str());
        }

        (status, Json(body)).into_response()
    }
}

/// Malformed or mistyped JSON bodies get the same error shape as every other failure.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Unprocessable(rejection.body_text())
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        ApiError::Internal(e.to_string())
    }
}

impl From<WarehouseError> for ApiError {
    fn from(e: WarehouseError) -> Self {
        match e {
            WarehouseError::Validation(failure) => ApiError::Rejected(failure),
            WarehouseError::Repo(e) => e.into(),
        }
    }
}

impl From<ManagementError> for ApiError {
    fn from(e: ManagementError) -> Self {
        match e {
            ManagementError::NotFound(msg) => ApiError::NotFound(msg),
            ManagementError::InvalidInput(msg) => ApiError::Unprocessable(msg),
            ManagementError::Conflict(msg) => ApiError::Conflict(msg),
            ManagementError::Repo(e) => e.into(),
        }
    }
}
