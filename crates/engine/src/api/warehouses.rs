//! Warehouse endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use fulfilment_domain::{BusinessUnitCode, LocationIdentifier, Warehouse};
use serde::{Deserialize, Serialize};

use crate::app::App;
use crate::use_cases::warehouse::{ValidationFailure, ValidationKind};

use super::http::ApiError;

/// Wire shape of a warehouse; `id` is the business unit code.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseDto {
    pub id: String,
    pub location: String,
    pub capacity: u32,
    pub stock: u32,
    pub created_at: Option<DateTime<Utc>>,
    pub archived_at: Option<DateTime<Utc>>,
}

impl From<Warehouse> for WarehouseDto {
    fn from(w: Warehouse) -> Self {
        Self {
            id: w.business_unit_code.into(),
            location: w.location.into(),
            capacity: w.capacity,
            stock: w.stock,
            created_at: w.creation_at,
            archived_at: w.archived_at,
        }
    }
}

/// Incoming warehouse. Absent capacity or stock means 0.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseRequest {
    pub id: Option<String>,
    pub location: Option<String>,
    pub capacity: Option<u32>,
    pub stock: Option<u32>,
}

impl WarehouseRequest {
    fn into_warehouse(self, code: BusinessUnitCode) -> Result<Warehouse, ApiError> {
        // Blank or oversized identifiers can never be in the directory
        let raw_location = self.location.unwrap_or_default();
        let location = LocationIdentifier::new(raw_location.as_str())
            .map_err(|_| ApiError::Rejected(ValidationFailure::unknown_location(&raw_location)))?;

        Ok(Warehouse::new(
            code,
            location,
            self.capacity.unwrap_or(0),
            self.stock.unwrap_or(0),
        ))
    }
}

fn path_code(id: &str) -> Result<BusinessUnitCode, ApiError> {
    BusinessUnitCode::new(id).map_err(|_| {
        ApiError::Rejected(ValidationFailure::new(
            ValidationKind::NotFound,
            format!("Warehouse not found: {id}"),
        ))
    })
}

pub(super) async fn list_warehouses(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<WarehouseDto>>, ApiError> {
    let warehouses = app.use_cases.warehouse.queries.list_active().await?;
    Ok(Json(warehouses.into_iter().map(WarehouseDto::from).collect()))
}

pub(super) async fn get_warehouse(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<Json<WarehouseDto>, ApiError> {
    let code = path_code(&id)?;
    let warehouse = app
        .use_cases
        .warehouse
        .queries
        .get_active(&code)
        .await?
        .ok_or_else(|| ApiError::NotFound("Warehouse unit not found".to_string()))?;
    Ok(Json(warehouse.into()))
}

pub(super) async fn create_warehouse(
    State(app): State<Arc<App>>,
    request: Result<Json<WarehouseRequest>, JsonRejection>,
) -> Result<Json<WarehouseDto>, ApiError> {
    let Json(request) = request?;
    let code = request
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| {
            ApiError::Unprocessable("Warehouse id (business unit code) is required".to_string())
        })
        .and_then(|id| {
            BusinessUnitCode::new(id).map_err(|e| ApiError::Unprocessable(e.to_string()))
        })?;

    let proposal = request.into_warehouse(code)?;
    let created = app.use_cases.warehouse.create.execute(proposal).await?;
    Ok(Json(created.into()))
}

/// The path id names the warehouse; any id in the body is ignored.
pub(super) async fn replace_warehouse(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
    request: Result<Json<WarehouseRequest>, JsonRejection>,
) -> Result<Json<WarehouseDto>, ApiError> {
    let Json(request) = request?;
    let code = path_code(&id)?;
    let replacement = request.into_warehouse(code)?;
    let replaced = app.use_cases.warehouse.replace.execute(replacement).await?;
    Ok(Json(replaced.into()))
}

pub(super) async fn archive_warehouse(
    State(app): State<Arc<App>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let code = path_code(&id)?;
    app.use_cases.warehouse.archive.execute(&code).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::api::http::test_support::{send, send_raw, test_router};

    #[tokio::test]
    async fn create_then_get_and_list() {
        let router = test_router().await;

        let (status, body) = send(
            &router,
            Method::POST,
            "/warehouse",
            Some(json!({"id": "MWH.100", "location": "AMSTERDAM-002", "capacity": 30, "stock": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "MWH.100");
        assert!(body["createdAt"].is_string());
        assert!(body["archivedAt"].is_null());

        let (status, body) = send(&router, Method::GET, "/warehouse/MWH.100", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["capacity"], 30);

        let (status, body) = send(&router, Method::GET, "/warehouse", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn create_without_id_is_unprocessable() {
        let router = test_router().await;
        let (status, body) = send(
            &router,
            Method::POST,
            "/warehouse",
            Some(json!({"id": "  ", "location": "AMSTERDAM-002", "capacity": 30, "stock": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], 422);
    }

    #[tokio::test]
    async fn undecodable_body_is_unprocessable_json() {
        let router = test_router().await;

        let (status, body) = send(
            &router,
            Method::POST,
            "/warehouse",
            Some(json!({"id": "MWH.100", "location": "AMSTERDAM-002", "capacity": -1, "stock": 5})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], 422);
        assert!(body["error"].is_string());

        let (status, body) = send_raw(
            &router,
            Method::POST,
            "/warehouse/MWH.100/replacement",
            Some("{\"location\": ".to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["code"], 422);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn rule_violation_is_bad_request_with_kind() {
        let router = test_router().await;
        let (status, body) = send(
            &router,
            Method::POST,
            "/warehouse",
            Some(json!({"id": "MWH.100", "location": "TILBURG-001", "capacity": 10, "stock": 20})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "InvalidStock");
        assert_eq!(body["error"], "Warehouse capacity must be at least the stock amount");

        let (status, body) = send(
            &router,
            Method::POST,
            "/warehouse",
            Some(json!({"id": "MWH.101", "location": "", "capacity": 10})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "UnknownLocation");
    }

    #[tokio::test]
    async fn archive_hides_warehouse_and_rejects_second_archive() {
        let router = test_router().await;
        send(
            &router,
            Method::POST,
            "/warehouse",
            Some(json!({"id": "MWH.100", "location": "VETSBY-001", "capacity": 90, "stock": 0})),
        )
        .await;

        let (status, _) = send(&router, Method::DELETE, "/warehouse/MWH.100", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);

        let (status, _) = send(&router, Method::GET, "/warehouse/MWH.100", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&router, Method::DELETE, "/warehouse/MWH.100", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "AlreadyArchived");
    }

    #[tokio::test]
    async fn archive_of_unknown_warehouse_is_not_found() {
        let router = test_router().await;
        let (status, body) = send(&router, Method::DELETE, "/warehouse/MWH.404", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["kind"], "NotFound");
    }

    #[tokio::test]
    async fn replacement_uses_path_id() {
        let router = test_router().await;
        send(
            &router,
            Method::POST,
            "/warehouse",
            Some(json!({"id": "MWH.100", "location": "AMSTERDAM-001", "capacity": 50, "stock": 10})),
        )
        .await;

        let (status, body) = send(
            &router,
            Method::POST,
            "/warehouse/MWH.100/replacement",
            Some(json!({"id": "IGNORED", "location": "AMSTERDAM-001", "capacity": 80, "stock": 10})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], "MWH.100");
        assert_eq!(body["capacity"], 80);

        let (status, body) = send(
            &router,
            Method::POST,
            "/warehouse/MWH.100/replacement",
            Some(json!({"location": "AMSTERDAM-001", "capacity": 80, "stock": 9})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "StockMismatch");
    }
}
