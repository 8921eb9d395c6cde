//! Store endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use fulfilment_domain::{Store, StoreId};
use serde::{Deserialize, Serialize};

use crate::app::App;
use crate::use_cases::management::{StoreInput, StorePatch};

use super::http::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDto {
    pub id: i64,
    pub name: String,
    pub quantity_products_in_stock: u32,
}

impl From<Store> for StoreDto {
    fn from(s: Store) -> Self {
        Self {
            id: s.id.as_i64(),
            name: s.name.into(),
            quantity_products_in_stock: s.quantity_products_in_stock,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub quantity_products_in_stock: Option<u32>,
}

impl From<StoreRequest> for StoreInput {
    fn from(r: StoreRequest) -> Self {
        Self {
            name: r.name,
            quantity_products_in_stock: r.quantity_products_in_stock.unwrap_or(0),
        }
    }
}

impl From<StoreRequest> for StorePatch {
    fn from(r: StoreRequest) -> Self {
        Self {
            name: r.name,
            quantity_products_in_stock: r.quantity_products_in_stock,
        }
    }
}

pub(super) async fn list_stores(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<StoreDto>>, ApiError> {
    let stores = app.use_cases.management.store.list().await?;
    Ok(Json(stores.into_iter().map(StoreDto::from).collect()))
}

pub(super) async fn get_store(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
) -> Result<Json<StoreDto>, ApiError> {
    let store = app.use_cases.management.store.get(StoreId::new(id)).await?;
    Ok(Json(store.into()))
}

pub(super) async fn create_store(
    State(app): State<Arc<App>>,
    request: Result<Json<StoreRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<StoreDto>), ApiError> {
    let Json(request) = request?;
    if request.id.is_some() {
        return Err(ApiError::Unprocessable(
            "Id was invalidly set on request.".to_string(),
        ));
    }
    let store = app
        .use_cases
        .management
        .store
        .create(request.into())
        .await?;
    Ok((StatusCode::CREATED, Json(store.into())))
}

pub(super) async fn update_store(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
    request: Result<Json<StoreRequest>, JsonRejection>,
) -> Result<Json<StoreDto>, ApiError> {
    let Json(request) = request?;
    let store = app
        .use_cases
        .management
        .store
        .update(StoreId::new(id), request.into())
        .await?;
    Ok(Json(store.into()))
}

pub(super) async fn patch_store(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
    request: Result<Json<StoreRequest>, JsonRejection>,
) -> Result<Json<StoreDto>, ApiError> {
    let Json(request) = request?;
    let store = app
        .use_cases
        .management
        .store
        .patch(StoreId::new(id), request.into())
        .await?;
    Ok(Json(store.into()))
}

pub(super) async fn delete_store(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .management
        .store
        .delete(StoreId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
