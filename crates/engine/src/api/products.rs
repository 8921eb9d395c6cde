//! Product endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use fulfilment_domain::{Decimal, Product, ProductId};
use serde::{Deserialize, Serialize};

use crate::app::App;
use crate::use_cases::management::ProductInput;

use super::http::ApiError;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: u32,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        Self {
            id: p.id.as_i64(),
            name: p.name.into(),
            description: p.description,
            price: p.price,
            stock: p.stock,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub stock: Option<u32>,
}

impl From<ProductRequest> for ProductInput {
    fn from(r: ProductRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
            price: r.price,
            stock: r.stock.unwrap_or(0),
        }
    }
}

pub(super) async fn list_products(
    State(app): State<Arc<App>>,
) -> Result<Json<Vec<ProductDto>>, ApiError> {
    let products = app.use_cases.management.product.list().await?;
    Ok(Json(products.into_iter().map(ProductDto::from).collect()))
}

pub(super) async fn get_product(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
) -> Result<Json<ProductDto>, ApiError> {
    let product = app
        .use_cases
        .management
        .product
        .get(ProductId::new(id))
        .await?;
    Ok(Json(product.into()))
}

pub(super) async fn create_product(
    State(app): State<Arc<App>>,
    request: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ProductDto>), ApiError> {
    let Json(request) = request?;
    if request.id.is_some() {
        return Err(ApiError::Unprocessable(
            "Id was invalidly set on request.".to_string(),
        ));
    }
    let product = app
        .use_cases
        .management
        .product
        .create(request.into())
        .await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

pub(super) async fn update_product(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
    request: Result<Json<ProductRequest>, JsonRejection>,
) -> Result<Json<ProductDto>, ApiError> {
    let Json(request) = request?;
    let product = app
        .use_cases
        .management
        .product
        .update(ProductId::new(id), request.into())
        .await?;
    Ok(Json(product.into()))
}

pub(super) async fn delete_product(
    State(app): State<Arc<App>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    app.use_cases
        .management
        .product
        .delete(ProductId::new(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
