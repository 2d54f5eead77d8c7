// SPDX-License-Identifier: Apache-2.0

use crate::http::HttpError;
use crate::AppState;
use axum::extract::{Path, State};
use axum::Json;
use lavka_api::{ApiError, ApiErrorCode};
use lavka_model::{Product, ProductId};

/// Only products flagged available appear in the listing; a direct
/// fetch by id still returns hidden ones.
pub(crate) async fn list_products_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>, HttpError> {
    let products = state.store.list_available_products().await?;
    Ok(Json(products))
}

pub(crate) async fn get_product_handler(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, HttpError> {
    let product = state
        .store
        .product(ProductId(id))
        .await?
        .ok_or_else(|| ApiError::new(ApiErrorCode::NotFound, "product not found"))?;
    Ok(Json(product))
}
