//! Adjust Stock Handler

use std::sync::Arc;

use salvo::{
    oapi::{
        ToSchema,
        extract::{JsonBody, PathParam},
    },
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Adjust Stock Request
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct AdjustStockRequest {
    /// Signed stock delta: positive receives stock, negative writes it off.
    pub delta: i64,
}

/// Stock Level Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct StockResponse {
    /// New stock level after the adjustment
    pub stock: u32,
}

/// Adjust Stock Handler
///
/// Applies a stock delta; the level never goes below zero.
#[endpoint(
    tags("products"),
    summary = "Adjust product stock",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Stock adjusted"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::CONFLICT, description = "Not enough stock"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    json: JsonBody<AdjustStockRequest>,
    depot: &mut Depot,
) -> Result<Json<StockResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let stock = state
        .app
        .products
        .adjust_stock(product.into_inner().into(), json.into_inner().delta)
        .await
        .map_err(into_status_error)?;

    Ok(Json(StockResponse { stock }))
}
