// handlers/protected/products/show.rs - GET /v1/products/:id handler

use axum::{
    extract::{Path, State},
    response::Json,
};

use super::utils::parse_product_id;
use crate::database::models::ProductDetail;
use crate::error::ApiError;
use crate::state::AppState;

pub async fn product_show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductDetail>, ApiError> {
    let id = parse_product_id(&id)?;
    let product = state.products.get_product(id).await?;
    Ok(Json(product))
}
