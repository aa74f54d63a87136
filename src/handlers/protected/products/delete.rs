// handlers/protected/products/delete.rs - DELETE /v1/products/:id handler

use axum::{
    extract::{Path, State},
    http::StatusCode,
};

use super::utils::parse_product_id;
use crate::auth::Principal;
use crate::error::ApiError;
use crate::state::AppState;

/// Remove a product (requires ROLE_WRITE). 204 on success, 404 when absent.
pub async fn product_delete(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_product_id(&id)?;
    state.products.delete_product(&principal, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
