// handlers/protected/products/list.rs - GET /v1/products handler

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::Json,
};
use serde::Deserialize;

use crate::database::models::ProductSummary;
use crate::error::ApiError;
use crate::services::ProductQuery;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListProductsParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub product_name: Option<String>,
    pub product_category: Option<String>,
}

impl From<ListProductsParams> for ProductQuery {
    fn from(params: ListProductsParams) -> Self {
        ProductQuery {
            name: params.product_name,
            category: params.product_category,
            page: params.page,
            size: params.size,
        }
    }
}

/// GET /v1/products?page=&size=&productName=&productCategory=
///
/// Zero-based paging, ascending by name. `productName` matches any part of
/// the name ignoring case; `productCategory` must be an exact category.
pub async fn product_list(
    State(state): State<AppState>,
    params: Result<Query<ListProductsParams>, QueryRejection>,
) -> Result<Json<Vec<ProductSummary>>, ApiError> {
    let Query(params) = params?;
    let products = state.products.list_products(params.into()).await?;
    Ok(Json(products))
}
