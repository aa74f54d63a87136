// handlers/protected/products/update.rs - PUT /v1/products/:id handler

use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;

use super::utils::parse_product_id;
use crate::api::{Validate, ValidJson, Validator};
use crate::auth::Principal;
use crate::database::models::ProductChanges;
use crate::error::{ApiError, FieldError};
use crate::state::AppState;

/// Partial update; absent fields are left untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub amount_available: Option<i64>,
}

impl Validate for UpdateProductRequest {
    type Valid = ProductChanges;

    fn validate(self) -> Result<ProductChanges, Vec<FieldError>> {
        let mut v = Validator::new();
        v.not_blank_if_present("name", &self.name, "Product name must not be blank");
        let category = v.category("category", &self.category);
        v.positive("price", self.price, "Price must be positive");
        let amount_available = v.positive_count("amountAvailable", self.amount_available, "Amount available must be positive");

        v.finish(|| ProductChanges {
            name: self.name,
            description: self.description,
            category,
            price: self.price,
            amount_available,
        })
    }
}

/// PUT /v1/products/:id - Apply supplied fields (requires ROLE_WRITE). 204 on success.
pub async fn product_update(
    State(state): State<AppState>,
    principal: Principal,
    Path(id): Path<String>,
    ValidJson(changes): ValidJson<UpdateProductRequest>,
) -> Result<StatusCode, ApiError> {
    let id = parse_product_id(&id)?;
    state.products.update_product(&principal, id, changes).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::ProductCategory;

    #[test]
    fn empty_body_changes_nothing() {
        let changes = UpdateProductRequest::default().validate().unwrap();
        assert_eq!(changes, ProductChanges::default());
    }

    #[test]
    fn supplied_fields_are_validated() {
        let request = UpdateProductRequest {
            name: Some("".into()),
            price: Some(-5.0),
            amount_available: Some(0),
            ..Default::default()
        };
        let errors = request.validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                FieldError::new("name", "Product name must not be blank"),
                FieldError::new("price", "Price must be positive"),
                FieldError::new("amountAvailable", "Amount available must be positive"),
            ]
        );
    }

    #[test]
    fn category_is_parsed() {
        let request = UpdateProductRequest {
            category: Some("FOOD".into()),
            ..Default::default()
        };
        assert_eq!(request.validate().unwrap().category, Some(ProductCategory::Food));
    }
}
