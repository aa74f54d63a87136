// handlers/protected/products/create.rs - POST /v1/products handler

use axum::{
    extract::State,
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Json},
};
use serde::Deserialize;

use crate::api::{Validate, ValidJson, Validator};
use crate::auth::Principal;
use crate::database::models::ProductCategory;
use crate::error::{ApiError, FieldError};
use crate::services::NewProduct;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    pub amount_available: Option<i64>,
}

impl Validate for CreateProductRequest {
    type Valid = NewProduct;

    fn validate(self) -> Result<NewProduct, Vec<FieldError>> {
        let mut v = Validator::new();
        v.not_blank("name", &self.name, "Product name must not be blank");

        let category = match &self.category {
            None => {
                v.reject("category", "Category must not be null");
                None
            }
            Some(_) => v.category("category", &self.category),
        };

        if self.price.is_none() {
            v.reject("price", "Price must be a positive value");
        }
        v.positive("price", self.price, "Price must be a positive value");

        if self.amount_available.is_none() {
            v.reject("amountAvailable", "Amount available must be a positive value");
        }
        let amount_available =
            v.positive_count("amountAvailable", self.amount_available, "Amount available must be a positive value");

        v.finish(|| NewProduct {
            name: self.name.unwrap_or_default(),
            description: self.description,
            category: category.unwrap_or(ProductCategory::Other),
            price: self.price.unwrap_or_default(),
            amount_available: amount_available.unwrap_or_default(),
        })
    }
}

/**
 * POST /v1/products - Register a product (requires ROLE_WRITE)
 *
 * Expected Input:
 * ```json
 * {
 *   "name": "Phone",
 *   "description": "optional",
 *   "category": "TECHNOLOGY",
 *   "price": 10.0,
 *   "amountAvailable": 5
 * }
 * ```
 *
 * Responds 201 with the created product and a `Location` header.
 */
pub async fn product_create(
    State(state): State<AppState>,
    principal: Principal,
    ValidJson(new_product): ValidJson<CreateProductRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let created = state.products.register_product(&principal, new_product).await?;
    let location = created.location();
    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(created)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> Result<NewProduct, Vec<FieldError>> {
        serde_json::from_str::<CreateProductRequest>(json).unwrap().validate()
    }

    #[test]
    fn accepts_complete_product() {
        let product = parse(r#"{"name":"Phone","category":"TECHNOLOGY","price":10.0,"amountAvailable":5}"#).unwrap();
        assert_eq!(product.name, "Phone");
        assert_eq!(product.category, ProductCategory::Technology);
        assert_eq!(product.amount_available, 5);
        assert!(product.description.is_none());
    }

    #[test]
    fn rejects_non_positive_numbers_and_blank_name() {
        let errors = parse(r#"{"name":" ","category":"TECHNOLOGY","price":0,"amountAvailable":-1}"#).unwrap_err();
        assert_eq!(
            errors,
            vec![
                FieldError::new("name", "Product name must not be blank"),
                FieldError::new("price", "Price must be a positive value"),
                FieldError::new("amountAvailable", "Amount available must be a positive value"),
            ]
        );
    }

    #[test]
    fn rejects_missing_and_unknown_category() {
        let errors = parse(r#"{"name":"Phone","price":1,"amountAvailable":1}"#).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("category", "Category must not be null")]);

        let errors = parse(r#"{"name":"Phone","category":"GADGETS","price":1,"amountAvailable":1}"#).unwrap_err();
        assert_eq!(errors, vec![FieldError::new("category", "Unknown product category: GADGETS")]);
    }
}
