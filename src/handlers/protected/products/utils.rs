// handlers/protected/products/utils.rs - Shared helpers for product handlers

use uuid::Uuid;

use crate::error::ApiError;

/// Parse the `{id}` path segment, reporting malformed values as a field error.
pub fn parse_product_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::invalid_field("id", format!("Invalid product id: {}", raw)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(parse_product_id(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn rejects_garbage_as_validation_failure() {
        let err = parse_product_id("not-a-uuid").unwrap_err();
        assert_eq!(err.status_code(), axum::http::StatusCode::BAD_REQUEST);
        assert_eq!(err.field_errors()[0].field, "id");
    }
}
