use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use super::validation::Validate;
use crate::error::ApiError;

/// JSON body that has been parsed and validated.
///
/// Parse failures become a 400 with the rejection text; validation
/// failures become a 400 `Validation failed` carrying every field error.
pub struct ValidJson<T: Validate>(pub T::Valid);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate + Send,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(body) = Json::<T>::from_request(req, state).await?;
        body.validate().map(ValidJson).map_err(ApiError::validation_failed)
    }
}
