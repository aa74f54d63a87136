// handlers/public/auth/register.rs - POST /v1/auth/register handler

use axum::{extract::State, http::StatusCode};
use serde::Deserialize;

use crate::api::{Validate, ValidJson, Validator};
use crate::error::{ApiError, FieldError};
use crate::services::Registration;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub is_admin: Option<bool>,
}

impl Validate for RegisterRequest {
    type Valid = Registration;

    fn validate(self) -> Result<Registration, Vec<FieldError>> {
        let mut v = Validator::new();
        v.not_blank("name", &self.name, "Name cannot be blank");
        v.not_blank("email", &self.email, "Email cannot be blank");
        v.email("email", &self.email);
        v.not_blank("password", &self.password, "Password cannot be blank");

        v.finish(|| Registration {
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
            is_admin: self.is_admin.unwrap_or(false),
        })
    }
}

/**
 * POST /v1/auth/register - Create a customer account
 *
 * Expected Input:
 * ```json
 * {
 *   "name": "string",      // Required, not blank
 *   "email": "string",     // Required, valid address, unique
 *   "password": "string",  // Required, not blank
 *   "isAdmin": false       // Optional, grants product write access
 * }
 * ```
 *
 * Responds 201 with an empty body. A duplicate email is a 409.
 */
pub async fn register_post(
    State(state): State<AppState>,
    ValidJson(registration): ValidJson<RegisterRequest>,
) -> Result<StatusCode, ApiError> {
    state.auth.register(registration).await?;
    Ok(StatusCode::CREATED)
}
