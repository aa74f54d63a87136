// handlers/public/auth/login.rs - POST /v1/auth/login handler

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

use crate::api::{Validate, ValidJson, Validator};
use crate::error::{ApiError, FieldError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

impl Validate for LoginRequest {
    type Valid = Credentials;

    fn validate(self) -> Result<Credentials, Vec<FieldError>> {
        let mut v = Validator::new();
        v.not_blank("email", &self.email, "Email cannot be blank");
        v.email("email", &self.email);
        v.not_blank("password", &self.password, "Password cannot be blank");

        v.finish(|| Credentials {
            email: self.email.unwrap_or_default(),
            password: self.password.unwrap_or_default(),
        })
    }
}

/**
 * POST /v1/auth/login - Exchange credentials for a bearer token
 *
 * Expected Input:
 * ```json
 * { "email": "string", "password": "string" }
 * ```
 *
 * Expected Output:
 * ```json
 * { "token": "eyJhbGciOiJIUzI1NiI..." }
 * ```
 *
 * Unknown email and wrong password produce the same 400 response.
 */
pub async fn login_post(
    State(state): State<AppState>,
    ValidJson(credentials): ValidJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let token = state.auth.authenticate(&credentials.email, &credentials.password).await?;
    Ok(Json(LoginResponse { token }))
}
