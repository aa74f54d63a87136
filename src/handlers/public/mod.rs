// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Security Level: None
// Route Prefix: /v1/auth/*, /health

pub mod auth;
pub mod health;

pub use auth::*;
pub use health::health;
