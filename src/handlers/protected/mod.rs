// handlers/protected/mod.rs - Protected handlers (authentication required)
//
// Security Level: Bearer token, plus ROLE_WRITE for product mutations
// Route Prefix: /v1/products

pub mod products;

pub use products::*;
