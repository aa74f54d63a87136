pub mod auth;
pub mod policy;

pub use auth::{extract_bearer_token, resolve_principal};
pub use policy::enforce_policy;
