pub mod extract;
pub mod validation;

pub use extract::ValidJson;
pub use validation::{Validate, Validator};
