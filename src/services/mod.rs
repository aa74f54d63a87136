pub mod authentication_service;
pub mod product_service;

pub use authentication_service::{AuthenticationService, Registration};
pub use product_service::{NewProduct, ProductError, ProductQuery, ProductService};
