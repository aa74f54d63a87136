pub mod customer;
pub mod product;

pub use customer::{Customer, CustomerSummary};
pub use product::{
    Product, ProductCategory, ProductChanges, ProductCreated, ProductDetail, ProductRow,
    ProductSummary, UnknownCategory,
};
