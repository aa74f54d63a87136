use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use crate::auth::{Permission, Principal};
use crate::config::CatalogConfig;
use crate::database::models::{Product, ProductCategory, ProductChanges, ProductCreated, ProductDetail, ProductSummary};
use crate::database::{DatabaseError, ProductRepository};
use crate::filter::{FilterError, PageRequest, ProductFilter};

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Product not found")]
    NotFound,

    #[error("Access denied")]
    Forbidden,

    #[error(transparent)]
    InvalidQuery(#[from] FilterError),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

/// Validated input for a new product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: Option<String>,
    pub category: ProductCategory,
    pub price: f64,
    pub amount_available: i32,
}

/// Raw listing parameters as they arrive on the query string.
#[derive(Debug, Clone, Default)]
pub struct ProductQuery {
    pub name: Option<String>,
    pub category: Option<String>,
    pub page: Option<i64>,
    pub size: Option<i64>,
}

#[derive(Clone)]
pub struct ProductService {
    products: Arc<dyn ProductRepository>,
    catalog: CatalogConfig,
}

impl ProductService {
    pub fn new(products: Arc<dyn ProductRepository>, catalog: CatalogConfig) -> Self {
        Self { products, catalog }
    }

    pub async fn register_product(&self, actor: &Principal, new: NewProduct) -> Result<ProductCreated, ProductError> {
        require_write(actor)?;

        let product = Product::new(new.name, new.description, new.category, new.price, new.amount_available);
        self.products.insert(&product).await?;

        tracing::info!("Product {} registered by {}", product.id, actor.display_name());
        Ok(ProductCreated::from(&product))
    }

    /// One page of products matching every supplied filter, ordered by name.
    pub async fn list_products(&self, query: ProductQuery) -> Result<Vec<ProductSummary>, ProductError> {
        let filter = ProductFilter::from_query(query.name.as_deref(), query.category.as_deref())?;
        let page = PageRequest::resolve(query.page, query.size, &self.catalog)?;

        let products = self.products.find_all(&filter, page).await?;
        tracing::debug!(
            "Listed {} products (page {}, size {}, {} filters)",
            products.len(),
            page.page,
            page.size,
            filter.clauses().len()
        );
        Ok(products.into_iter().map(ProductSummary::from).collect())
    }

    pub async fn get_product(&self, id: Uuid) -> Result<ProductDetail, ProductError> {
        let product = self.products.find_by_id(id).await?.ok_or(ProductError::NotFound)?;
        Ok(ProductDetail::from(product))
    }

    pub async fn update_product(&self, actor: &Principal, id: Uuid, changes: ProductChanges) -> Result<(), ProductError> {
        require_write(actor)?;

        let mut product = self.products.find_by_id(id).await?.ok_or(ProductError::NotFound)?;
        product.apply(changes);
        // Deleted between the read and the write
        if !self.products.update(&product).await? {
            return Err(ProductError::NotFound);
        }

        tracing::info!("Product {} updated by {}", id, actor.display_name());
        Ok(())
    }

    pub async fn delete_product(&self, actor: &Principal, id: Uuid) -> Result<(), ProductError> {
        require_write(actor)?;

        if !self.products.delete(id).await? {
            return Err(ProductError::NotFound);
        }

        tracing::info!("Product {} deleted by {}", id, actor.display_name());
        Ok(())
    }
}

fn require_write(actor: &Principal) -> Result<(), ProductError> {
    if actor.has_permission(Permission::Write) {
        Ok(())
    } else {
        tracing::warn!("{} attempted a product write without permission", actor.display_name());
        Err(ProductError::Forbidden)
    }
}
