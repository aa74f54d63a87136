use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::database::manager::DatabaseError;

/// Closed set of catalogue categories, stored and serialized in upper case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProductCategory {
    Technology,
    Fashion,
    Home,
    Books,
    Sports,
    Food,
    Toys,
    Beauty,
    Other,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 9] = [
        ProductCategory::Technology,
        ProductCategory::Fashion,
        ProductCategory::Home,
        ProductCategory::Books,
        ProductCategory::Sports,
        ProductCategory::Food,
        ProductCategory::Toys,
        ProductCategory::Beauty,
        ProductCategory::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCategory::Technology => "TECHNOLOGY",
            ProductCategory::Fashion => "FASHION",
            ProductCategory::Home => "HOME",
            ProductCategory::Books => "BOOKS",
            ProductCategory::Sports => "SPORTS",
            ProductCategory::Food => "FOOD",
            ProductCategory::Toys => "TOYS",
            ProductCategory::Beauty => "BEAUTY",
            ProductCategory::Other => "OTHER",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown product category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for ProductCategory {
    type Err = UnknownCategory;

    // Exact match, like the enum names clients already send.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: ProductCategory,
    pub price: f64,
    pub amount_available: i32,
    pub amount_sold: i32,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn new(
        name: String,
        description: Option<String>,
        category: ProductCategory,
        price: f64,
        amount_available: i32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            description,
            category,
            price,
            amount_available,
            amount_sold: 0,
            updated_at: Utc::now(),
        }
    }

    /// Apply a partial update; absent fields keep their current value.
    pub fn apply(&mut self, changes: ProductChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(amount_available) = changes.amount_available {
            self.amount_available = amount_available;
        }
        self.updated_at = Utc::now();
    }
}

/// Already-validated partial update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<ProductCategory>,
    pub price: Option<f64>,
    pub amount_available: Option<i32>,
}

/// Raw `tb_product` row; the category column is plain text.
#[derive(Debug, FromRow)]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: String,
    pub price: f64,
    pub amount_available: i32,
    pub amount_sold: i32,
    pub dh_updated: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = DatabaseError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let category = row
            .category
            .parse()
            .map_err(|e: UnknownCategory| DatabaseError::CorruptRow(format!("product {}: {}", row.id, e)))?;
        Ok(Self {
            id: row.id,
            name: row.name,
            description: row.description,
            category,
            price: row.price,
            amount_available: row.amount_available,
            amount_sold: row.amount_sold,
            updated_at: row.dh_updated,
        })
    }
}

/// Body returned after a product is created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreated {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: ProductCategory,
    pub price: f64,
    pub amount_available: i32,
}

/// One entry of the product listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub category: ProductCategory,
    pub price: f64,
    pub amount_available: i32,
}

/// Single product view, including sales.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetail {
    pub name: String,
    pub description: Option<String>,
    pub category: ProductCategory,
    pub price: f64,
    pub amount_available: i32,
    pub amount_sold: i32,
}

impl From<&Product> for ProductCreated {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            name: p.name.clone(),
            description: p.description.clone(),
            category: p.category,
            price: p.price,
            amount_available: p.amount_available,
        }
    }
}

impl ProductCreated {
    /// Path of the new product, sent back as the `Location` header.
    pub fn location(&self) -> String {
        format!("/v1/products/{}", self.id)
    }
}

impl From<Product> for ProductSummary {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            description: p.description,
            category: p.category,
            price: p.price,
            amount_available: p.amount_available,
        }
    }
}

impl From<Product> for ProductDetail {
    fn from(p: Product) -> Self {
        Self {
            name: p.name,
            description: p.description,
            category: p.category,
            price: p.price,
            amount_available: p.amount_available,
            amount_sold: p.amount_sold,
        }
    }
}
