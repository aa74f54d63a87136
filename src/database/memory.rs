use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Customer, Product};
use crate::database::repository::{CustomerRepository, ProductRepository};
use crate::filter::{PageRequest, ProductFilter};

/// In-process customer store keyed by email.
///
/// The email check and the insert happen under one write lock, which gives
/// the same guarantee as the unique index on `tb_customer.email`.
#[derive(Clone, Default)]
pub struct MemoryCustomerRepository {
    customers: Arc<RwLock<HashMap<String, Customer>>>,
}

impl MemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.customers.read().await.len()
    }
}

#[async_trait]
impl CustomerRepository for MemoryCustomerRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DatabaseError> {
        Ok(self.customers.read().await.get(email).cloned())
    }

    async fn save(&self, customer: &Customer) -> Result<(), DatabaseError> {
        let mut customers = self.customers.write().await;
        if customers.contains_key(&customer.email) {
            return Err(DatabaseError::UniqueViolation("tb_customer_email_key".to_string()));
        }
        customers.insert(customer.email.clone(), customer.clone());
        Ok(())
    }

    async fn delete(&self, customer: &Customer) -> Result<(), DatabaseError> {
        self.customers.write().await.remove(&customer.email);
        Ok(())
    }
}

/// In-process product store.
#[derive(Clone, Default)]
pub struct MemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Product>>>,
}

impl MemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for MemoryProductRepository {
    async fn insert(&self, product: &Product) -> Result<(), DatabaseError> {
        let mut products = self.products.write().await;
        if products.contains_key(&product.id) {
            return Err(DatabaseError::UniqueViolation("tb_product_pkey".to_string()));
        }
        products.insert(product.id, product.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DatabaseError> {
        Ok(self.products.read().await.get(&id).cloned())
    }

    async fn find_all(&self, filter: &ProductFilter, page: PageRequest) -> Result<Vec<Product>, DatabaseError> {
        let products = self.products.read().await;
        let mut matching: Vec<&Product> = products.values().filter(|p| filter.matches(p)).collect();
        matching.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        Ok(matching
            .into_iter()
            .skip(offset)
            .take(page.size as usize)
            .cloned()
            .collect())
    }

    async fn update(&self, product: &Product) -> Result<bool, DatabaseError> {
        match self.products.write().await.get_mut(&product.id) {
            Some(existing) => {
                *existing = product.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        Ok(self.products.write().await.remove(&id).is_some())
    }
}
