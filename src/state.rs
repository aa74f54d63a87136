use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::{AuthError, AuthorizationPolicy};
use crate::config::AppConfig;
use crate::database::{
    CustomerRepository, DatabaseError, MemoryCustomerRepository, MemoryProductRepository, PgCustomerRepository,
    PgProductRepository, ProductRepository,
};
use crate::services::{AuthenticationService, ProductService};

/// Shared handles every request can reach.
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthenticationService,
    pub products: ProductService,
    pub policy: AuthorizationPolicy,
    customers: Arc<dyn CustomerRepository>,
}

impl AppState {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        products: Arc<dyn ProductRepository>,
        config: &AppConfig,
    ) -> Result<Self, AuthError> {
        Ok(Self {
            auth: AuthenticationService::from_config(customers.clone(), &config.security)?,
            products: ProductService::new(products, config.catalog.clone()),
            policy: AuthorizationPolicy::default(),
            customers,
        })
    }

    pub fn postgres(pool: PgPool, config: &AppConfig) -> Result<Self, AuthError> {
        Self::new(
            Arc::new(PgCustomerRepository::new(pool.clone())),
            Arc::new(PgProductRepository::new(pool)),
            config,
        )
    }

    /// Process-local stores, for tests and database-less runs.
    pub fn in_memory(config: &AppConfig) -> Result<Self, AuthError> {
        Self::new(
            Arc::new(MemoryCustomerRepository::new()),
            Arc::new(MemoryProductRepository::new()),
            config,
        )
    }

    pub async fn check_store(&self) -> Result<(), DatabaseError> {
        self.customers.ping().await
    }
}
