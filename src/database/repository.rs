use async_trait::async_trait;
use sqlx::{self, postgres::PgArguments, PgPool};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Customer, Product, ProductRow};
use crate::filter::{PageRequest, ProductFilter, SqlParam};

const CUSTOMER_TABLE: &str = "tb_customer";
const PRODUCT_TABLE: &str = "tb_product";
const PRODUCT_COLUMNS: &[&str] = &[
    "id",
    "name",
    "description",
    "category",
    "price",
    "amount_available",
    "amount_sold",
    "dh_updated",
];

/// Customer persistence.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DatabaseError>;

    /// Insert a new customer. Fails with `UniqueViolation` on a duplicate email.
    async fn save(&self, customer: &Customer) -> Result<(), DatabaseError>;

    async fn delete(&self, customer: &Customer) -> Result<(), DatabaseError>;

    async fn ping(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// Product persistence with dynamic filtering.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn insert(&self, product: &Product) -> Result<(), DatabaseError>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DatabaseError>;

    /// One page of matching products, ascending by name.
    async fn find_all(&self, filter: &ProductFilter, page: PageRequest) -> Result<Vec<Product>, DatabaseError>;

    /// Returns false when no product had that id.
    async fn update(&self, product: &Product) -> Result<bool, DatabaseError>;

    /// Returns false when no product had that id.
    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError>;
}

pub struct PgCustomerRepository {
    pool: PgPool,
}

impl PgCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PgCustomerRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Customer>, DatabaseError> {
        let query = format!(
            "SELECT id, name, email, password_encoded, is_admin, dh_created FROM {} WHERE email = $1",
            CUSTOMER_TABLE
        );
        let customer = sqlx::query_as::<_, Customer>(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(customer)
    }

    async fn save(&self, customer: &Customer) -> Result<(), DatabaseError> {
        let query = format!(
            "INSERT INTO {} (id, name, email, password_encoded, is_admin, dh_created) VALUES ($1, $2, $3, $4, $5, $6)",
            CUSTOMER_TABLE
        );
        sqlx::query(&query)
            .bind(customer.id)
            .bind(&customer.name)
            .bind(&customer.email)
            .bind(&customer.password_hash)
            .bind(customer.is_admin)
            .bind(customer.created_at)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from_write)?;
        Ok(())
    }

    async fn delete(&self, customer: &Customer) -> Result<(), DatabaseError> {
        let query = format!("DELETE FROM {} WHERE id = $1", CUSTOMER_TABLE);
        sqlx::query(&query).bind(customer.id).execute(&self.pool).await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

pub struct PgProductRepository {
    pool: PgPool,
}

impl PgProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn select_by_id_sql() -> String {
        format!("SELECT {} FROM {} WHERE id = $1", PRODUCT_COLUMNS.join(", "), PRODUCT_TABLE)
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn insert(&self, product: &Product) -> Result<(), DatabaseError> {
        let query = format!(
            "INSERT INTO {} ({}) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)",
            PRODUCT_TABLE,
            PRODUCT_COLUMNS.join(", ")
        );
        sqlx::query(&query)
            .bind(product.id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.category.as_str())
            .bind(product.price)
            .bind(product.amount_available)
            .bind(product.amount_sold)
            .bind(product.updated_at)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from_write)?;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Product>, DatabaseError> {
        let query = Self::select_by_id_sql();
        let row = sqlx::query_as::<_, ProductRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.map(Product::try_from).transpose()
    }

    async fn find_all(&self, filter: &ProductFilter, page: PageRequest) -> Result<Vec<Product>, DatabaseError> {
        let sql_result = filter.to_sql(PRODUCT_TABLE, PRODUCT_COLUMNS, page);
        tracing::debug!("Product query: {}", sql_result.query);

        let mut q = sqlx::query_as::<_, ProductRow>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let rows = q.fetch_all(&self.pool).await?;
        rows.into_iter().map(Product::try_from).collect()
    }

    async fn update(&self, product: &Product) -> Result<bool, DatabaseError> {
        let query = format!(
            "UPDATE {} SET name = $2, description = $3, category = $4, price = $5, \
             amount_available = $6, amount_sold = $7, dh_updated = $8 WHERE id = $1",
            PRODUCT_TABLE
        );
        let result = sqlx::query(&query)
            .bind(product.id)
            .bind(&product.name)
            .bind(&product.description)
            .bind(product.category.as_str())
            .bind(product.price)
            .bind(product.amount_available)
            .bind(product.amount_sold)
            .bind(product.updated_at)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from_write)?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        let query = format!("DELETE FROM {} WHERE id = $1", PRODUCT_TABLE);
        let result = sqlx::query(&query).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected() > 0)
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q SqlParam,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments> {
    match v {
        SqlParam::Text(s) => q.bind(s.as_str()),
        SqlParam::Int(i) => q.bind(*i),
    }
}
