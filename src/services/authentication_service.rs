use std::sync::Arc;

use crate::auth::{AuthError, PasswordError, PasswordHasher, Principal, TokenService};
use crate::config::SecurityConfig;
use crate::database::models::{Customer, CustomerSummary};
use crate::database::{CustomerRepository, DatabaseError};

/// Validated input for a new customer account.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
}

/// Customer registration, credential checks and bearer-token resolution.
#[derive(Clone)]
pub struct AuthenticationService {
    customers: Arc<dyn CustomerRepository>,
    hasher: PasswordHasher,
    tokens: Arc<TokenService>,
    // Verified against when the email is unknown so both failure paths cost one bcrypt check
    decoy_hash: Arc<str>,
}

impl AuthenticationService {
    pub fn new(
        customers: Arc<dyn CustomerRepository>,
        hasher: PasswordHasher,
        tokens: TokenService,
    ) -> Result<Self, AuthError> {
        let decoy_hash = hasher.hash("decoy-password-never-matches")?;
        Ok(Self {
            customers,
            hasher,
            tokens: Arc::new(tokens),
            decoy_hash: decoy_hash.into(),
        })
    }

    pub fn from_config(customers: Arc<dyn CustomerRepository>, config: &SecurityConfig) -> Result<Self, AuthError> {
        Self::new(
            customers,
            PasswordHasher::new(config.bcrypt_cost),
            TokenService::from_config(config)?,
        )
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Create a customer account. The password is stored only as a bcrypt hash.
    pub async fn register(&self, registration: Registration) -> Result<CustomerSummary, AuthError> {
        if self.customers.find_by_email(&registration.email).await?.is_some() {
            tracing::info!("Registration refused, email already in use: {}", registration.email);
            return Err(AuthError::AlreadyRegistered);
        }

        let password_hash = self.hash_password(registration.password).await?;
        let customer = Customer::new(
            registration.name,
            registration.email,
            password_hash,
            registration.is_admin,
        );

        // A concurrent registration can slip past the lookup above; the
        // unique constraint on email decides the winner.
        match self.customers.save(&customer).await {
            Ok(()) => {}
            Err(DatabaseError::UniqueViolation(_)) => {
                tracing::info!("Registration lost a race on email: {}", customer.email);
                return Err(AuthError::AlreadyRegistered);
            }
            Err(e) => return Err(e.into()),
        }

        tracing::info!("Registered customer {} (admin: {})", customer.email, customer.is_admin);
        Ok(customer.summary())
    }

    /// Exchange credentials for a bearer token.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let customer = self.customers.find_by_email(email).await?;

        let (hash, known) = match &customer {
            Some(c) => (c.password_hash.clone(), true),
            None => (self.decoy_hash.to_string(), false),
        };

        let matched = self.verify_password(password.to_string(), hash).await?;
        if !known || !matched {
            tracing::info!("Failed authentication attempt for {}", email);
            return Err(AuthError::BadCredentials);
        }

        let token = self.tokens.generate(email)?;
        tracing::debug!("Issued token for {}", email);
        Ok(token)
    }

    /// Map a raw bearer token to a principal. Never fails: anything that
    /// does not resolve to a stored customer is anonymous.
    pub async fn resolve_principal(&self, token: &str) -> Principal {
        let email = match self.tokens.validate(token) {
            Ok(email) => email,
            Err(_) => return Principal::Anonymous,
        };

        match self.customers.find_by_email(&email).await {
            Ok(Some(customer)) => Principal::from_customer(&customer),
            Ok(None) => {
                tracing::warn!("Valid token for unknown customer {}", email);
                Principal::Anonymous
            }
            Err(e) => {
                tracing::error!("Customer lookup failed while resolving token: {}", e);
                Principal::Anonymous
            }
        }
    }

    async fn hash_password(&self, password: String) -> Result<String, AuthError> {
        let hasher = self.hasher;
        let hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(PasswordError::from_join)??;
        Ok(hash)
    }

    async fn verify_password(&self, password: String, hash: String) -> Result<bool, AuthError> {
        let hasher = self.hasher;
        let matched = tokio::task::spawn_blocking(move || hasher.matches(&password, &hash))
            .await
            .map_err(PasswordError::from_join)?;
        Ok(matched)
    }
}
