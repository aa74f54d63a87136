use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use crate::auth::principal::Permission;

/// Registered customer. The password is only ever held as a bcrypt hash.
#[derive(Debug, Clone, FromRow)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    #[sqlx(rename = "password_encoded")]
    pub password_hash: String,
    pub is_admin: bool,
    #[sqlx(rename = "dh_created")]
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn new(name: String, email: String, password_hash: String, is_admin: bool) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            password_hash,
            is_admin,
            created_at: Utc::now(),
        }
    }

    /// Every customer can read; admins can also write.
    pub fn permissions(&self) -> Vec<Permission> {
        if self.is_admin {
            vec![Permission::Read, Permission::Write]
        } else {
            vec![Permission::Read]
        }
    }

    pub fn summary(&self) -> CustomerSummary {
        CustomerSummary {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Public view of a customer returned by registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CustomerSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}
