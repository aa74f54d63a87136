use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use serde::Serialize;
use std::convert::Infallible;

use crate::database::models::Customer;

/// Authorization levels governing product mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Permission {
    #[serde(rename = "ROLE_READ")]
    Read,
    #[serde(rename = "ROLE_WRITE")]
    Write,
}

impl Permission {
    pub fn name(&self) -> &'static str {
        match self {
            Permission::Read => "ROLE_READ",
            Permission::Write => "ROLE_WRITE",
        }
    }
}

/// Identity resolved from a bearer token for the duration of one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub permissions: Vec<Permission>,
}

/// Who is making the request. Inserted into request extensions by the
/// principal-resolution middleware and threaded explicitly into services.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Principal {
    #[default]
    Anonymous,
    Authenticated(Identity),
}

impl Principal {
    pub fn from_customer(customer: &Customer) -> Self {
        Principal::Authenticated(Identity {
            username: customer.email.clone(),
            permissions: customer.permissions(),
        })
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, Principal::Authenticated(_))
    }

    pub fn has_permission(&self, permission: Permission) -> bool {
        match self {
            Principal::Anonymous => false,
            Principal::Authenticated(identity) => identity.permissions.contains(&permission),
        }
    }

    pub fn username(&self) -> Option<&str> {
        match self {
            Principal::Anonymous => None,
            Principal::Authenticated(identity) => Some(&identity.username),
        }
    }

    /// Label for log lines.
    pub fn display_name(&self) -> &str {
        self.username().unwrap_or("anonymous")
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts.extensions.get::<Principal>().cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anonymous_has_no_permissions() {
        let principal = Principal::Anonymous;
        assert!(!principal.is_authenticated());
        assert!(!principal.has_permission(Permission::Read));
        assert_eq!(principal.display_name(), "anonymous");
    }

    #[test]
    fn customer_principal_carries_email_and_permissions() {
        let admin = Customer::new("A".into(), "a@x.com".into(), "h".into(), true);
        let principal = Principal::from_customer(&admin);
        assert_eq!(principal.username(), Some("a@x.com"));
        assert!(principal.has_permission(Permission::Read));
        assert!(principal.has_permission(Permission::Write));

        let reader = Customer::new("B".into(), "b@x.com".into(), "h".into(), false);
        let principal = Principal::from_customer(&reader);
        assert!(principal.has_permission(Permission::Read));
        assert!(!principal.has_permission(Permission::Write));
    }

    #[test]
    fn permission_names_match_role_strings() {
        assert_eq!(Permission::Read.name(), "ROLE_READ");
        assert_eq!(serde_json::to_value(Permission::Write).unwrap(), "ROLE_WRITE");
    }
}
