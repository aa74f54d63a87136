use axum::http::Method;

use super::principal::{Permission, Principal};

/// What a rule demands of the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    PermitAll,
    Authenticated,
    Requires(Permission),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathPattern {
    /// Matches the path exactly.
    Exact(&'static str),
    /// Matches the base path and anything nested below it.
    Subtree(&'static str),
}

impl PathPattern {
    pub fn matches(&self, path: &str) -> bool {
        match self {
            PathPattern::Exact(p) => path == *p,
            PathPattern::Subtree(base) => {
                path == *base
                    || path
                        .strip_prefix(base)
                        .map(|rest| rest.starts_with('/'))
                        .unwrap_or(false)
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Rule {
    /// `None` matches every method.
    pub method: Option<&'static str>,
    pub path: PathPattern,
    pub access: Access,
}

impl Rule {
    const fn any(path: PathPattern, access: Access) -> Self {
        Self { method: None, path, access }
    }

    const fn on(method: &'static str, path: PathPattern, access: Access) -> Self {
        Self { method: Some(method), path, access }
    }

    fn matches(&self, method: &Method, path: &str) -> bool {
        self.method.map(|m| m == method.as_str()).unwrap_or(true) && self.path.matches(path)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    /// No authenticated principal where one is required (401).
    Unauthenticated,
    /// Authenticated but missing a required permission (403).
    Forbidden,
}

/// Ordered rules, first match wins. Requests matching no rule need an
/// authenticated principal.
const RULES: &[Rule] = &[
    Rule::any(PathPattern::Exact("/v1/auth/login"), Access::PermitAll),
    Rule::any(PathPattern::Exact("/v1/auth/register"), Access::PermitAll),
    Rule::on("GET", PathPattern::Exact("/health"), Access::PermitAll),
    Rule::on("POST", PathPattern::Exact("/v1/products"), Access::Requires(Permission::Write)),
    Rule::on("PUT", PathPattern::Subtree("/v1/products"), Access::Requires(Permission::Write)),
    Rule::on("DELETE", PathPattern::Subtree("/v1/products"), Access::Requires(Permission::Write)),
];

#[derive(Debug, Clone)]
pub struct AuthorizationPolicy {
    rules: &'static [Rule],
}

impl Default for AuthorizationPolicy {
    fn default() -> Self {
        Self { rules: RULES }
    }
}

impl AuthorizationPolicy {
    pub fn required_access(&self, method: &Method, path: &str) -> Access {
        self.rules
            .iter()
            .find(|rule| rule.matches(method, path))
            .map(|rule| rule.access)
            .unwrap_or(Access::Authenticated)
    }

    pub fn evaluate(&self, method: &Method, path: &str, principal: &Principal) -> Decision {
        match self.required_access(method, path) {
            Access::PermitAll => Decision::Allow,
            _ if !principal.is_authenticated() => Decision::Unauthenticated,
            Access::Authenticated => Decision::Allow,
            Access::Requires(permission) if principal.has_permission(permission) => Decision::Allow,
            Access::Requires(_) => Decision::Forbidden,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::principal::Identity;

    fn principal(permissions: &[Permission]) -> Principal {
        Principal::Authenticated(Identity {
            username: "a@x.com".to_string(),
            permissions: permissions.to_vec(),
        })
    }

    #[test]
    fn auth_endpoints_are_open_to_everyone() {
        let policy = AuthorizationPolicy::default();
        for method in [Method::POST, Method::GET] {
            assert_eq!(policy.evaluate(&method, "/v1/auth/login", &Principal::Anonymous), Decision::Allow);
            assert_eq!(policy.evaluate(&method, "/v1/auth/register", &Principal::Anonymous), Decision::Allow);
        }
    }

    #[test]
    fn anonymous_reads_are_unauthenticated() {
        let policy = AuthorizationPolicy::default();
        assert_eq!(
            policy.evaluate(&Method::GET, "/v1/products", &Principal::Anonymous),
            Decision::Unauthenticated
        );
        assert_eq!(
            policy.evaluate(&Method::GET, "/v1/anything/else", &Principal::Anonymous),
            Decision::Unauthenticated
        );
    }

    #[test]
    fn anonymous_writes_are_unauthenticated_not_forbidden() {
        let policy = AuthorizationPolicy::default();
        assert_eq!(
            policy.evaluate(&Method::POST, "/v1/products", &Principal::Anonymous),
            Decision::Unauthenticated
        );
        assert_eq!(
            policy.evaluate(&Method::DELETE, "/v1/products/abc", &Principal::Anonymous),
            Decision::Unauthenticated
        );
    }

    #[test]
    fn readers_may_read_but_not_write() {
        let policy = AuthorizationPolicy::default();
        let reader = principal(&[Permission::Read]);
        assert_eq!(policy.evaluate(&Method::GET, "/v1/products", &reader), Decision::Allow);
        assert_eq!(policy.evaluate(&Method::GET, "/v1/products/abc", &reader), Decision::Allow);
        assert_eq!(policy.evaluate(&Method::POST, "/v1/products", &reader), Decision::Forbidden);
        assert_eq!(policy.evaluate(&Method::PUT, "/v1/products/abc", &reader), Decision::Forbidden);
        assert_eq!(policy.evaluate(&Method::DELETE, "/v1/products/abc", &reader), Decision::Forbidden);
    }

    #[test]
    fn writers_may_mutate_products() {
        let policy = AuthorizationPolicy::default();
        let writer = principal(&[Permission::Read, Permission::Write]);
        assert_eq!(policy.evaluate(&Method::POST, "/v1/products", &writer), Decision::Allow);
        assert_eq!(policy.evaluate(&Method::PUT, "/v1/products/abc", &writer), Decision::Allow);
        assert_eq!(policy.evaluate(&Method::DELETE, "/v1/products/a/b", &writer), Decision::Allow);
    }

    #[test]
    fn subtree_does_not_match_sibling_prefixes() {
        let pattern = PathPattern::Subtree("/v1/products");
        assert!(pattern.matches("/v1/products"));
        assert!(pattern.matches("/v1/products/"));
        assert!(pattern.matches("/v1/products/1"));
        assert!(!pattern.matches("/v1/productsX"));
        assert!(!pattern.matches("/v1/product"));
    }

    #[test]
    fn unmatched_requests_require_authentication() {
        let policy = AuthorizationPolicy::default();
        assert_eq!(policy.required_access(&Method::PATCH, "/v1/products"), Access::Authenticated);
        assert_eq!(policy.required_access(&Method::GET, "/health"), Access::PermitAll);
        assert_eq!(policy.required_access(&Method::POST, "/health"), Access::Authenticated);
    }
}
