use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::SecurityConfig;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    /// Customer email
    pub sub: String,
    pub exp: i64,
    pub iat: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("JWT generation error: {0}")]
    Issue(String),

    // Deliberately carries no reason; callers must not learn why.
    #[error("Invalid or expired token")]
    Invalid,
}

/// Issues and validates HS256 bearer tokens bound to a customer's email.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    validity: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], issuer: impl Into<String>, validity: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            validity,
        }
    }

    pub fn from_config(config: &SecurityConfig) -> Result<Self, TokenError> {
        let validity = i64::try_from(config.jwt_expiry_hours)
            .ok()
            .and_then(Duration::try_hours)
            .ok_or_else(|| {
                TokenError::Issue(format!("token validity of {} hours is out of range", config.jwt_expiry_hours))
            })?;
        Ok(Self::new(config.jwt_secret.as_bytes(), config.jwt_issuer.clone(), validity))
    }

    pub fn generate(&self, subject: &str) -> Result<String, TokenError> {
        self.generate_at(subject, Utc::now())
    }

    /// Issue a token as if it had been minted at `issued_at`.
    pub fn generate_at(&self, subject: &str, issued_at: DateTime<Utc>) -> Result<String, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(self.validity)
            .ok_or_else(|| TokenError::Issue("token expiry is out of range".to_string()))?;
        let claims = Claims {
            iss: self.issuer.clone(),
            sub: subject.to_string(),
            exp: expires_at.timestamp(),
            iat: issued_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Issue(e.to_string()))
    }

    /// Verify signature, issuer and expiry, returning the subject.
    pub fn validate(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&self.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);
        // Expiry is a hard cutoff
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!("Token rejected: {:?}", e.kind());
            TokenError::Invalid
        })?;

        // Valid only strictly before `exp`; the library still accepts `exp == now`
        if token_data.claims.exp <= Utc::now().timestamp() {
            tracing::debug!("Token rejected: expired");
            return Err(TokenError::Invalid);
        }

        if token_data.claims.sub.is_empty() {
            tracing::debug!("Token rejected: empty subject");
            return Err(TokenError::Invalid);
        }

        Ok(token_data.claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(b"test-secret", "ecommerce-api", Duration::hours(2))
    }

    #[test]
    fn round_trips_subject() {
        let tokens = service();
        let token = tokens.generate("a@x.com").unwrap();
        assert!(!token.is_empty());
        assert_eq!(tokens.validate(&token).unwrap(), "a@x.com");
    }

    #[test]
    fn expired_token_is_invalid() {
        let tokens = service();
        let token = tokens.generate_at("a@x.com", Utc::now() - Duration::hours(3)).unwrap();
        assert!(matches!(tokens.validate(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn token_is_invalid_at_the_moment_it_expires() {
        let tokens = service();
        let token = tokens.generate_at("a@x.com", Utc::now() - Duration::hours(2)).unwrap();
        assert!(matches!(tokens.validate(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn overflowing_expiry_is_an_issue_error() {
        let tokens = TokenService::new(b"test-secret", "ecommerce-api", Duration::days(365 * 1000));
        let far_future = DateTime::<Utc>::MAX_UTC - Duration::days(1);
        assert!(matches!(tokens.generate_at("a@x.com", far_future), Err(TokenError::Issue(_))));
    }

    #[test]
    fn from_config_rejects_out_of_range_validity() {
        let mut security = crate::config::AppConfig::development().security;
        security.jwt_expiry_hours = 10_000_000_000;
        assert!(matches!(TokenService::from_config(&security), Err(TokenError::Issue(_))));

        security.jwt_expiry_hours = 2;
        let tokens = TokenService::from_config(&security).unwrap();
        let token = tokens.generate("a@x.com").unwrap();
        assert_eq!(tokens.validate(&token).unwrap(), "a@x.com");
    }

    #[test]
    fn token_inside_window_is_valid() {
        let tokens = service();
        let token = tokens.generate_at("a@x.com", Utc::now() - Duration::minutes(119)).unwrap();
        assert_eq!(tokens.validate(&token).unwrap(), "a@x.com");
    }

    #[test]
    fn wrong_secret_is_invalid() {
        let token = service().generate("a@x.com").unwrap();
        let other = TokenService::new(b"another-secret", "ecommerce-api", Duration::hours(2));
        assert!(matches!(other.validate(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn wrong_issuer_is_invalid() {
        let foreign = TokenService::new(b"test-secret", "someone-else", Duration::hours(2));
        let token = foreign.generate("a@x.com").unwrap();
        assert!(matches!(service().validate(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn garbage_is_invalid() {
        assert!(matches!(service().validate("not.a.jwt"), Err(TokenError::Invalid)));
        assert!(matches!(service().validate(""), Err(TokenError::Invalid)));
    }

    #[test]
    fn tampered_token_is_invalid() {
        let tokens = service();
        let mut token = tokens.generate("a@x.com").unwrap();
        token.push('x');
        assert!(matches!(tokens.validate(&token), Err(TokenError::Invalid)));
    }

    #[test]
    fn expiry_is_two_hours_after_issue() {
        let tokens = service();
        let issued = Utc::now();
        let token = tokens.generate_at("a@x.com", issued).unwrap();

        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        let claims = decode::<Claims>(&token, &DecodingKey::from_secret(b""), &validation).unwrap().claims;
        assert_eq!(claims.exp - claims.iat, 2 * 60 * 60);
        assert_eq!(claims.iss, "ecommerce-api");
        assert_eq!(claims.sub, "a@x.com");
    }
}
