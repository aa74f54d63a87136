//! Password hashing with bcrypt.
//!
//! Every call to [`PasswordHasher::hash`] draws a fresh salt, so hashing the
//! same plaintext twice yields two different strings that both verify.

use thiserror::Error;

#[derive(Debug, Error)]
#[error("Password hashing failed: {0}")]
pub struct PasswordError(String);

impl PasswordError {
    pub fn from_join(err: tokio::task::JoinError) -> Self {
        PasswordError(err.to_string())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, plaintext: &str) -> Result<String, PasswordError> {
        bcrypt::hash(plaintext, self.cost).map_err(|e| PasswordError(e.to_string()))
    }

    /// False for a wrong password and for a malformed stored hash alike.
    pub fn matches(&self, plaintext: &str, hash: &str) -> bool {
        match bcrypt::verify(plaintext, hash) {
            Ok(matched) => matched,
            Err(e) => {
                tracing::warn!("Stored password hash could not be verified: {}", e);
                false
            }
        }
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}
