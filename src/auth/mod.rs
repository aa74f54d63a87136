pub mod password;
pub mod policy;
pub mod principal;
pub mod token;

use thiserror::Error;

use crate::database::DatabaseError;

pub use password::{PasswordError, PasswordHasher};
pub use policy::{Access, AuthorizationPolicy, Decision};
pub use principal::{Identity, Permission, Principal};
pub use token::{Claims, TokenError, TokenService};

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Customer with this email is already registered")]
    AlreadyRegistered,

    /// Unknown email and wrong password both land here.
    #[error("Occurred a bad authentication attempt")]
    BadCredentials,

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}
