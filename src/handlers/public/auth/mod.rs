// handlers/public/auth/mod.rs - Public authentication handlers
//
// Account creation and token acquisition. Reachable without a token.

pub mod login;    // POST /v1/auth/login - authenticate and get JWT
pub mod register; // POST /v1/auth/register - create customer account

pub use login::login_post;
pub use register::register_post;
