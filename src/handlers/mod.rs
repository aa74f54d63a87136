// handlers/mod.rs - Handlers grouped by security tier
//
// Public (no token) → Protected (authenticated principal)

pub mod protected;
pub mod public;
