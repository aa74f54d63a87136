// handlers/protected/products/mod.rs - Product catalogue handlers
//
// Reads need any authenticated principal; mutations need ROLE_WRITE.
// Both rules are enforced by the policy middleware before these run.

pub mod create; // POST /v1/products
pub mod delete; // DELETE /v1/products/:id
pub mod list;   // GET /v1/products
pub mod show;   // GET /v1/products/:id
pub mod update; // PUT /v1/products/:id
pub mod utils;

pub use create::product_create;
pub use delete::product_delete;
pub use list::product_list;
pub use show::product_show;
pub use update::product_update;
