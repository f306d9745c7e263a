pub mod config;
pub mod product;
pub mod shared_state;

// Re-export key types for easier access from other catalog modules (and lib.rs)
pub use config::CatalogConfig;
pub use product::{parse_price, Product};
pub use shared_state::SharedState;
