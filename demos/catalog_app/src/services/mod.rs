// demos/catalog_app/src/services/mod.rs

pub mod fs_blob;
pub mod seed;

pub use fs_blob::{object_file, FsBlobStore};
pub use seed::seed_catalog;
