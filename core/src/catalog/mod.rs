// catalog/src/catalog/mod.rs

//! The product catalog coordinator and the editor form built on top of it.

pub mod coordinator;
pub mod editor;

pub use coordinator::{CatalogState, ProductCatalog};
pub use editor::ProductEditor;
