// demos/catalog_app/src/web/handlers/mod.rs

pub mod image_handlers;
pub mod product_handlers;
pub mod selection_handlers;
