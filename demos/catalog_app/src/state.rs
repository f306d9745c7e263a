// demos/catalog_app/src/state.rs
use crate::config::AppConfig;
use catalog::ProductCatalog;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
  /// The one coordinator, built at startup; clones share its state.
  pub catalog: ProductCatalog,
  pub config: Arc<AppConfig>, // Share loaded config
}
