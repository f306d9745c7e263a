// catalog/src/core/config.rs

use crate::store::SortDirection;

/// Where the catalog lives in the document store and how it is ordered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
  /// Collection holding one record per product.
  pub collection: String,
  /// Record field the list is ordered by.
  pub order_by: String,
  pub direction: SortDirection,
}

impl CatalogConfig {
  pub const DEFAULT_COLLECTION: &'static str = "productos";
  pub const DEFAULT_ORDER_BY: &'static str = "Producto";

  pub fn new(collection: impl Into<String>) -> Self {
    Self {
      collection: collection.into(),
      ..Self::default()
    }
  }

  pub fn with_order_by(mut self, field: impl Into<String>) -> Self {
    self.order_by = field.into();
    self
  }

  pub fn with_direction(mut self, direction: SortDirection) -> Self {
    self.direction = direction;
    self
  }
}

impl Default for CatalogConfig {
  fn default() -> Self {
    Self {
      collection: Self::DEFAULT_COLLECTION.to_string(),
      order_by: Self::DEFAULT_ORDER_BY.to_string(),
      direction: SortDirection::Ascending,
    }
  }
}
