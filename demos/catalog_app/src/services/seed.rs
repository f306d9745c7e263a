// demos/catalog_app/src/services/seed.rs
use crate::errors::Result as AppResult;
use catalog::ProductCatalog;
use tracing::info;

const SEED_PRODUCTS: &[(&str, &str, f64)] = &[
  ("Cuaderno", "Cuaderno A5 de tapa dura", 850.0),
  ("Lapicera", "Lapicera azul de punta fina", 120.0),
  ("Mochila", "Mochila impermeable de 20 litros", 15999.9),
];

/// Adds the sample products when the collection is empty. Returns how many were added.
pub async fn seed_catalog(catalog: &ProductCatalog) -> AppResult<usize> {
  catalog.load_all().await?;
  if catalog.product_count() > 0 {
    info!(existing = catalog.product_count(), "Catalog already has products, skipping seed.");
    return Ok(0);
  }

  for (name, description, price) in SEED_PRODUCTS {
    catalog.add(name, description, *price).await?;
  }
  info!(count = SEED_PRODUCTS.len(), "Seeded catalog.");
  Ok(SEED_PRODUCTS.len())
}
