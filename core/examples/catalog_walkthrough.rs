// catalog/examples/catalog_walkthrough.rs

use catalog::{
  register_message_logging, CatalogConfig, CatalogResult, InMemoryBlobStore, InMemoryDocumentStore, InMemoryPushMessaging,
  ProductCatalog, ProductEditor,
};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> CatalogResult<()> {
  tracing_subscriber::fmt().with_max_level(tracing::Level::INFO).init();

  info!("--- Catalog Walkthrough ---");

  // 1. Collaborators. Swap these for real backend clients in an application.
  let store = Arc::new(InMemoryDocumentStore::new());
  let blobs = Arc::new(InMemoryBlobStore::default());
  let messaging = InMemoryPushMessaging::default();

  // 2. One coordinator for the whole app, loaded once at startup.
  let catalog = ProductCatalog::new(store, blobs, CatalogConfig::default());
  catalog.start().await?;
  register_message_logging(&messaging).await?;

  // 3. "Add new" from the editor screen.
  let mut editor = ProductEditor::new();
  editor.name = "Pen".to_string();
  editor.description = "Blue pen".to_string();
  editor.price_text = "1200".to_string();
  let pen = editor.save(&catalog).await?;
  info!(id = %pen.id, "Saved new product.");

  // 4. Attach a photo and save again (now an update).
  editor.replace_photo(&catalog, "/tmp/pen.jpg").await?;
  editor.name = "Pen Deluxe".to_string();
  editor.save(&catalog).await?;

  catalog.add("Notebook", "A5, dotted", 850.0).await?;
  catalog.load_all().await?;
  for p in catalog.products() {
    info!(name = %p.name, price = p.price, photo = %p.photo_url, "Listed.");
  }

  // 5. Stage and confirm a delete from the list screen.
  let staged = catalog.find(&pen.id).unwrap_or_default();
  catalog.set_selected_id(staged.id.clone());
  catalog.set_selected_product(staged);
  catalog.delete_selected().await?;

  info!(remaining = catalog.product_count(), "Walkthrough finished.");
  Ok(())
}
