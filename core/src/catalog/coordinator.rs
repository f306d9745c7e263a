// catalog/src/catalog/coordinator.rs

//! `ProductCatalog`: the single owner of the product list, the upload state
//! and the pending-delete selection.
//!
//! Every mutating operation talks to the remote collaborator first and only
//! touches the in-memory list once that call has succeeded. Failures leave the
//! list as it was and come back as `CatalogError` values (they are also logged
//! through the operation's tracing span).

use crate::blob::{object_name_from_path, BlobStore};
use crate::core::config::CatalogConfig;
use crate::core::product::Product;
use crate::core::shared_state::SharedState;
use crate::error::{CatalogError, CatalogResult};
use crate::store::DocumentStore;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, event, info, instrument, warn, Level};

/// Everything the presentation layer renders from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogState {
  /// Ordered like the store's query after a `load_all`; `add` appends.
  pub products: Vec<Product>,
  /// Uploads started and not yet finished.
  pub uploads_in_flight: usize,
  /// Id staged for a delete confirmation.
  pub selected_id: String,
  /// Snapshot of the staged product; its photo is removed along with it.
  pub selected_product: Product,
}

impl CatalogState {
  pub fn is_uploading(&self) -> bool {
    self.uploads_in_flight > 0
  }
}

/// Marks an upload as in flight for as long as it is alive.
struct UploadGuard {
  state: SharedState<CatalogState>,
}

impl UploadGuard {
  fn begin(state: &SharedState<CatalogState>) -> Self {
    state.update(|s| s.uploads_in_flight += 1);
    Self { state: state.clone() }
  }
}

impl Drop for UploadGuard {
  fn drop(&mut self) {
    self
      .state
      .update(|s| s.uploads_in_flight = s.uploads_in_flight.saturating_sub(1));
  }
}

/// Coordinates the product list with a `DocumentStore` and a `BlobStore`.
///
/// Build it once at startup and hand clones to consumers; clones share the
/// same collaborators and the same state.
#[derive(Clone)]
pub struct ProductCatalog {
  store: Arc<dyn DocumentStore>,
  blobs: Arc<dyn BlobStore>,
  config: Arc<CatalogConfig>,
  state: SharedState<CatalogState>,
}

impl fmt::Debug for ProductCatalog {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let state = self.state.read();
    f.debug_struct("ProductCatalog")
      .field("config", &self.config)
      .field("products", &state.products.len())
      .field("uploads_in_flight", &state.uploads_in_flight)
      .field("selected_id", &state.selected_id)
      .finish()
  }
}

impl ProductCatalog {
  pub fn new(store: Arc<dyn DocumentStore>, blobs: Arc<dyn BlobStore>, config: CatalogConfig) -> Self {
    event!(Level::DEBUG, collection = %config.collection, order_by = %config.order_by, "Creating product catalog.");
    Self {
      store,
      blobs,
      config: Arc::new(config),
      state: SharedState::default(),
    }
  }

  pub fn config(&self) -> &CatalogConfig {
    &self.config
  }

  /// Startup hook: loads the full list once. There is no matching shutdown.
  pub async fn start(&self) -> CatalogResult<usize> {
    self.load_all().await
  }

  // --- Exposed state (snapshots; guards never leave this type) ---

  pub fn products(&self) -> Vec<Product> {
    self.state.read().products.clone()
  }

  pub fn product_count(&self) -> usize {
    self.state.map_read(|s| &s.products).len()
  }

  /// The list entry with this id, if loaded.
  pub fn find(&self, id: &str) -> Option<Product> {
    self.state.read().products.iter().find(|p| p.id == id).cloned()
  }

  pub fn is_uploading(&self) -> bool {
    self.state.read().is_uploading()
  }

  pub fn uploads_in_flight(&self) -> usize {
    self.state.read().uploads_in_flight
  }

  pub fn selected_id(&self) -> String {
    self.state.read().selected_id.clone()
  }

  pub fn selected_product(&self) -> Product {
    self.state.read().selected_product.clone()
  }

  pub fn snapshot(&self) -> CatalogState {
    self.state.snapshot()
  }

  // --- Selection ---

  pub fn set_selected_id(&self, id: impl Into<String>) {
    let id = id.into();
    self.state.update(|s| s.selected_id = id);
  }

  pub fn set_selected_product(&self, product: Product) {
    self.state.update(|s| s.selected_product = product);
  }

  pub fn clear_selection(&self) {
    self.state.update(|s| {
      s.selected_id.clear();
      s.selected_product = Product::placeholder();
    });
  }

  // --- Reads ---

  /// Replaces the whole list with the store's ordered query result.
  ///
  /// Records that fail to decode are skipped. On a store failure the
  /// previous list stays in place.
  #[instrument(
    name = "ProductCatalog::load_all",
    skip(self),
    fields(collection = %self.config.collection, order_by = %self.config.order_by),
    err(Display)
  )]
  pub async fn load_all(&self) -> CatalogResult<usize> {
    let rows = self
      .store
      .query(&self.config.collection, &self.config.order_by, self.config.direction)
      .await
      .map_err(|e| CatalogError::store("load_all", &self.config.collection, e))?;

    let mut products = Vec::with_capacity(rows.len());
    for (id, doc) in rows {
      match Product::from_document(&id, doc) {
        Ok(product) => products.push(product),
        Err(e) => warn!(%id, error = %e, "Skipping record that is not a product."),
      }
    }

    let count = products.len();
    self.state.update(|s| s.products = products);
    info!(count, "Product list loaded.");
    Ok(count)
  }

  /// Fetches one product straight from the store.
  ///
  /// Never fails: an empty id, a missing record, a store error or an
  /// undecodable record all yield `Product::placeholder()`. The list is not
  /// touched.
  #[instrument(name = "ProductCatalog::load_by_id", skip(self), fields(collection = %self.config.collection))]
  pub async fn load_by_id(&self, id: &str) -> Product {
    if id.is_empty() {
      debug!("Empty id, returning placeholder.");
      return Product::placeholder();
    }

    match self.store.get(&self.config.collection, id).await {
      Ok(Some(doc)) => Product::from_document(id, doc).unwrap_or_else(|e| {
        warn!(error = %e, "Record could not be decoded, returning placeholder.");
        Product::placeholder()
      }),
      Ok(None) => {
        debug!("No such record, returning placeholder.");
        Product::placeholder()
      }
      Err(e) => {
        warn!(error = %format!("{:#}", e), "Fetching record failed, returning placeholder.");
        Product::placeholder()
      }
    }
  }

  // --- Writes ---

  /// Inserts a new product and appends it to the list.
  ///
  /// The store hands back only the generated id, so a second write stamps
  /// that id (and `available = true`) onto the stored record. If that second
  /// write fails the product still exists under its key; the failure is
  /// logged and the product is returned.
  #[instrument(
    name = "ProductCatalog::add",
    skip(self, description),
    fields(collection = %self.config.collection),
    err(Display)
  )]
  pub async fn add(&self, name: &str, description: &str, price: f64) -> CatalogResult<Product> {
    let mut product = Product {
      id: String::new(),
      name: name.to_string(),
      description: description.to_string(),
      price,
      photo_url: String::new(),
      available: true,
    };

    let collection = &self.config.collection;
    product.id = self
      .store
      .insert(collection, product.fields_without_id())
      .await
      .map_err(|e| CatalogError::store("add", collection, e))?;
    event!(Level::DEBUG, id = %product.id, "Record inserted, stamping id.");

    if let Err(e) = self.store.update(collection, &product.id, product.to_document()).await {
      warn!(id = %product.id, error = %format!("{:#}", e), "Inserted record could not be stamped with its id.");
    }

    self.state.update(|s| s.products.push(product.clone()));
    info!(id = %product.id, "Product added.");
    Ok(product)
  }

  /// Overwrites the record at `id` (with `available` forced to `true`) and
  /// swaps the list entry with that id for the new value.
  ///
  /// The list entry is replaced, not mutated: snapshots taken earlier keep
  /// the old value. An id that is not in the list is written to the store but
  /// never added to the list.
  #[instrument(
    name = "ProductCatalog::update",
    skip(self, name, description, photo_url),
    fields(collection = %self.config.collection),
    err(Display)
  )]
  pub async fn update(
    &self,
    id: &str,
    name: &str,
    description: &str,
    price: f64,
    photo_url: &str,
  ) -> CatalogResult<Product> {
    if id.is_empty() {
      return Err(CatalogError::MissingId { operation: "update" });
    }

    let product = Product {
      id: id.to_string(),
      name: name.to_string(),
      description: description.to_string(),
      price,
      photo_url: photo_url.to_string(),
      available: true,
    };

    let collection = &self.config.collection;
    self
      .store
      .update(collection, id, product.to_document())
      .await
      .map_err(|e| CatalogError::store("update", collection, e))?;

    let replaced = self.state.update(|s| {
      let mut replaced = 0;
      for slot in s.products.iter_mut().filter(|slot| slot.id == id) {
        *slot = product.clone();
        replaced += 1;
      }
      replaced
    });
    if replaced == 0 {
      debug!("Updated record is not in the loaded list, list unchanged.");
    }
    info!(replaced, "Product updated.");
    Ok(product)
  }

  /// Deletes the record, then drops the matching list entry.
  ///
  /// Returns whether a list entry was removed. Deleting an id twice is
  /// fine: the second call removes nothing.
  #[instrument(
    name = "ProductCatalog::delete",
    skip(self),
    fields(collection = %self.config.collection),
    err(Display)
  )]
  pub async fn delete(&self, id: &str) -> CatalogResult<bool> {
    if id.is_empty() {
      return Err(CatalogError::MissingId { operation: "delete" });
    }

    let collection = &self.config.collection;
    self
      .store
      .delete(collection, id)
      .await
      .map_err(|e| CatalogError::store("delete", collection, e))?;

    let removed = self.state.update(|s| {
      let before = s.products.len();
      s.products.retain(|p| p.id != id);
      before != s.products.len()
    });
    info!(removed, "Product deleted.");
    Ok(removed)
  }

  /// The confirmation step of a staged delete: removes the selected product,
  /// then its photo, then clears the selection.
  ///
  /// The photo is only touched once the record is gone. If the record
  /// delete fails the selection stays staged.
  #[instrument(name = "ProductCatalog::delete_selected", skip(self), err(Display))]
  pub async fn delete_selected(&self) -> CatalogResult<bool> {
    let (id, photo_url) = {
      let s = self.state.read();
      (s.selected_id.clone(), s.selected_product.photo_url.clone())
    };

    let removed = self.delete(&id).await?;
    let photo = self.delete_image(&photo_url).await;
    self.clear_selection();
    photo.map(|_| removed)
  }

  // --- Images ---

  /// Uploads a local file and returns its retrievable URL.
  ///
  /// The object is named after the last segment of `local_path`; when that
  /// is empty nothing is uploaded and `""` comes back. The upload counts as
  /// in flight from just before the upload until the URL is known or the
  /// attempt fails.
  #[instrument(name = "ProductCatalog::upload_image", skip(self), err(Display))]
  pub async fn upload_image(&self, local_path: &str) -> CatalogResult<String> {
    let object_name = object_name_from_path(local_path);
    if object_name.is_empty() {
      warn!("Path has no file name, nothing uploaded.");
      return Ok(String::new());
    }

    let _in_flight = UploadGuard::begin(&self.state);

    let handle = self
      .blobs
      .upload(object_name, Path::new(local_path))
      .await
      .map_err(|e| CatalogError::blob("upload_image", local_path, e))?;
    let url = self
      .blobs
      .download_url(&handle)
      .await
      .map_err(|e| CatalogError::blob("upload_image", handle.full_path(), e))?;

    info!(%handle, "Image uploaded.");
    Ok(url)
  }

  /// Deletes the blob behind `url`. An empty URL means "no photo" and is a no-op.
  #[instrument(name = "ProductCatalog::delete_image", skip(self), err(Display))]
  pub async fn delete_image(&self, url: &str) -> CatalogResult<()> {
    if url.is_empty() {
      return Ok(());
    }

    let handle = self
      .blobs
      .resolve_url(url)
      .map_err(|e| CatalogError::blob("delete_image", url, e))?;
    self
      .blobs
      .delete(&handle)
      .await
      .map_err(|e| CatalogError::blob("delete_image", handle.full_path(), e))?;

    info!(%handle, "Image deleted.");
    Ok(())
  }
}
