// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use async_trait::async_trait;
use catalog::{
  BlobHandle, BlobStore, CatalogConfig, Document, DocumentStore, InMemoryBlobStore, InMemoryDocumentStore,
  ProductCatalog, SortDirection,
};
use once_cell::sync::Lazy;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::Level;

pub const COLLECTION: &str = "productos";

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

// --- Failure injection ---

/// Operations a flaky collaborator can be told to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
  Query,
  Get,
  Insert,
  Update,
  Delete,
  Upload,
  Url,
  Resolve,
  DeleteBlob,
}

#[derive(Default)]
pub struct Faults {
  failing: Mutex<HashSet<Op>>,
  calls: AtomicUsize,
}

impl Faults {
  pub fn fail(&self, op: Op) {
    self.failing.lock().insert(op);
  }

  pub fn heal(&self, op: Op) {
    self.failing.lock().remove(&op);
  }

  pub fn calls(&self) -> usize {
    self.calls.load(Ordering::SeqCst)
  }

  fn check(&self, op: Op) -> anyhow::Result<()> {
    self.calls.fetch_add(1, Ordering::SeqCst);
    if self.failing.lock().contains(&op) {
      anyhow::bail!("injected failure for {:?}", op);
    }
    Ok(())
  }
}

/// Wraps the in-memory store and fails the operations it is told to.
#[derive(Default)]
pub struct FlakyStore {
  pub inner: InMemoryDocumentStore,
  pub faults: Faults,
}

#[async_trait]
impl DocumentStore for FlakyStore {
  async fn query(&self, collection: &str, order_by: &str, direction: SortDirection) -> anyhow::Result<Vec<(String, Document)>> {
    self.faults.check(Op::Query)?;
    self.inner.query(collection, order_by, direction).await
  }

  async fn get(&self, collection: &str, id: &str) -> anyhow::Result<Option<Document>> {
    self.faults.check(Op::Get)?;
    self.inner.get(collection, id).await
  }

  async fn insert(&self, collection: &str, fields: Document) -> anyhow::Result<String> {
    self.faults.check(Op::Insert)?;
    self.inner.insert(collection, fields).await
  }

  async fn update(&self, collection: &str, id: &str, fields: Document) -> anyhow::Result<()> {
    self.faults.check(Op::Update)?;
    self.inner.update(collection, id, fields).await
  }

  async fn delete(&self, collection: &str, id: &str) -> anyhow::Result<()> {
    self.faults.check(Op::Delete)?;
    self.inner.delete(collection, id).await
  }
}

/// Wraps the in-memory blob store; counts every call.
#[derive(Default)]
pub struct FlakyBlobs {
  pub inner: InMemoryBlobStore,
  pub faults: Faults,
}

#[async_trait]
impl BlobStore for FlakyBlobs {
  async fn upload(&self, object_name: &str, local_path: &Path) -> anyhow::Result<BlobHandle> {
    self.faults.check(Op::Upload)?;
    self.inner.upload(object_name, local_path).await
  }

  async fn download_url(&self, handle: &BlobHandle) -> anyhow::Result<String> {
    self.faults.check(Op::Url)?;
    self.inner.download_url(handle).await
  }

  fn resolve_url(&self, url: &str) -> anyhow::Result<BlobHandle> {
    self.faults.check(Op::Resolve)?;
    self.inner.resolve_url(url)
  }

  async fn delete(&self, handle: &BlobHandle) -> anyhow::Result<()> {
    self.faults.check(Op::DeleteBlob)?;
    self.inner.delete(handle).await
  }
}

/// A catalog over fresh flaky collaborators, with handles kept for assertions.
pub struct Fixture {
  pub store: Arc<FlakyStore>,
  pub blobs: Arc<FlakyBlobs>,
  pub catalog: ProductCatalog,
}

pub fn fixture() -> Fixture {
  setup_tracing();
  let store = Arc::new(FlakyStore::default());
  let blobs = Arc::new(FlakyBlobs::default());
  let catalog = ProductCatalog::new(store.clone(), blobs.clone(), CatalogConfig::default());
  Fixture { store, blobs, catalog }
}

pub fn record(value: Value) -> Document {
  match value {
    Value::Object(map) => map,
    other => panic!("record fixture must be a JSON object, got {}", other),
  }
}

/// Writes a product record straight into the store under `id`.
pub fn seed(store: &FlakyStore, id: &str, name: &str, price: f64, photo: &str) {
  store.inner.put(
    COLLECTION,
    id,
    record(json!({
      "id": id,
      "Producto": name,
      "Descripcion": format!("{} description", name),
      "Precio": price,
      "Foto": photo,
      "Disponible": true,
    })),
  );
}
