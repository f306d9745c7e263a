// catalog/src/store/mod.rs

//! Defines the `DocumentStore` trait: the remote document database the
//! catalog reads from and writes to.
//!
//! Records are JSON objects keyed by opaque string ids that the store
//! generates. The catalog never builds ids itself.

pub mod memory;

use async_trait::async_trait;
use serde_json::{Map, Value};

/// A single record's fields.
pub type Document = Map<String, Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
  #[default]
  Ascending,
  Descending,
}

impl std::str::FromStr for SortDirection {
  type Err = String;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_ascii_lowercase().as_str() {
      "asc" | "ascending" => Ok(SortDirection::Ascending),
      "desc" | "descending" => Ok(SortDirection::Descending),
      other => Err(format!("unknown sort direction '{}'", other)),
    }
  }
}

/// The document database capability.
///
/// Errors are plain `anyhow::Error`s; the coordinator attaches the operation
/// and collection when it converts them into `CatalogError::Store`.
#[async_trait]
pub trait DocumentStore: Send + Sync + 'static {
  /// Every record in `collection` as `(id, fields)` pairs ordered by
  /// `order_by`. Records lacking the field are not returned.
  async fn query(
    &self,
    collection: &str,
    order_by: &str,
    direction: SortDirection,
  ) -> anyhow::Result<Vec<(String, Document)>>;

  /// `Ok(None)` when no record has that id.
  async fn get(&self, collection: &str, id: &str) -> anyhow::Result<Option<Document>>;

  /// Stores a new record and returns the id the store generated for it.
  /// The id is NOT written into the record's fields.
  async fn insert(&self, collection: &str, fields: Document) -> anyhow::Result<String>;

  /// Merges `fields` into an existing record. Fails when the record does not exist.
  async fn update(&self, collection: &str, id: &str, fields: Document) -> anyhow::Result<()>;

  /// Removes a record. Removing a missing id succeeds.
  async fn delete(&self, collection: &str, id: &str) -> anyhow::Result<()>;
}
