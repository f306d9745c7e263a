// catalog/src/store/memory.rs

//! An in-process `DocumentStore` with the semantics the catalog relies on:
//! store-generated ids, update-fails-on-missing, idempotent delete, and
//! ordered queries that skip records lacking the order field.

use super::{Document, DocumentStore, SortDirection};
use anyhow::anyhow;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};
use tracing::{event, Level};

#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
  collections: Mutex<HashMap<String, BTreeMap<String, Document>>>,
}

impl InMemoryDocumentStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of records currently in `collection`.
  pub fn len(&self, collection: &str) -> usize {
    self.collections.lock().get(collection).map_or(0, |c| c.len())
  }

  pub fn is_empty(&self, collection: &str) -> bool {
    self.len(collection) == 0
  }

  /// Raw copy of a record, bypassing the async interface. Handy for asserting
  /// on exactly what was written.
  pub fn record(&self, collection: &str, id: &str) -> Option<Document> {
    self.collections.lock().get(collection).and_then(|c| c.get(id).cloned())
  }

  /// Writes a record under a caller-chosen id, replacing any existing one.
  pub fn put(&self, collection: &str, id: &str, fields: Document) {
    self
      .collections
      .lock()
      .entry(collection.to_string())
      .or_default()
      .insert(id.to_string(), fields);
  }

  fn generate_id() -> String {
    // 20 characters, the length clients of hosted document stores are used to.
    let mut id = uuid::Uuid::new_v4().simple().to_string();
    id.truncate(20);
    id
  }
}

// Cross-type order: null < bool < number < string < everything else.
fn type_rank(value: &Value) -> u8 {
  match value {
    Value::Null => 0,
    Value::Bool(_) => 1,
    Value::Number(_) => 2,
    Value::String(_) => 3,
    Value::Array(_) => 4,
    Value::Object(_) => 5,
  }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
  match (a, b) {
    (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
    (Value::Number(x), Value::Number(y)) => {
      let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
      x.partial_cmp(&y).unwrap_or(Ordering::Equal)
    }
    // Byte-wise, so "Zeta" sorts before "alpha".
    (Value::String(x), Value::String(y)) => x.as_bytes().cmp(y.as_bytes()),
    _ => type_rank(a).cmp(&type_rank(b)),
  }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
  async fn query(
    &self,
    collection: &str,
    order_by: &str,
    direction: SortDirection,
  ) -> anyhow::Result<Vec<(String, Document)>> {
    let mut rows: Vec<(String, Document)> = {
      let guard = self.collections.lock();
      guard
        .get(collection)
        .map(|c| {
          c.iter()
            .filter(|(_, doc)| doc.contains_key(order_by))
            .map(|(id, doc)| (id.clone(), doc.clone()))
            .collect()
        })
        .unwrap_or_default()
    };

    rows.sort_by(|(id_a, a), (id_b, b)| {
      let ord = compare_values(&a[order_by], &b[order_by]).then_with(|| id_a.cmp(id_b));
      match direction {
        SortDirection::Ascending => ord,
        SortDirection::Descending => ord.reverse(),
      }
    });

    event!(Level::TRACE, collection, order_by, rows = rows.len(), "In-memory query served.");
    Ok(rows)
  }

  async fn get(&self, collection: &str, id: &str) -> anyhow::Result<Option<Document>> {
    if id.is_empty() {
      return Err(anyhow!("a record id must be a non-empty string"));
    }
    Ok(self.record(collection, id))
  }

  async fn insert(&self, collection: &str, fields: Document) -> anyhow::Result<String> {
    let id = Self::generate_id();
    self.put(collection, &id, fields);
    event!(Level::TRACE, collection, %id, "In-memory insert.");
    Ok(id)
  }

  async fn update(&self, collection: &str, id: &str, fields: Document) -> anyhow::Result<()> {
    let mut guard = self.collections.lock();
    let existing = guard
      .get_mut(collection)
      .and_then(|c| c.get_mut(id))
      .ok_or_else(|| anyhow!("no record '{}' in collection '{}' to update", id, collection))?;
    existing.extend(fields);
    Ok(())
  }

  async fn delete(&self, collection: &str, id: &str) -> anyhow::Result<()> {
    if id.is_empty() {
      return Err(anyhow!("a record id must be a non-empty string"));
    }
    let removed = self.collections.lock().get_mut(collection).and_then(|c| c.remove(id));
    event!(Level::TRACE, collection, %id, existed = removed.is_some(), "In-memory delete.");
    Ok(())
  }
}
