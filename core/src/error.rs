// catalog/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
  #[error("Operation '{operation}' requires a product id")]
  MissingId { operation: &'static str },

  #[error("Document store failed during '{operation}' on collection '{collection}'. Source: {source}")]
  Store {
    operation: &'static str,
    collection: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Blob store failed during '{operation}' for '{target}'. Source: {source}")]
  Blob {
    operation: &'static str,
    target: String,
    #[source]
    source: AnyhowError,
  },

  #[error("Push messaging failed. Source: {source}")]
  Messaging {
    #[source]
    source: AnyhowError,
  },

  #[error("Record '{id}' could not be decoded as a product. Source: {source}")]
  Decode {
    id: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("Internal catalog error: {0}")]
  Internal(String),
}

impl CatalogError {
  pub(crate) fn store(operation: &'static str, collection: &str, source: AnyhowError) -> Self {
    CatalogError::Store {
      operation,
      collection: collection.to_string(),
      source,
    }
  }

  pub(crate) fn blob(operation: &'static str, target: &str, source: AnyhowError) -> Self {
    CatalogError::Blob {
      operation,
      target: target.to_string(),
      source,
    }
  }
}

// Errors bubbling out of collaborators arrive as anyhow::Error.
impl From<AnyhowError> for CatalogError {
  fn from(err: AnyhowError) -> Self {
    // Unwrap a CatalogError that was boxed into anyhow on the way up.
    match err.downcast::<CatalogError>() {
      Ok(catalog_err) => catalog_err,
      Err(other) => CatalogError::Internal(format!("{:#}", other)),
    }
  }
}

pub type CatalogResult<T, E = CatalogError> = std::result::Result<T, E>;
