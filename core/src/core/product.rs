// catalog/src/core/product.rs

//! The `Product` entity and its mapping onto store records.

use crate::error::{CatalogError, CatalogResult};
use crate::store::Document;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A catalog product.
///
/// Field names on the wire follow the existing data set (`Producto`,
/// `Descripcion`, `Precio`, `Foto`, `Disponible`). Missing fields decode to
/// their zero value, with `available` defaulting to `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
  /// Empty until the store assigns one on first insert.
  #[serde(default)]
  pub id: String,
  #[serde(rename = "Producto", default)]
  pub name: String,
  #[serde(rename = "Descripcion", default)]
  pub description: String,
  /// Records written straight from a text field hold the price as a string.
  #[serde(rename = "Precio", default, deserialize_with = "deserialize_price")]
  pub price: f64,
  /// Empty means "no photo"; otherwise a URL handed out by the blob store.
  #[serde(rename = "Foto", default)]
  pub photo_url: String,
  #[serde(rename = "Disponible", default = "default_available")]
  pub available: bool,
}

fn default_available() -> bool {
  true
}

impl Default for Product {
  fn default() -> Self {
    Product {
      id: String::new(),
      name: String::new(),
      description: String::new(),
      price: 0.0,
      photo_url: String::new(),
      available: true,
    }
  }
}

impl Product {
  /// The zero-value placeholder used for "add new" and for lookups that miss.
  pub fn placeholder() -> Self {
    Self::default()
  }

  pub fn is_persisted(&self) -> bool {
    !self.id.is_empty()
  }

  pub fn has_photo(&self) -> bool {
    !self.photo_url.is_empty()
  }

  /// Decodes a stored record. The store key wins over any `id` field inside
  /// the record, which older records may lack entirely.
  pub fn from_document(id: &str, document: Document) -> CatalogResult<Self> {
    let mut product: Product = serde_json::from_value(Value::Object(document)).map_err(|source| CatalogError::Decode {
      id: id.to_string(),
      source,
    })?;
    product.id = id.to_string();
    Ok(product)
  }

  /// The full record, `id` field included.
  pub fn to_document(&self) -> Document {
    let mut doc = self.fields_without_id();
    doc.insert("id".to_string(), Value::String(self.id.clone()));
    doc.insert("Disponible".to_string(), Value::Bool(self.available));
    doc
  }

  /// The field set sent on first insert: no id (the store has not assigned
  /// one yet) and no availability flag.
  pub(crate) fn fields_without_id(&self) -> Document {
    let mut doc = Document::new();
    doc.insert("Producto".to_string(), Value::String(self.name.clone()));
    doc.insert("Descripcion".to_string(), Value::String(self.description.clone()));
    doc.insert("Precio".to_string(), price_value(self.price));
    doc.insert("Foto".to_string(), Value::String(self.photo_url.clone()));
    doc
  }
}

// Whole prices are stored as integers, the same shape a numeric text field produces.
fn price_value(price: f64) -> Value {
  if price.fract() == 0.0 && price.abs() < i64::MAX as f64 {
    Value::from(price as i64)
  } else {
    serde_json::Number::from_f64(price).map(Value::Number).unwrap_or_else(|| Value::from(0))
  }
}

// Accepts a number, numeric text or null; anything unusable becomes 0.
fn deserialize_price<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
  D: Deserializer<'de>,
{
  #[derive(Deserialize)]
  #[serde(untagged)]
  enum StoredPrice {
    Number(f64),
    Text(String),
    Missing(Option<()>),
  }

  Ok(match StoredPrice::deserialize(deserializer)? {
    StoredPrice::Number(n) if n.is_finite() && n >= 0.0 => n,
    StoredPrice::Number(_) | StoredPrice::Missing(_) => 0.0,
    StoredPrice::Text(text) => parse_price(&text),
  })
}

/// Coerces price text from an input field into a number.
///
/// Surrounding whitespace is ignored. Anything that is not a finite,
/// non-negative decimal number becomes `0.0`.
pub fn parse_price(text: &str) -> f64 {
  match text.trim().parse::<f64>() {
    Ok(value) if value.is_finite() && value >= 0.0 => value,
    _ => 0.0,
  }
}
