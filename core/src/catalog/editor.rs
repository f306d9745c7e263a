// catalog/src/catalog/editor.rs

//! Form state for the create/edit screen.
//!
//! The editor holds exactly what the input fields hold (the price as raw
//! text) and turns it into coordinator calls on save.

use super::coordinator::ProductCatalog;
use crate::core::product::{parse_price, Product};
use crate::error::CatalogResult;
use tracing::{debug, instrument, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductEditor {
  pub id: String,
  pub name: String,
  pub description: String,
  /// Raw text of the price field.
  pub price_text: String,
  pub photo_url: String,
}

impl ProductEditor {
  /// A blank form for "add new".
  pub fn new() -> Self {
    Self::default()
  }

  pub fn from_product(product: &Product) -> Self {
    let mut editor = Self::new();
    editor.fill(product);
    editor
  }

  fn fill(&mut self, product: &Product) {
    self.id = product.id.clone();
    self.name = product.name.clone();
    self.description = product.description.clone();
    self.price_text = format_price(product.price);
    self.photo_url = product.photo_url.clone();
  }

  pub fn price(&self) -> f64 {
    parse_price(&self.price_text)
  }

  pub fn is_persisted(&self) -> bool {
    !self.id.is_empty()
  }

  /// Photos can only be attached to saved products, and not while another
  /// upload is still running.
  pub fn can_attach_photo(&self, catalog: &ProductCatalog) -> bool {
    self.is_persisted() && !catalog.is_uploading()
  }

  /// Refreshes the form from the store. A blank form stays blank.
  #[instrument(name = "ProductEditor::reload", skip_all, fields(id = %self.id))]
  pub async fn reload(&mut self, catalog: &ProductCatalog) {
    if !self.is_persisted() {
      return;
    }
    let product = catalog.load_by_id(&self.id).await;
    if !product.is_persisted() {
      warn!("Product could not be loaded, form left as is.");
      return;
    }
    self.fill(&product);
  }

  /// Updates the product when it already has an id, otherwise adds it and
  /// adopts the generated id so the next save becomes an update.
  #[instrument(name = "ProductEditor::save", skip_all, fields(id = %self.id), err(Display))]
  pub async fn save(&mut self, catalog: &ProductCatalog) -> CatalogResult<Product> {
    let price = self.price();
    if self.is_persisted() {
      catalog
        .update(&self.id, &self.name, &self.description, price, &self.photo_url)
        .await
    } else {
      let product = catalog.add(&self.name, &self.description, price).await?;
      debug!(new_id = %product.id, "Editor adopted generated id.");
      self.id = product.id.clone();
      Ok(product)
    }
  }

  /// Swaps the form's photo for the file at `local_path`.
  ///
  /// The previous photo blob is deleted first; a failure there is logged and
  /// does not stop the upload. The new URL lands in `photo_url` only; call
  /// `save` to persist it.
  #[instrument(name = "ProductEditor::replace_photo", skip_all, fields(id = %self.id, %local_path), err(Display))]
  pub async fn replace_photo(&mut self, catalog: &ProductCatalog, local_path: &str) -> CatalogResult<String> {
    if !self.photo_url.is_empty() {
      if let Err(e) = catalog.delete_image(&self.photo_url).await {
        warn!(error = %e, "Previous photo could not be deleted.");
      }
      self.photo_url.clear();
    }

    let url = catalog.upload_image(local_path).await?;
    self.photo_url = url.clone();
    Ok(url)
  }
}

// Whole numbers without a trailing ".0", as a number pad would show them.
fn format_price(price: f64) -> String {
  if price.fract() == 0.0 && price.abs() < i64::MAX as f64 {
    format!("{}", price as i64)
  } else {
    price.to_string()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn format_price_keeps_huge_whole_numbers_exact() {
    assert_eq!(format_price(1200.0), "1200");
    assert_eq!(format_price(12.5), "12.5");
    assert_eq!(format_price(1e20), "100000000000000000000");
    assert_eq!(parse_price(&format_price(1e20)), 1e20);
  }

  #[test]
  fn from_product_formats_price_as_text() {
    let editor = ProductEditor::from_product(&Product {
      id: "a".into(),
      name: "Pen".into(),
      price: 1200.0,
      ..Product::default()
    });
    assert_eq!(editor.price_text, "1200");
    assert_eq!(editor.price(), 1200.0);
    assert!(editor.is_persisted());

    let fractional = ProductEditor::from_product(&Product {
      price: 9.5,
      ..Product::default()
    });
    assert_eq!(fractional.price_text, "9.5");
  }

  #[test]
  fn garbage_price_text_saves_as_zero() {
    let editor = ProductEditor {
      price_text: "twelve".into(),
      ..ProductEditor::new()
    };
    assert_eq!(editor.price(), 0.0);
  }
}
