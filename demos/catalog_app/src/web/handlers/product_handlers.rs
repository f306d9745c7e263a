// demos/catalog_app/src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use catalog::parse_price;
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument, warn};

use crate::errors::AppError;
use crate::state::AppState;

/// Prices arrive either as JSON numbers or as the raw text typed into a form.
#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum PriceInput {
  Number(f64),
  Text(String),
}

impl PriceInput {
  pub fn value(&self) -> f64 {
    match self {
      PriceInput::Number(n) if n.is_finite() && *n >= 0.0 => *n,
      PriceInput::Number(_) => 0.0,
      PriceInput::Text(text) => parse_price(text),
    }
  }
}

impl Default for PriceInput {
  fn default() -> Self {
    PriceInput::Number(0.0)
  }
}

#[derive(Deserialize, Debug)]
pub struct CreateProductRequest {
  pub name: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub price: PriceInput,
}

#[derive(Deserialize, Debug)]
pub struct UpdateProductRequest {
  pub name: String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub price: PriceInput,
  #[serde(default)]
  pub photo_url: String,
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = app_state.catalog.products();
  info!("Listing {} products.", products.len());
  Ok(HttpResponse::Ok().json(json!({ "products": products })))
}

#[instrument(name = "handler::refresh_products", skip(app_state))]
pub async fn refresh_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let count = app_state.catalog.load_all().await?;
  Ok(HttpResponse::Ok().json(json!({
      "message": "Catalog reloaded.",
      "count": count,
      "products": app_state.catalog.products()
  })))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  let product = app_state.catalog.load_by_id(&product_id).await;

  if !product.is_persisted() {
    warn!("Product with ID {} not found.", product_id);
    return Err(AppError::NotFound(format!("Product with ID {} not found.", product_id)));
  }
  Ok(HttpResponse::Ok().json(json!({ "product": product })))
}

#[instrument(name = "handler::create_product", skip(app_state, req_body), fields(name = %req_body.name))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  req_body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
  let req = req_body.into_inner();
  if req.name.trim().is_empty() {
    return Err(AppError::Validation("Product name is required.".to_string()));
  }

  let product = app_state
    .catalog
    .add(&req.name, &req.description, req.price.value())
    .await?;
  info!(id = %product.id, "Product created.");
  Ok(HttpResponse::Created().json(json!({ "product": product })))
}

#[instrument(name = "handler::update_product", skip(app_state, path, req_body), fields(product_id = %path.as_ref()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  req_body: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  let req = req_body.into_inner();
  if req.name.trim().is_empty() {
    return Err(AppError::Validation("Product name is required.".to_string()));
  }

  let product = app_state
    .catalog
    .update(&product_id, &req.name, &req.description, req.price.value(), &req.photo_url)
    .await?;
  Ok(HttpResponse::Ok().json(json!({ "product": product })))
}

#[instrument(name = "handler::delete_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let product_id = path.into_inner();
  let removed = app_state.catalog.delete(&product_id).await?;
  Ok(HttpResponse::Ok().json(json!({ "id": product_id, "removed_from_list": removed })))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn price_input_accepts_text_and_numbers() {
    let parsed: PriceInput = serde_json::from_str("\"1200\"").unwrap();
    assert_eq!(parsed.value(), 1200.0);
    let parsed: PriceInput = serde_json::from_str("15.5").unwrap();
    assert_eq!(parsed.value(), 15.5);
    let parsed: PriceInput = serde_json::from_str("\"abc\"").unwrap();
    assert_eq!(parsed.value(), 0.0);
    let parsed: PriceInput = serde_json::from_str("-3").unwrap();
    assert_eq!(parsed.value(), 0.0);
  }
}
