// demos/catalog_app/src/web/handlers/selection_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct SelectionRequest {
  pub id: String,
}

#[instrument(name = "handler::status", skip(app_state))]
pub async fn status_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let state = app_state.catalog.snapshot();
  Ok(HttpResponse::Ok().json(json!({
      "is_uploading": state.is_uploading(),
      "uploads_in_flight": state.uploads_in_flight,
      "product_count": state.products.len(),
      "selected_id": state.selected_id,
      "selected_product": state.selected_product,
      "collection": app_state.config.catalog_collection,
  })))
}

/// Stages a product for deletion, the way a list row's delete button does.
#[instrument(name = "handler::set_selection", skip(app_state, req_body), fields(product_id = %req_body.id))]
pub async fn set_selection_handler(
  app_state: web::Data<AppState>,
  req_body: web::Json<SelectionRequest>,
) -> Result<HttpResponse, AppError> {
  let id = req_body.into_inner().id;
  let product = app_state
    .catalog
    .find(&id)
    .ok_or_else(|| AppError::NotFound(format!("Product with ID {} is not in the catalog.", id)))?;

  app_state.catalog.set_selected_id(id.clone());
  app_state.catalog.set_selected_product(product.clone());
  info!("Product staged for deletion.");
  Ok(HttpResponse::Ok().json(json!({ "selected_id": id, "selected_product": product })))
}

#[instrument(name = "handler::confirm_selection", skip(app_state))]
pub async fn confirm_selection_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let id = app_state.catalog.selected_id();
  let removed = app_state.catalog.delete_selected().await?;
  Ok(HttpResponse::Ok().json(json!({ "id": id, "removed_from_list": removed })))
}
