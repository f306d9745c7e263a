// demos/catalog_app/src/main.rs

mod config;
mod errors;
mod services;
mod state;
mod web;

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::services::{seed_catalog, FsBlobStore};
use crate::state::AppState;

use actix_web::{web as actix_data, App, HttpServer};
use catalog::{register_message_logging, InMemoryDocumentStore, InMemoryPushMessaging, ProductCatalog};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO)
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting catalog application server...");

  let app_config = match AppConfig::from_env() {
    Ok(cfg) => Arc::new(cfg),
    Err(e) => {
      tracing::error!(error = %e, "Failed to load application configuration.");
      return Err(std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string()));
    }
  };

  // Collaborators. The document store lives in memory; photos go to a local directory.
  let store = Arc::new(InMemoryDocumentStore::new());
  let blobs = match FsBlobStore::open(&app_config.blob_dir, app_config.blob_base_url.clone()).await {
    Ok(blobs) => {
      tracing::info!(root = %blobs.root().display(), "Blob directory ready.");
      Arc::new(blobs)
    }
    Err(e) => {
      let e = AppError::from(e);
      tracing::error!(error = %e, "Failed to prepare the blob directory.");
      return Err(std::io::Error::new(std::io::ErrorKind::Other, e.to_string()));
    }
  };

  let catalog = ProductCatalog::new(store, blobs, app_config.catalog_config());

  if app_config.seed_catalog {
    if let Err(e) = seed_catalog(&catalog).await {
      tracing::error!(error = %e, "Failed to seed catalog.");
    }
  }

  // Initial load. A failure leaves the list empty; clients can POST /products/refresh.
  match catalog.start().await {
    Ok(count) => tracing::info!(count, "Catalog loaded."),
    Err(e) => tracing::warn!(error = %e, "Initial catalog load failed."),
  }

  if app_config.request_push_permission {
    let messaging = InMemoryPushMessaging::default();
    match register_message_logging(&messaging).await {
      Ok(status) => tracing::info!(?status, "Push messaging registered."),
      Err(e) => tracing::warn!(error = %e, "Push messaging registration failed."),
    }
  }

  let app_state = AppState {
    catalog,
    config: app_config.clone(),
  };

  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await
}
