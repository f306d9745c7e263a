// demos/catalog_app/src/config.rs

use crate::errors::{AppError, Result};
use catalog::{CatalogConfig, SortDirection};
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,

  // Where the catalog lives in the document store
  pub catalog_collection: String,
  pub catalog_order_by: String,
  pub catalog_direction: SortDirection,

  // Photo storage: files are copied into blob_dir and served under blob_base_url
  pub blob_dir: PathBuf,
  pub blob_base_url: String,

  // Optional: seed a few products on startup when the store is empty
  pub seed_catalog: bool,
  pub request_push_permission: bool,
}

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present

    let get_env = |var_name: &str| {
      env::var(var_name).map_err(|e| AppError::Config(format!("Missing environment variable '{}': {}", var_name, e)))
    };

    let server_host = get_env("SERVER_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let server_port = get_env("SERVER_PORT")
      .unwrap_or_else(|_| "8080".to_string())
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;

    let catalog_collection =
      get_env("CATALOG_COLLECTION").unwrap_or_else(|_| CatalogConfig::DEFAULT_COLLECTION.to_string());
    let catalog_order_by = get_env("CATALOG_ORDER_BY").unwrap_or_else(|_| CatalogConfig::DEFAULT_ORDER_BY.to_string());
    let catalog_direction = get_env("CATALOG_ORDER_DIRECTION")
      .unwrap_or_else(|_| "asc".to_string())
      .parse::<SortDirection>()
      .map_err(|e| AppError::Config(format!("Invalid CATALOG_ORDER_DIRECTION: {}", e)))?;

    let blob_dir = PathBuf::from(get_env("BLOB_DIR").unwrap_or_else(|_| "./blobs".to_string()));
    let blob_base_url = get_env("BLOB_BASE_URL")
      .unwrap_or_else(|_| format!("http://{}:{}/blobs", server_host, server_port));

    let seed_catalog = get_env("SEED_CATALOG")
      .unwrap_or_else(|_| "false".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid SEED_CATALOG value: {}", e)))?;
    let request_push_permission = get_env("REQUEST_PUSH_PERMISSION")
      .unwrap_or_else(|_| "true".to_string())
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid REQUEST_PUSH_PERMISSION value: {}", e)))?;

    tracing::info!("Application configuration loaded successfully.");

    Ok(Self {
      server_host,
      server_port,
      catalog_collection,
      catalog_order_by,
      catalog_direction,
      blob_dir,
      blob_base_url,
      seed_catalog,
      request_push_permission,
    })
  }

  pub fn catalog_config(&self) -> CatalogConfig {
    CatalogConfig::new(self.catalog_collection.clone())
      .with_order_by(self.catalog_order_by.clone())
      .with_direction(self.catalog_direction)
  }
}
