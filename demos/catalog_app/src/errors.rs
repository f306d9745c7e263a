// demos/catalog_app/src/errors.rs

use actix_web::{HttpResponse, ResponseError};
use catalog::CatalogError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
  #[error("Validation Error: {0}")]
  Validation(String),

  #[error("Resource Not Found: {0}")]
  NotFound(String),

  #[error("Configuration Error: {0}")]
  Config(String),

  #[error("Catalog Error: {source}")]
  Catalog {
    #[from] // Allows conversion from catalog::CatalogError
    source: CatalogError,
  },

  #[error("Internal Server Error: {0}")]
  Internal(String),
}

// Allow anyhow::Error to be converted into AppError for convenience in startup code
impl From<anyhow::Error> for AppError {
  fn from(err: anyhow::Error) -> Self {
    match err.downcast::<CatalogError>() {
      Ok(source) => AppError::Catalog { source },
      Err(other) => AppError::Internal(format!("{:#}", other)),
    }
  }
}

impl ResponseError for AppError {
  fn error_response(&self) -> HttpResponse {
    // Log the full error when it's turned into a response
    tracing::error!(application_error = %self, "Responding with error");
    match self {
      AppError::Validation(m) => HttpResponse::BadRequest().json(json!({"error": m})),
      AppError::NotFound(m) => HttpResponse::NotFound().json(json!({"error": m})),
      AppError::Config(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "Configuration issue", "detail": m}))
      }
      AppError::Catalog { source } => match source {
        CatalogError::MissingId { .. } => HttpResponse::BadRequest().json(json!({"error": source.to_string()})),
        CatalogError::Store { .. } => {
          HttpResponse::BadGateway().json(json!({"error": "Document store operation failed", "detail": source.to_string()}))
        }
        CatalogError::Blob { .. } => {
          HttpResponse::BadGateway().json(json!({"error": "Photo storage operation failed", "detail": source.to_string()}))
        }
        _ => HttpResponse::InternalServerError()
          .json(json!({"error": "Catalog processing error", "detail": source.to_string()})),
      },
      AppError::Internal(m) => {
        HttpResponse::InternalServerError().json(json!({"error": "An internal error occurred", "detail": m}))
      }
    }
  }
}

// Define a Result type alias for the application
pub type Result<T, E = AppError> = std::result::Result<T, E>;
