// demos/catalog_app/src/web/handlers/image_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{instrument, warn};

use crate::errors::AppError;
use crate::services::object_file;
use crate::state::AppState;

#[derive(Deserialize, Debug)]
pub struct UploadImageRequest {
  /// Path of the picked file on the server's filesystem.
  pub local_path: String,
}

#[derive(Deserialize, Debug)]
pub struct DeleteImageRequest {
  pub url: String,
}

#[instrument(name = "handler::upload_image", skip(app_state, req_body), fields(local_path = %req_body.local_path))]
pub async fn upload_image_handler(
  app_state: web::Data<AppState>,
  req_body: web::Json<UploadImageRequest>,
) -> Result<HttpResponse, AppError> {
  let url = app_state.catalog.upload_image(&req_body.local_path).await?;
  if url.is_empty() {
    return Err(AppError::Validation("local_path does not name a file.".to_string()));
  }
  Ok(HttpResponse::Created().json(json!({ "url": url })))
}

#[instrument(name = "handler::delete_image", skip(app_state, req_body), fields(url = %req_body.url))]
pub async fn delete_image_handler(
  app_state: web::Data<AppState>,
  req_body: web::Json<DeleteImageRequest>,
) -> Result<HttpResponse, AppError> {
  app_state.catalog.delete_image(&req_body.url).await?;
  Ok(HttpResponse::NoContent().finish())
}

/// Serves a stored photo from the blob directory; this is where upload URLs point by default.
#[instrument(name = "handler::serve_blob", skip(app_state, path), fields(name = %path.as_ref()))]
pub async fn serve_blob_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let name = path.into_inner();
  let file = object_file(&app_state.config.blob_dir, &name).map_err(|e| {
    warn!(error = %e, "Rejected blob name.");
    AppError::NotFound(format!("Photo '{}' not found.", name))
  })?;

  let bytes = match tokio::fs::read(&file).await {
    Ok(bytes) => bytes,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
      return Err(AppError::NotFound(format!("Photo '{}' not found.", name)));
    }
    Err(e) => return Err(AppError::Internal(format!("reading {}: {}", file.display(), e))),
  };

  let content_type = mime_guess::from_path(&file).first_or_octet_stream();
  Ok(HttpResponse::Ok().content_type(content_type.to_string()).body(bytes))
}
