// demos/catalog_app/src/web/routes.rs

use crate::web::handlers::{image_handlers, product_handlers, selection_handlers};
use actix_web::web;

async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// Called from `main.rs` (and the handler tests) to mount the API on an Actix App.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg.service(
    web::scope("/api/v1")
      .route("/health", web::get().to(health_check_handler))
      .route("/status", web::get().to(selection_handlers::status_handler))
      .service(
        web::scope("/products")
          .route("", web::get().to(product_handlers::list_products_handler))
          .route("", web::post().to(product_handlers::create_product_handler))
          // Registered before "/{product_id}" so it is not captured as an id.
          .route("/refresh", web::post().to(product_handlers::refresh_products_handler))
          .route("/{product_id}", web::get().to(product_handlers::get_product_handler))
          .route("/{product_id}", web::put().to(product_handlers::update_product_handler))
          .route("/{product_id}", web::delete().to(product_handlers::delete_product_handler)),
      )
      .service(
        web::scope("/images")
          .route("", web::post().to(image_handlers::upload_image_handler))
          .route("", web::delete().to(image_handlers::delete_image_handler)),
      )
      .service(
        web::scope("/selection")
          .route("", web::put().to(selection_handlers::set_selection_handler))
          .route("/confirm", web::post().to(selection_handlers::confirm_selection_handler)),
      ),
  );
  // Matches the default BLOB_BASE_URL; a custom base URL must be served elsewhere.
  cfg.route("/blobs/{name}", web::get().to(image_handlers::serve_blob_handler));
}
