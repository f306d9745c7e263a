// tests/image_tests.rs
mod common;

use catalog::{BlobHandle, BlobStore, CatalogError};
use common::*;
use serial_test::serial;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
#[serial]
async fn test_upload_returns_url_and_clears_flag() {
  let fx = fixture();
  assert!(!fx.catalog.is_uploading());

  let url = fx.catalog.upload_image("/tmp/photo.jpg").await.unwrap();
  assert_eq!(url, "memory://blobs/photo.jpg");
  assert!(!fx.catalog.is_uploading());
  assert_eq!(fx.catalog.uploads_in_flight(), 0);
  assert_eq!(fx.blobs.inner.source_of("photo.jpg").unwrap(), Path::new("/tmp/photo.jpg"));
}

#[tokio::test]
#[serial]
async fn test_upload_without_file_name_is_a_no_op() {
  let fx = fixture();

  assert_eq!(fx.catalog.upload_image("").await.unwrap(), "");
  assert_eq!(fx.catalog.upload_image("/tmp/dir/").await.unwrap(), "");
  assert!(!fx.catalog.is_uploading());
  assert_eq!(fx.blobs.faults.calls(), 0);
}

#[tokio::test]
#[serial]
async fn test_upload_failure_clears_flag() {
  let fx = fixture();
  fx.blobs.faults.fail(Op::Upload);

  let err = fx.catalog.upload_image("/tmp/photo.jpg").await.unwrap_err();
  assert!(matches!(err, CatalogError::Blob { operation: "upload_image", .. }));
  assert!(!fx.catalog.is_uploading());

  fx.blobs.faults.heal(Op::Upload);
  fx.blobs.faults.fail(Op::Url);
  assert!(fx.catalog.upload_image("/tmp/photo.jpg").await.is_err());
  assert!(!fx.catalog.is_uploading());
}

/// A blob store whose uploads take a while, to observe the in-flight state.
struct SlowBlobs {
  inner: FlakyBlobs,
  delay: Duration,
}

#[async_trait::async_trait]
impl BlobStore for SlowBlobs {
  async fn upload(&self, object_name: &str, local_path: &Path) -> anyhow::Result<BlobHandle> {
    tokio::time::sleep(self.delay).await;
    self.inner.upload(object_name, local_path).await
  }

  async fn download_url(&self, handle: &BlobHandle) -> anyhow::Result<String> {
    self.inner.download_url(handle).await
  }

  fn resolve_url(&self, url: &str) -> anyhow::Result<BlobHandle> {
    self.inner.resolve_url(url)
  }

  async fn delete(&self, handle: &BlobHandle) -> anyhow::Result<()> {
    self.inner.delete(handle).await
  }
}

#[tokio::test]
#[serial]
async fn test_uploading_flag_is_set_while_in_flight() {
  setup_tracing();
  let blobs = Arc::new(SlowBlobs {
    inner: FlakyBlobs::default(),
    delay: Duration::from_millis(100),
  });
  let catalog = catalog::ProductCatalog::new(
    Arc::new(FlakyStore::default()),
    blobs,
    catalog::CatalogConfig::default(),
  );

  let first = tokio::spawn({
    let catalog = catalog.clone();
    async move { catalog.upload_image("/tmp/a.jpg").await }
  });
  let second = tokio::spawn({
    let catalog = catalog.clone();
    async move { catalog.upload_image("/tmp/b.jpg").await }
  });

  tokio::time::sleep(Duration::from_millis(30)).await;
  assert!(catalog.is_uploading());
  assert_eq!(catalog.uploads_in_flight(), 2);

  assert_eq!(first.await.unwrap().unwrap(), "memory://blobs/a.jpg");
  assert_eq!(second.await.unwrap().unwrap(), "memory://blobs/b.jpg");
  assert!(!catalog.is_uploading());
}

#[tokio::test]
#[serial]
async fn test_delete_image_empty_url_makes_no_call() {
  let fx = fixture();
  fx.catalog.delete_image("").await.unwrap();
  assert_eq!(fx.blobs.faults.calls(), 0);
}

#[tokio::test]
#[serial]
async fn test_delete_image_removes_uploaded_blob() {
  let fx = fixture();
  let url = fx.catalog.upload_image("/tmp/photo.jpg").await.unwrap();
  assert!(fx.blobs.inner.contains("photo.jpg"));

  fx.catalog.delete_image(&url).await.unwrap();
  assert!(!fx.blobs.inner.contains("photo.jpg"));

  // Already gone: reported, not panicking.
  let err = fx.catalog.delete_image(&url).await.unwrap_err();
  assert!(matches!(err, CatalogError::Blob { operation: "delete_image", .. }));
}

#[tokio::test]
#[serial]
async fn test_delete_image_rejects_foreign_url() {
  let fx = fixture();
  let err = fx.catalog.delete_image("https://elsewhere.example/x.jpg").await.unwrap_err();
  assert!(matches!(err, CatalogError::Blob { .. }));
  assert_eq!(fx.blobs.inner.object_count(), 0);
}
