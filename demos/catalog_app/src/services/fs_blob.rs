// demos/catalog_app/src/services/fs_blob.rs

//! A `BlobStore` backed by a local directory.
//!
//! Uploads copy the source file into `root`; URLs are `{base_url}/{object_name}`.

use anyhow::{anyhow, Context};
use async_trait::async_trait;
use catalog::{BlobHandle, BlobStore};
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FsBlobStore {
  root: PathBuf,
  base_url: String,
}

impl FsBlobStore {
  /// Creates the root directory if needed.
  pub async fn open(root: impl Into<PathBuf>, base_url: impl Into<String>) -> anyhow::Result<Self> {
    let root = root.into();
    tokio::fs::create_dir_all(&root)
      .await
      .with_context(|| format!("creating blob directory {}", root.display()))?;
    Ok(Self {
      root,
      base_url: base_url.into().trim_end_matches('/').to_string(),
    })
  }

  pub fn root(&self) -> &Path {
    &self.root
  }

  fn object_path(&self, handle: &BlobHandle) -> anyhow::Result<PathBuf> {
    object_file(&self.root, handle.full_path())
  }
}

/// Location of `name` inside `root`. Object names are flat; anything that
/// could escape the root is refused.
pub fn object_file(root: &Path, name: &str) -> anyhow::Result<PathBuf> {
  if name.is_empty() || name.contains('/') || name.contains('\\') || name == "." || name == ".." {
    return Err(anyhow!("invalid object name '{}'", name));
  }
  Ok(root.join(name))
}

#[async_trait]
impl BlobStore for FsBlobStore {
  async fn upload(&self, object_name: &str, local_path: &Path) -> anyhow::Result<BlobHandle> {
    let handle = BlobHandle::new(object_name);
    let target = self.object_path(&handle)?;
    let bytes = tokio::fs::copy(local_path, &target)
      .await
      .with_context(|| format!("copying {} into blob store", local_path.display()))?;
    debug!(object_name, bytes, "Stored blob on disk.");
    Ok(handle)
  }

  async fn download_url(&self, handle: &BlobHandle) -> anyhow::Result<String> {
    let path = self.object_path(handle)?;
    if !tokio::fs::try_exists(&path).await.unwrap_or(false) {
      return Err(anyhow!("object '{}' does not exist", handle));
    }
    Ok(format!("{}/{}", self.base_url, handle.full_path()))
  }

  fn resolve_url(&self, url: &str) -> anyhow::Result<BlobHandle> {
    url
      .strip_prefix(&self.base_url)
      .and_then(|rest| rest.strip_prefix('/'))
      .filter(|name| !name.is_empty())
      .map(BlobHandle::new)
      .ok_or_else(|| anyhow!("'{}' is not a URL served by this blob store", url))
  }

  async fn delete(&self, handle: &BlobHandle) -> anyhow::Result<()> {
    let path = self.object_path(handle)?;
    tokio::fs::remove_file(&path)
      .await
      .with_context(|| format!("removing blob {}", handle))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn upload_then_resolve_and_delete() {
    let root = tempfile::tempdir().unwrap();
    let source_dir = tempfile::tempdir().unwrap();
    let source = source_dir.path().join("pen.jpg");
    std::fs::write(&source, b"jpeg bytes").unwrap();

    let store = FsBlobStore::open(root.path().join("blobs"), "http://localhost:8080/blobs/")
      .await
      .unwrap();
    let handle = store.upload("pen.jpg", &source).await.unwrap();
    let url = store.download_url(&handle).await.unwrap();
    assert_eq!(url, "http://localhost:8080/blobs/pen.jpg");
    assert_eq!(std::fs::read(store.root().join("pen.jpg")).unwrap(), b"jpeg bytes");

    let resolved = store.resolve_url(&url).unwrap();
    assert_eq!(resolved, handle);
    store.delete(&resolved).await.unwrap();
    assert!(!store.root().join("pen.jpg").exists());
    assert!(store.delete(&resolved).await.is_err());
  }

  #[tokio::test]
  async fn rejects_foreign_urls_and_escaping_names() {
    let root = tempfile::tempdir().unwrap();
    let store = FsBlobStore::open(root.path(), "http://localhost:8080/blobs").await.unwrap();

    assert!(store.resolve_url("https://elsewhere.test/blobs/pen.jpg").is_err());
    assert!(store.resolve_url("http://localhost:8080/blobs/").is_err());
    assert!(store.upload("..", Path::new("/etc/hosts")).await.is_err());
    assert!(store.download_url(&BlobHandle::new("missing.jpg")).await.is_err());
  }

  #[tokio::test]
  async fn missing_source_file_fails_upload() {
    let root = tempfile::tempdir().unwrap();
    let store = FsBlobStore::open(root.path(), "http://localhost/blobs").await.unwrap();
    let err = store
      .upload("ghost.jpg", &root.path().join("does-not-exist.jpg"))
      .await
      .unwrap_err();
    assert!(format!("{:#}", err).contains("copying"));
  }
}
